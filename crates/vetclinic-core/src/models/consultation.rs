//! Consultation models and cost rules.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Keywords that flag a consultation as an emergency. Descriptions are
/// entered by clinic staff in Spanish, so the trigger words are too.
const EMERGENCY_KEYWORDS: [&str; 5] = ["emergencia", "urgente", "urgencia", "crítico", "grave"];

const EMERGENCY_DISCOUNT: f64 = 0.15;
const SENIOR_DISCOUNT: f64 = 0.10;

/// Urgency category, by descending keyword priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum ConsultationCategory {
    Emergency,
    Control,
    Vaccination,
    General,
}

impl std::fmt::Display for ConsultationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConsultationCategory::Emergency => "Emergency",
            ConsultationCategory::Control => "Control",
            ConsultationCategory::Vaccination => "Vaccination",
            ConsultationCategory::General => "General",
        };
        f.write_str(name)
    }
}

/// A medical consultation, referencing its pet and owner by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Consultation {
    /// Repository-assigned identifier; 0 marks a record not yet stored
    pub id: u32,
    pub pet_id: u32,
    pub owner_id: String,
    pub description: String,
    /// Cost before discounts, in clinic currency
    pub base_cost: f64,
    pub date: NaiveDate,
}

impl Consultation {
    pub const MIN_DESCRIPTION_LEN: usize = 5;
    pub const MIN_COST: f64 = 5_000.0;
    pub const MAX_COST: f64 = 500_000.0;
    pub const RECENT_WINDOW_DAYS: i64 = 7;

    pub fn new(
        pet_id: u32,
        owner_id: String,
        description: String,
        base_cost: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            pet_id,
            owner_id,
            description,
            base_cost,
            date,
        }
    }

    /// Description must be non-blank and at least five characters.
    pub fn validate_description(&self) -> bool {
        !self.description.trim().is_empty()
            && self.description.chars().count() >= Self::MIN_DESCRIPTION_LEN
    }

    /// Base cost must fall in the allowed billing range.
    pub fn validate_cost(&self) -> bool {
        (Self::MIN_COST..=Self::MAX_COST).contains(&self.base_cost)
    }

    /// Consultations cannot be dated in the future.
    pub fn validate_date(&self) -> bool {
        self.date <= Local::now().date_naive()
    }

    /// Check every business rule at once.
    pub fn is_valid(&self) -> bool {
        self.validate_description() && self.validate_cost() && self.validate_date()
    }

    /// Whether the consultation happened within the last seven days.
    pub fn is_recent(&self) -> bool {
        let elapsed = Local::now()
            .date_naive()
            .signed_duration_since(self.date)
            .num_days();
        elapsed <= Self::RECENT_WINDOW_DAYS
    }

    /// Emergency flag from keyword match in the description.
    pub fn is_emergency(&self) -> bool {
        let description = self.description.to_lowercase();
        EMERGENCY_KEYWORDS
            .iter()
            .any(|keyword| description.contains(keyword))
    }

    /// Final cost after sequential discounts: 15% off for emergencies,
    /// then 10% off for senior pets.
    pub fn final_cost(&self, senior_pet: bool) -> f64 {
        let mut cost = self.base_cost;

        if self.is_emergency() {
            cost *= 1.0 - EMERGENCY_DISCOUNT;
        }

        if senior_pet {
            cost *= 1.0 - SENIOR_DISCOUNT;
        }

        cost
    }

    /// Urgency category, emergency keywords taking priority.
    pub fn category(&self) -> ConsultationCategory {
        let description = self.description.to_lowercase();
        if self.is_emergency() {
            ConsultationCategory::Emergency
        } else if description.contains("control") {
            ConsultationCategory::Control
        } else if description.contains("vacuna") {
            ConsultationCategory::Vaccination
        } else {
            ConsultationCategory::General
        }
    }
}
