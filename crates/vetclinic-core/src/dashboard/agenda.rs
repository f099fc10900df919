//! Consultation views joined with pet data, for lists and the calendar.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Consultation, ConsultationCategory, Pet};
use crate::store::{ConsultationRepository, PetRepository};

/// A consultation joined with its pet at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsultationDetail {
    pub consultation: Consultation,
    /// Name of the referenced pet; "Unknown" when the record no longer
    /// exists (owner deletions do not cascade, so orphans are possible)
    pub pet_name: String,
    pub senior_pet: bool,
    pub final_cost: f64,
    pub category: ConsultationCategory,
}

impl ConsultationDetail {
    /// Resolve the pet reference against the current pet snapshot.
    pub fn build(consultation: Consultation, pets: &PetRepository) -> Self {
        let pet = pets.get_by_id(consultation.pet_id);
        let senior_pet = pet.as_ref().map(Pet::is_senior).unwrap_or(false);

        Self {
            pet_name: pet.map(|p| p.name).unwrap_or_else(|| "Unknown".into()),
            senior_pet,
            final_cost: consultation.final_cost(senior_pet),
            category: consultation.category(),
            consultation,
        }
    }
}

/// Details for every stored consultation, collection order preserved.
pub fn consultation_details(
    consultations: &ConsultationRepository,
    pets: &PetRepository,
) -> Vec<ConsultationDetail> {
    consultations
        .snapshot()
        .into_iter()
        .map(|consultation| ConsultationDetail::build(consultation, pets))
        .collect()
}

/// One calendar day: every consultation dated `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub entries: Vec<ConsultationDetail>,
}

/// Consultations of the given month grouped by day, days ascending.
pub fn agenda_for_month(
    consultations: &ConsultationRepository,
    pets: &PetRepository,
    year: i32,
    month: u32,
) -> Vec<AgendaDay> {
    let mut days: BTreeMap<NaiveDate, Vec<ConsultationDetail>> = BTreeMap::new();

    for consultation in consultations.snapshot() {
        if consultation.date.year() == year && consultation.date.month() == month {
            days.entry(consultation.date)
                .or_default()
                .push(ConsultationDetail::build(consultation, pets));
        }
    }

    days.into_iter()
        .map(|(date, entries)| AgendaDay { date, entries })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::Species;
    use crate::store::VetClinic;

    fn clinic() -> VetClinic {
        VetClinic::new(Duration::ZERO)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_detail_joins_pet_and_applies_discounts() {
        let clinic = clinic();
        let senior_dog = clinic
            .pets()
            .add(Pet::new("1-1".into(), "Firulais".into(), Species::Dog, 9, 12.5))
            .await
            .unwrap();
        clinic
            .consultations()
            .add(Consultation::new(
                senior_dog.id,
                "1-1".into(),
                "Emergencia".into(),
                100_000.0,
                date(2024, 3, 10),
            ))
            .await
            .unwrap();

        let details = consultation_details(clinic.consultations(), clinic.pets());
        assert_eq!(details.len(), 1);

        let detail = &details[0];
        assert_eq!(detail.pet_name, "Firulais");
        assert!(detail.senior_pet);
        assert_eq!(detail.category, ConsultationCategory::Emergency);
        assert!((detail.final_cost - 76_500.0).abs() < 0.1);
    }

    #[tokio::test]
    async fn test_detail_for_orphaned_consultation() {
        let clinic = clinic();
        clinic
            .consultations()
            .add(Consultation::new(
                42,
                "1-1".into(),
                "Control de rutina".into(),
                20_000.0,
                date(2024, 3, 10),
            ))
            .await
            .unwrap();

        let details = consultation_details(clinic.consultations(), clinic.pets());
        assert_eq!(details[0].pet_name, "Unknown");
        assert!(!details[0].senior_pet);
        assert!((details[0].final_cost - 20_000.0).abs() < 0.1);
    }

    #[tokio::test]
    async fn test_month_grouping_sorted_by_day() {
        let clinic = clinic();
        let consultations = clinic.consultations();

        for (day, description) in [(20, "Control de marzo"), (5, "Vacuna de marzo")] {
            consultations
                .add(Consultation::new(
                    1,
                    "1-1".into(),
                    description.into(),
                    20_000.0,
                    date(2024, 3, day),
                ))
                .await
                .unwrap();
        }
        consultations
            .add(Consultation::new(
                1,
                "1-1".into(),
                "Control de abril".into(),
                20_000.0,
                date(2024, 4, 1),
            ))
            .await
            .unwrap();

        let agenda = agenda_for_month(consultations, clinic.pets(), 2024, 3);

        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda[0].date, date(2024, 3, 5));
        assert_eq!(agenda[1].date, date(2024, 3, 20));
        assert_eq!(agenda[0].entries.len(), 1);
    }
}
