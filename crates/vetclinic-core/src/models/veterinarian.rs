//! Veterinarian models.

use serde::{Deserialize, Serialize};

/// Specialties practiced at the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum Specialty {
    Cardiology,
    Dermatology,
    General,
    Surgery,
    Neurology,
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Specialty::Cardiology => "Cardiology",
            Specialty::Dermatology => "Dermatology",
            Specialty::General => "General",
            Specialty::Surgery => "Surgery",
            Specialty::Neurology => "Neurology",
        };
        f.write_str(name)
    }
}

/// A staff veterinarian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Veterinarian {
    /// Repository-assigned identifier; 0 marks a record not yet stored
    pub id: u32,
    pub name: String,
    pub specialty: Specialty,
}

impl Veterinarian {
    pub const MIN_NAME_LEN: usize = 5;

    pub fn new(name: String, specialty: Specialty) -> Self {
        Self {
            id: 0,
            name,
            specialty,
        }
    }

    /// Name must be non-blank and at least five characters.
    pub fn validate_name(&self) -> bool {
        !self.name.trim().is_empty() && self.name.chars().count() >= Self::MIN_NAME_LEN
    }

    /// Check every business rule at once. The specialty set is enforced by
    /// the type.
    pub fn is_valid(&self) -> bool {
        self.validate_name()
    }

    /// Anything other than general practice counts as a specialist.
    pub fn is_specialist(&self) -> bool {
        self.specialty != Specialty::General
    }

    /// Display name with the professional title prefixed, unless the stored
    /// name already carries one.
    pub fn professional_title(&self) -> String {
        if self.name.starts_with("Dr.") || self.name.starts_with("Dra.") {
            self.name.clone()
        } else {
            format!("Dr. {}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialist_vs_general() {
        let cardiologist = Veterinarian::new("Dr. Smith".into(), Specialty::Cardiology);
        let general = Veterinarian::new("Dr. Jones".into(), Specialty::General);

        assert!(cardiologist.is_specialist());
        assert!(!general.is_specialist());
    }

    #[test]
    fn test_name_length() {
        let short = Veterinarian::new("Ana".into(), Specialty::Surgery);
        assert!(!short.validate_name());
        assert!(!short.is_valid());

        let ok = Veterinarian::new("Dr. Smith".into(), Specialty::Surgery);
        assert!(ok.is_valid());
    }

    #[test]
    fn test_title_prefix() {
        let plain = Veterinarian::new("Carla Soto".into(), Specialty::Neurology);
        assert_eq!(plain.professional_title(), "Dr. Carla Soto");

        let titled = Veterinarian::new("Dr. Smith".into(), Specialty::Cardiology);
        assert_eq!(titled.professional_title(), "Dr. Smith");

        let titled_fem = Veterinarian::new("Dra. Jones".into(), Specialty::Dermatology);
        assert_eq!(titled_fem.professional_title(), "Dra. Jones");
    }
}
