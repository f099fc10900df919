//! Pet models.

use serde::{Deserialize, Serialize};

/// Species accepted by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Reptile,
    Other,
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Bird => "Bird",
            Species::Reptile => "Reptile",
            Species::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Rough body-condition class derived from weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum BodyCondition {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// A pet registered at the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    /// Repository-assigned identifier; 0 marks a record not yet stored
    pub id: u32,
    /// Id of the owning client
    pub owner_id: String,
    /// Pet name
    pub name: String,
    /// Species
    pub species: Species,
    /// Age in years
    pub age: u32,
    /// Weight in kg
    pub weight_kg: f64,
    /// Specific breed, when known
    pub breed: Option<String>,
}

impl Pet {
    pub const MIN_NAME_LEN: usize = 2;
    pub const MAX_AGE: u32 = 50;
    pub const MIN_WEIGHT_KG: f64 = 0.1;
    pub const MAX_WEIGHT_KG: f64 = 200.0;

    /// Create a new, not-yet-stored pet. The repository assigns the real id.
    pub fn new(owner_id: String, name: String, species: Species, age: u32, weight_kg: f64) -> Self {
        Self {
            id: 0,
            owner_id,
            name,
            species,
            age,
            weight_kg,
            breed: None,
        }
    }

    /// Name must be non-blank and at least two characters.
    pub fn validate_name(&self) -> bool {
        !self.name.trim().is_empty() && self.name.chars().count() >= Self::MIN_NAME_LEN
    }

    /// Age must fall in a plausible range for a clinic patient.
    pub fn validate_age(&self) -> bool {
        self.age <= Self::MAX_AGE
    }

    /// Weight must be positive and plausible.
    pub fn validate_weight(&self) -> bool {
        (Self::MIN_WEIGHT_KG..=Self::MAX_WEIGHT_KG).contains(&self.weight_kg)
    }

    /// Check every business rule at once. The species set is enforced by the
    /// type, so only the open-ended fields are checked here.
    pub fn is_valid(&self) -> bool {
        self.validate_name() && self.validate_age() && self.validate_weight()
    }

    /// Seniority threshold varies by species.
    pub fn is_senior(&self) -> bool {
        match self.species {
            Species::Dog => self.age >= 7,
            Species::Cat => self.age >= 10,
            _ => self.age >= 8,
        }
    }

    /// Approximate body-condition class from the recorded weight.
    pub fn body_condition(&self) -> BodyCondition {
        if self.weight_kg < 5.0 {
            BodyCondition::Underweight
        } else if self.weight_kg < 25.0 {
            BodyCondition::Normal
        } else if self.weight_kg < 50.0 {
            BodyCondition::Overweight
        } else {
            BodyCondition::Obese
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pet() -> Pet {
        Pet::new("1-1".into(), "Firulais".into(), Species::Dog, 5, 12.5)
    }

    #[test]
    fn test_valid_pet() {
        let pet = sample_pet();
        assert!(pet.is_valid());
        assert!(pet.validate_name());
        assert!(pet.validate_age());
        assert!(pet.validate_weight());
    }

    #[test]
    fn test_name_rules() {
        let mut pet = sample_pet();
        pet.name = "X".into();
        assert!(!pet.validate_name());
        pet.name = "   ".into();
        assert!(!pet.validate_name());
        pet.name = "Bo".into();
        assert!(pet.validate_name());
    }

    #[test]
    fn test_age_bounds() {
        let mut pet = sample_pet();
        pet.age = 50;
        assert!(pet.validate_age());
        pet.age = 51;
        assert!(!pet.validate_age());
        assert!(!pet.is_valid());
    }

    #[test]
    fn test_weight_bounds() {
        let mut pet = sample_pet();
        pet.weight_kg = 0.05;
        assert!(!pet.validate_weight());
        pet.weight_kg = 200.0;
        assert!(pet.validate_weight());
        pet.weight_kg = 200.1;
        assert!(!pet.validate_weight());
    }

    #[test]
    fn test_senior_by_species() {
        let mut dog = sample_pet();
        dog.age = 8;
        assert!(dog.is_senior());

        let mut cat = Pet::new("1-1".into(), "Michi".into(), Species::Cat, 5, 4.0);
        assert!(!cat.is_senior());
        cat.age = 10;
        assert!(cat.is_senior());

        let bird = Pet::new("1-1".into(), "Piolín".into(), Species::Bird, 8, 0.3);
        assert!(bird.is_senior());
    }

    #[test]
    fn test_body_condition() {
        let mut pet = sample_pet();
        pet.weight_kg = 4.0;
        assert_eq!(pet.body_condition(), BodyCondition::Underweight);
        pet.weight_kg = 12.5;
        assert_eq!(pet.body_condition(), BodyCondition::Normal);
        pet.weight_kg = 30.0;
        assert_eq!(pet.body_condition(), BodyCondition::Overweight);
        pet.weight_kg = 80.0;
        assert_eq!(pet.body_condition(), BodyCondition::Obese);
    }
}
