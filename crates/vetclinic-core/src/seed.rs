//! Demo dataset for first-run and manual testing.

use chrono::{Duration, Local};

use crate::models::{Consultation, Owner, Pet, Species, Specialty, Veterinarian};
use crate::store::VetClinic;

impl VetClinic {
    /// Load the demo dataset through the seed hooks, replacing whatever the
    /// repositories currently hold. Identifier assignment picks up after the
    /// seeded maxima automatically.
    pub fn seed_demo(&self) {
        let today = Local::now().date_naive();

        self.owners().replace_all(vec![
            Owner::new(
                "1-1".into(),
                "Juan Pérez".into(),
                "+56 9 1234 5678".into(),
                "juan@email.com".into(),
            ),
            Owner::new(
                "2-2".into(),
                "María López".into(),
                "+56 9 8765 4321".into(),
                "maria@email.com".into(),
            ),
        ]);

        self.pets().replace_all(vec![
            Pet {
                id: 1,
                owner_id: "1-1".into(),
                name: "Firulais".into(),
                species: Species::Dog,
                age: 5,
                weight_kg: 12.5,
                breed: None,
            },
            Pet {
                id: 2,
                owner_id: "1-1".into(),
                name: "Michi".into(),
                species: Species::Cat,
                age: 3,
                weight_kg: 4.0,
                breed: None,
            },
            Pet {
                id: 3,
                owner_id: "2-2".into(),
                name: "Rex".into(),
                species: Species::Dog,
                age: 2,
                weight_kg: 8.0,
                breed: None,
            },
        ]);

        self.consultations().replace_all(vec![
            Consultation {
                id: 1,
                pet_id: 1,
                owner_id: "1-1".into(),
                description: "Vacunación".into(),
                base_cost: 15_000.0,
                date: today - Duration::days(2),
            },
            Consultation {
                id: 2,
                pet_id: 2,
                owner_id: "1-1".into(),
                description: "Revisión general".into(),
                base_cost: 20_000.0,
                date: today,
            },
        ]);

        self.veterinarians().replace_all(vec![
            Veterinarian {
                id: 1,
                name: "Dr. Smith".into(),
                specialty: Specialty::Cardiology,
            },
            Veterinarian {
                id: 2,
                name: "Dra. Jones".into(),
                specialty: Specialty::Dermatology,
            },
        ]);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::dashboard::clinic_summary;

    #[test]
    fn test_seed_counts() {
        let clinic = VetClinic::new(Duration::ZERO);
        clinic.seed_demo();

        let summary = clinic_summary(&clinic);
        assert_eq!(summary.total_owners, 2);
        assert_eq!(summary.total_pets, 3);
        assert_eq!(summary.total_consultations, 2);
        assert_eq!(summary.total_veterinarians, 2);
    }

    #[tokio::test]
    async fn test_ids_continue_after_seed() {
        let clinic = VetClinic::new(Duration::ZERO);
        clinic.seed_demo();

        let pet = clinic
            .pets()
            .add(Pet::new("2-2".into(), "Luna".into(), Species::Cat, 1, 3.0))
            .await
            .unwrap();

        assert_eq!(pet.id, 4);
    }

    #[test]
    fn test_seeded_records_are_valid() {
        let clinic = VetClinic::new(Duration::ZERO);
        clinic.seed_demo();

        assert!(clinic.owners().snapshot().iter().all(Owner::is_valid));
        assert!(clinic.pets().snapshot().iter().all(Pet::is_valid));
        assert!(clinic
            .consultations()
            .snapshot()
            .iter()
            .all(Consultation::is_valid));
        assert!(clinic
            .veterinarians()
            .snapshot()
            .iter()
            .all(Veterinarian::is_valid));
    }
}
