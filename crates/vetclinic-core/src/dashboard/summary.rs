//! Clinic-wide summary combining all four repositories.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::models::{Consultation, Owner, Pet, Veterinarian};
use crate::store::VetClinic;

/// Entity counts shown on the clinic dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicSummary {
    pub total_pets: usize,
    pub total_owners: usize,
    pub total_consultations: usize,
    pub total_veterinarians: usize,
}

impl ClinicSummary {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Recombines the four repository views into dashboard summaries whenever
/// any of them changes.
pub struct Dashboard {
    pets: watch::Receiver<Vec<Pet>>,
    owners: watch::Receiver<Vec<Owner>>,
    consultations: watch::Receiver<Vec<Consultation>>,
    veterinarians: watch::Receiver<Vec<Veterinarian>>,
}

impl Dashboard {
    pub fn new(clinic: &VetClinic) -> Self {
        Self {
            pets: clinic.pets().get_all(),
            owners: clinic.owners().get_all(),
            consultations: clinic.consultations().get_all(),
            veterinarians: clinic.veterinarians().get_all(),
        }
    }

    /// Summary over the latest snapshots.
    pub fn current(&self) -> ClinicSummary {
        ClinicSummary {
            total_pets: self.pets.borrow().len(),
            total_owners: self.owners.borrow().len(),
            total_consultations: self.consultations.borrow().len(),
            total_veterinarians: self.veterinarians.borrow().len(),
        }
    }

    /// Wait until any repository publishes a new snapshot, then return the
    /// recomputed summary.
    pub async fn changed(&mut self) -> ClinicSummary {
        tokio::select! {
            _ = self.pets.changed() => {}
            _ = self.owners.changed() => {}
            _ = self.consultations.changed() => {}
            _ = self.veterinarians.changed() => {}
        }
        self.current()
    }
}

/// Summary computed directly from the current snapshots, for callers that
/// do not hold a [`Dashboard`].
pub fn clinic_summary(clinic: &VetClinic) -> ClinicSummary {
    ClinicSummary {
        total_pets: clinic.pets().snapshot().len(),
        total_owners: clinic.owners().snapshot().len(),
        total_consultations: clinic.consultations().snapshot().len(),
        total_veterinarians: clinic.veterinarians().snapshot().len(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Local;

    use super::*;
    use crate::models::{Species, Specialty};

    fn clinic() -> VetClinic {
        VetClinic::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_counts_follow_repositories() {
        let clinic = clinic();
        let dashboard = Dashboard::new(&clinic);

        assert_eq!(dashboard.current().total_pets, 0);

        clinic
            .pets()
            .add(Pet::new("1-1".into(), "Firulais".into(), Species::Dog, 5, 12.5))
            .await
            .unwrap();
        clinic
            .veterinarians()
            .add(Veterinarian::new("Dr. Smith".into(), Specialty::Cardiology))
            .await
            .unwrap();

        let summary = dashboard.current();
        assert_eq!(summary.total_pets, 1);
        assert_eq!(summary.total_veterinarians, 1);
        assert_eq!(summary.total_owners, 0);
    }

    #[tokio::test]
    async fn test_changed_resolves_after_any_mutation() {
        let clinic = clinic();
        let mut dashboard = Dashboard::new(&clinic);

        clinic
            .consultations()
            .add(Consultation::new(
                1,
                "1-1".into(),
                "Control de rutina".into(),
                20_000.0,
                Local::now().date_naive(),
            ))
            .await
            .unwrap();

        let summary = dashboard.changed().await;
        assert_eq!(summary.total_consultations, 1);
    }

    #[test]
    fn test_summary_json_export() {
        let summary = ClinicSummary {
            total_pets: 3,
            total_owners: 2,
            total_consultations: 2,
            total_veterinarians: 2,
        };
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"total_pets\": 3"));
    }
}
