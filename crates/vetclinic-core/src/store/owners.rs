//! Owner repository.
//!
//! Owners are the one entity whose identifier is caller-supplied, so insert
//! enforces uniqueness instead of assigning ids.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Collection, StoreError, StoreResult};
use crate::models::Owner;

/// In-memory repository holding the authoritative owner collection.
pub struct OwnerRepository {
    items: Collection<Owner>,
}

impl OwnerRepository {
    pub(crate) fn new(items: Collection<Owner>) -> Self {
        Self { items }
    }

    /// Live, push-updated view of the full collection.
    pub fn get_all(&self) -> watch::Receiver<Vec<Owner>> {
        self.items.watch()
    }

    /// Current snapshot, for synchronous consumers.
    pub fn snapshot(&self) -> Vec<Owner> {
        self.items.snapshot()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Owner> {
        self.items.find(|owner| owner.id == id)
    }

    /// Synchronous membership check.
    pub fn exists(&self, id: &str) -> bool {
        self.items.any(|owner| owner.id == id)
    }

    /// Store a new owner under its caller-supplied id. Fails without
    /// touching the collection when the id is already taken; the uniqueness
    /// check happens before the simulated latency.
    pub async fn add(&self, owner: Owner) -> StoreResult<Owner> {
        if self.exists(&owner.id) {
            warn!(id = %owner.id, "rejected duplicate owner");
            return Err(StoreError::DuplicateOwner(owner.id));
        }

        self.items.simulate_io().await;

        self.items.apply(|owners| {
            owners.push(owner.clone());
            true
        });

        debug!(id = %owner.id, name = %owner.name, "owner added");
        Ok(owner)
    }

    /// Replace the stored owner carrying the same id. Leaves the collection
    /// untouched when the id is unknown.
    pub async fn update(&self, owner: Owner) -> StoreResult<Owner> {
        self.items.simulate_io().await;

        let changed = self.items.apply(|owners| {
            match owners.iter_mut().find(|existing| existing.id == owner.id) {
                Some(slot) if *slot != owner => {
                    *slot = owner.clone();
                    true
                }
                _ => false,
            }
        });

        debug!(id = %owner.id, changed, "owner update");
        Ok(owner)
    }

    /// Remove the owner with the given id, if present. Pets referencing the
    /// owner are left in place; there is no cascading delete.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.items.simulate_io().await;

        let removed = self.items.apply(|owners| {
            let before = owners.len();
            owners.retain(|owner| owner.id != id);
            owners.len() != before
        });

        if removed {
            info!(id, "owner deleted");
        }
        Ok(())
    }

    /// Seed hook: bulk-replace the collection. Demo data only.
    pub fn replace_all(&self, owners: Vec<Owner>) {
        self.items.replace_all(owners);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::store::VetClinic;

    fn clinic() -> VetClinic {
        VetClinic::new(Duration::ZERO)
    }

    fn sample(id: &str, name: &str) -> Owner {
        Owner::new(
            id.into(),
            name.into(),
            "+56912345678".into(),
            "owner@email.com".into(),
        )
    }

    #[tokio::test]
    async fn test_add_keeps_caller_id() {
        let clinic = clinic();
        let owners = clinic.owners();

        let stored = owners.add(sample("1-1", "Juan Pérez")).await.unwrap();
        assert_eq!(stored.id, "1-1");
        assert!(owners.exists("1-1"));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let clinic = clinic();
        let owners = clinic.owners();

        owners.add(sample("1-1", "Juan Pérez")).await.unwrap();
        let result = owners.add(sample("1-1", "Impostor")).await;

        assert_eq!(
            result,
            Err(StoreError::DuplicateOwner("1-1".into()))
        );
        let snapshot = owners.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Juan Pérez");
    }

    #[tokio::test]
    async fn test_failed_add_publishes_nothing() {
        let clinic = clinic();
        let owners = clinic.owners();
        owners.add(sample("1-1", "Juan Pérez")).await.unwrap();

        let rx = owners.get_all();
        let revision_before = clinic.revision();

        owners.add(sample("1-1", "Impostor")).await.unwrap_err();

        assert!(!rx.has_changed().unwrap());
        assert_eq!(clinic.revision(), revision_before);
    }

    #[tokio::test]
    async fn test_exists_tracks_membership() {
        let clinic = clinic();
        let owners = clinic.owners();

        assert!(!owners.exists("1-1"));
        owners.add(sample("1-1", "Juan Pérez")).await.unwrap();
        assert!(owners.exists("1-1"));

        owners.delete("1-1").await.unwrap();
        assert!(!owners.exists("1-1"));
    }

    #[tokio::test]
    async fn test_delete_does_not_cascade_to_pets() {
        let clinic = clinic();
        clinic.owners().add(sample("1-1", "Juan Pérez")).await.unwrap();
        clinic
            .pets()
            .add(crate::models::Pet::new(
                "1-1".into(),
                "Firulais".into(),
                crate::models::Species::Dog,
                5,
                12.5,
            ))
            .await
            .unwrap();

        clinic.owners().delete("1-1").await.unwrap();

        // Orphaned pet stays behind, still referencing the removed owner.
        assert_eq!(clinic.pets().get_by_owner("1-1").len(), 1);
    }
}
