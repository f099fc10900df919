//! Veterinarian repository.

use tokio::sync::watch;
use tracing::{debug, info};

use super::{Collection, StoreResult};
use crate::models::{Specialty, Veterinarian};

fn next_id(veterinarians: &[Veterinarian]) -> u32 {
    veterinarians.iter().map(|vet| vet.id).max().unwrap_or(0) + 1
}

/// In-memory repository holding the clinic staff roster.
pub struct VeterinarianRepository {
    items: Collection<Veterinarian>,
}

impl VeterinarianRepository {
    pub(crate) fn new(items: Collection<Veterinarian>) -> Self {
        Self { items }
    }

    /// Live, push-updated view of the full collection.
    pub fn get_all(&self) -> watch::Receiver<Vec<Veterinarian>> {
        self.items.watch()
    }

    /// Current snapshot, for synchronous consumers.
    pub fn snapshot(&self) -> Vec<Veterinarian> {
        self.items.snapshot()
    }

    pub fn get_by_id(&self, id: u32) -> Option<Veterinarian> {
        self.items.find(|vet| vet.id == id)
    }

    /// Staff practicing one specialty, collection order preserved.
    pub fn get_by_specialty(&self, specialty: Specialty) -> Vec<Veterinarian> {
        self.items.filter(|vet| vet.specialty == specialty)
    }

    /// Store a new veterinarian under the next sequential id.
    pub async fn add(&self, veterinarian: Veterinarian) -> StoreResult<Veterinarian> {
        self.items.simulate_io().await;

        let mut stored = veterinarian;
        self.items.apply(|veterinarians| {
            stored.id = next_id(veterinarians);
            veterinarians.push(stored.clone());
            true
        });

        debug!(id = stored.id, name = %stored.name, "veterinarian added");
        Ok(stored)
    }

    /// Replace the stored veterinarian carrying the same id. Leaves the
    /// collection untouched when the id is unknown.
    pub async fn update(&self, veterinarian: Veterinarian) -> StoreResult<Veterinarian> {
        self.items.simulate_io().await;

        let changed = self.items.apply(|veterinarians| {
            match veterinarians
                .iter_mut()
                .find(|existing| existing.id == veterinarian.id)
            {
                Some(slot) if *slot != veterinarian => {
                    *slot = veterinarian.clone();
                    true
                }
                _ => false,
            }
        });

        debug!(id = veterinarian.id, changed, "veterinarian update");
        Ok(veterinarian)
    }

    /// Remove the veterinarian with the given id, if present.
    pub async fn delete(&self, id: u32) -> StoreResult<()> {
        self.items.simulate_io().await;

        let removed = self.items.apply(|veterinarians| {
            let before = veterinarians.len();
            veterinarians.retain(|vet| vet.id != id);
            veterinarians.len() != before
        });

        if removed {
            info!(id, "veterinarian deleted");
        }
        Ok(())
    }

    /// Seed hook: bulk-replace the collection. Demo data only.
    pub fn replace_all(&self, veterinarians: Vec<Veterinarian>) {
        self.items.replace_all(veterinarians);
    }
}
