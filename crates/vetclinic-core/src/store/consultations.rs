//! Consultation repository.

use tokio::sync::watch;
use tracing::{debug, info};

use super::{Collection, StoreResult};
use crate::models::Consultation;

fn next_id(consultations: &[Consultation]) -> u32 {
    consultations.iter().map(|c| c.id).max().unwrap_or(0) + 1
}

/// In-memory repository holding the consultation history.
pub struct ConsultationRepository {
    items: Collection<Consultation>,
}

impl ConsultationRepository {
    pub(crate) fn new(items: Collection<Consultation>) -> Self {
        Self { items }
    }

    /// Live, push-updated view of the full collection.
    pub fn get_all(&self) -> watch::Receiver<Vec<Consultation>> {
        self.items.watch()
    }

    /// Current snapshot, for synchronous consumers.
    pub fn snapshot(&self) -> Vec<Consultation> {
        self.items.snapshot()
    }

    pub fn get_by_id(&self, id: u32) -> Option<Consultation> {
        self.items.find(|c| c.id == id)
    }

    /// Consultations of one pet, collection order preserved.
    pub fn get_by_pet(&self, pet_id: u32) -> Vec<Consultation> {
        self.items.filter(|c| c.pet_id == pet_id)
    }

    /// Consultations of one owner, collection order preserved.
    pub fn get_by_owner(&self, owner_id: &str) -> Vec<Consultation> {
        self.items.filter(|c| c.owner_id == owner_id)
    }

    /// Store a new consultation under the next sequential id.
    pub async fn add(&self, consultation: Consultation) -> StoreResult<Consultation> {
        self.items.simulate_io().await;

        let mut stored = consultation;
        self.items.apply(|consultations| {
            stored.id = next_id(consultations);
            consultations.push(stored.clone());
            true
        });

        debug!(id = stored.id, pet_id = stored.pet_id, "consultation added");
        Ok(stored)
    }

    /// Replace the stored consultation carrying the same id. Leaves the
    /// collection untouched when the id is unknown.
    pub async fn update(&self, consultation: Consultation) -> StoreResult<Consultation> {
        self.items.simulate_io().await;

        let changed = self.items.apply(|consultations| {
            match consultations
                .iter_mut()
                .find(|existing| existing.id == consultation.id)
            {
                Some(slot) if *slot != consultation => {
                    *slot = consultation.clone();
                    true
                }
                _ => false,
            }
        });

        debug!(id = consultation.id, changed, "consultation update");
        Ok(consultation)
    }

    /// Remove the consultation with the given id, if present.
    pub async fn delete(&self, id: u32) -> StoreResult<()> {
        self.items.simulate_io().await;

        let removed = self.items.apply(|consultations| {
            let before = consultations.len();
            consultations.retain(|c| c.id != id);
            consultations.len() != before
        });

        if removed {
            info!(id, "consultation deleted");
        }
        Ok(())
    }

    /// Seed hook: bulk-replace the collection. Demo data only.
    pub fn replace_all(&self, consultations: Vec<Consultation>) {
        self.items.replace_all(consultations);
    }
}
