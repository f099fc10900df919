//! Pet repository.

use tokio::sync::watch;
use tracing::{debug, info};

use super::{Collection, StoreResult};
use crate::models::Pet;

fn next_id(pets: &[Pet]) -> u32 {
    pets.iter().map(|pet| pet.id).max().unwrap_or(0) + 1
}

/// In-memory repository holding the authoritative pet collection.
pub struct PetRepository {
    items: Collection<Pet>,
}

impl PetRepository {
    pub(crate) fn new(items: Collection<Pet>) -> Self {
        Self { items }
    }

    /// Live, push-updated view of the full collection.
    pub fn get_all(&self) -> watch::Receiver<Vec<Pet>> {
        self.items.watch()
    }

    /// Current snapshot, for synchronous consumers.
    pub fn snapshot(&self) -> Vec<Pet> {
        self.items.snapshot()
    }

    pub fn get_by_id(&self, id: u32) -> Option<Pet> {
        self.items.find(|pet| pet.id == id)
    }

    /// Pets of one owner, collection order preserved.
    pub fn get_by_owner(&self, owner_id: &str) -> Vec<Pet> {
        self.items.filter(|pet| pet.owner_id == owner_id)
    }

    /// Store a new pet. The repository assigns the identifier: one past the
    /// highest id currently in the collection, starting at 1.
    pub async fn add(&self, pet: Pet) -> StoreResult<Pet> {
        self.items.simulate_io().await;

        let mut stored = pet;
        self.items.apply(|pets| {
            stored.id = next_id(pets);
            pets.push(stored.clone());
            true
        });

        debug!(id = stored.id, name = %stored.name, "pet added");
        Ok(stored)
    }

    /// Replace the stored pet carrying the same id. Leaves the collection
    /// untouched when the id is unknown.
    pub async fn update(&self, pet: Pet) -> StoreResult<Pet> {
        self.items.simulate_io().await;

        let changed = self.items.apply(|pets| {
            match pets.iter_mut().find(|existing| existing.id == pet.id) {
                Some(slot) if *slot != pet => {
                    *slot = pet.clone();
                    true
                }
                _ => false,
            }
        });

        debug!(id = pet.id, changed, "pet update");
        Ok(pet)
    }

    /// Remove the pet with the given id, if present.
    pub async fn delete(&self, id: u32) -> StoreResult<()> {
        self.items.simulate_io().await;

        let removed = self.items.apply(|pets| {
            let before = pets.len();
            pets.retain(|pet| pet.id != id);
            pets.len() != before
        });

        if removed {
            info!(id, "pet deleted");
        }
        Ok(())
    }

    /// Seed hook: bulk-replace the collection. Demo data only, not part of
    /// the steady-state contract.
    pub fn replace_all(&self, pets: Vec<Pet>) {
        self.items.replace_all(pets);
    }
}
