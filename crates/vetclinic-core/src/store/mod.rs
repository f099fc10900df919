//! In-memory store layer: one observable collection per entity type.
//!
//! Each repository owns the authoritative collection for its entity and
//! publishes a full-collection snapshot through a `watch` channel after
//! every effective mutation. Mutations go through a simulated I/O latency
//! before taking effect, mimicking the slow backend of the original system.

mod consultations;
mod owners;
mod pets;
mod veterinarians;

pub use consultations::ConsultationRepository;
pub use owners::OwnerRepository;
pub use pets::PetRepository;
pub use veterinarians::VeterinarianRepository;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("an owner with id {0} is already registered")]
    DuplicateOwner(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Latency applied to every mutation by default.
pub const DEFAULT_OP_DELAY: Duration = Duration::from_millis(800);

/// Shared plumbing for one entity collection: the authoritative snapshot,
/// change publication, the revision counter and the operation latency.
pub(crate) struct Collection<T> {
    state: watch::Sender<Vec<T>>,
    revision: Arc<AtomicU64>,
    op_delay: Duration,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Collection<T> {
    pub(crate) fn new(revision: Arc<AtomicU64>, op_delay: Duration) -> Self {
        let (state, _) = watch::channel(Vec::new());
        Self {
            state,
            revision,
            op_delay,
        }
    }

    /// Live view of the collection. A new receiver starts at the current
    /// snapshot; `changed()` resolves on the next published mutation.
    pub(crate) fn watch(&self) -> watch::Receiver<Vec<T>> {
        self.state.subscribe()
    }

    /// Immutable copy of the current snapshot.
    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.state.borrow().clone()
    }

    pub(crate) fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        self.state.borrow().iter().find(|item| pred(item)).cloned()
    }

    pub(crate) fn filter(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        self.state
            .borrow()
            .iter()
            .filter(|item| pred(item))
            .cloned()
            .collect()
    }

    pub(crate) fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.state.borrow().iter().any(|item| pred(item))
    }

    pub(crate) async fn simulate_io(&self) {
        if !self.op_delay.is_zero() {
            tokio::time::sleep(self.op_delay).await;
        }
    }

    /// Apply `mutate` to the collection. Observers are only notified (and
    /// the revision only bumped) when the closure reports an effective
    /// change; a no-op publishes nothing, matching state-flow conflation.
    pub(crate) fn apply(&self, mutate: impl FnOnce(&mut Vec<T>) -> bool) -> bool {
        let changed = self.state.send_if_modified(mutate);
        if changed {
            self.revision.fetch_add(1, Ordering::SeqCst);
        }
        changed
    }

    /// Bulk replacement, used only by the seed hook.
    pub(crate) fn replace_all(&self, items: Vec<T>) {
        self.apply(|current| {
            if *current == items {
                return false;
            }
            *current = items;
            true
        });
    }
}

/// Aggregate of the four entity repositories, constructed once at process
/// start and handed to consumers by reference.
pub struct VetClinic {
    pets: PetRepository,
    owners: OwnerRepository,
    veterinarians: VeterinarianRepository,
    consultations: ConsultationRepository,
    revision: Arc<AtomicU64>,
}

impl VetClinic {
    /// Build a clinic whose mutations take `op_delay` to apply. Tests pass
    /// `Duration::ZERO`.
    pub fn new(op_delay: Duration) -> Self {
        let revision = Arc::new(AtomicU64::new(0));
        Self {
            pets: PetRepository::new(Collection::new(revision.clone(), op_delay)),
            owners: OwnerRepository::new(Collection::new(revision.clone(), op_delay)),
            veterinarians: VeterinarianRepository::new(Collection::new(revision.clone(), op_delay)),
            consultations: ConsultationRepository::new(Collection::new(revision.clone(), op_delay)),
            revision,
        }
    }

    pub fn pets(&self) -> &PetRepository {
        &self.pets
    }

    pub fn owners(&self) -> &OwnerRepository {
        &self.owners
    }

    pub fn veterinarians(&self) -> &VeterinarianRepository {
        &self.veterinarians
    }

    pub fn consultations(&self) -> &ConsultationRepository {
        &self.consultations
    }

    /// Monotonic counter bumped on every effective mutation in any
    /// repository. Polling consumers compare it against a remembered value
    /// to detect change.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl Default for VetClinic {
    fn default() -> Self {
        Self::new(DEFAULT_OP_DELAY)
    }
}
