//! VetClinic Core Library
//!
//! In-memory data core for a veterinary clinic management app.
//!
//! # Architecture
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │   Mobile shell (Kotlin/Swift)│
//!                    └──────────────┬───────────────┘
//!                                   │ uniffi
//!                    ┌──────────────▼───────────────┐
//!                    │        VetClinicCore         │
//!                    │  (FFI records + async ops)   │
//!                    └──────────────┬───────────────┘
//!                                   │
//!        ┌──────────────┬───────────┼────────────┬──────────────┐
//!        ▼              ▼           ▼            ▼              │
//!     PetRepo       OwnerRepo   VetRepo   ConsultationRepo      │
//!        │              │           │            │              │
//!        └──────── watch snapshots + revision counter ──────────┘
//!                                   │
//!                    ┌──────────────▼───────────────┐
//!                    │   Dashboard (counts, joins)  │
//!                    └──────────────────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **Repositories store what they are given.** Validation is advisory and
//! runs in the presentation layer before submission; only owner-id
//! uniqueness is enforced at insert time.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Pet, Owner, Veterinarian, Consultation)
//! - [`store`]: Observable in-memory repositories
//! - [`dashboard`]: Display-ready aggregations (counts, joined views)

pub mod dashboard;
pub mod models;
mod seed;
pub mod store;

// Re-export commonly used types
pub use dashboard::{
    agenda_for_month, clinic_summary, consultation_details, AgendaDay, ClinicSummary,
    ConsultationDetail, Dashboard,
};
pub use models::{
    BodyCondition, Consultation, ConsultationCategory, Owner, Pet, Species, Specialty,
    Veterinarian,
};
pub use store::{
    ConsultationRepository, OwnerRepository, PetRepository, StoreError, VetClinic,
    VeterinarianRepository, DEFAULT_OP_DELAY,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VetClinicError {
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<StoreError> for VetClinicError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateOwner(id) => VetClinicError::DuplicateId(id),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an empty clinic core with production latency settings.
#[uniffi::export]
pub fn open_clinic() -> Arc<VetClinicCore> {
    Arc::new(VetClinicCore {
        clinic: Arc::new(VetClinic::default()),
    })
}

/// Create a clinic core pre-loaded with the demo dataset.
#[uniffi::export]
pub fn open_clinic_seeded() -> Arc<VetClinicCore> {
    let clinic = VetClinic::default();
    clinic.seed_demo();
    Arc::new(VetClinicCore {
        clinic: Arc::new(clinic),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic handle for FFI.
#[derive(uniffi::Object)]
pub struct VetClinicCore {
    clinic: Arc<VetClinic>,
}

impl VetClinicCore {
    /// The underlying clinic aggregate, for Rust-side consumers that want
    /// the watch-based API.
    pub fn clinic(&self) -> &Arc<VetClinic> {
        &self.clinic
    }
}

#[uniffi::export]
impl VetClinicCore {
    // =========================================================================
    // Queries (synchronous snapshots)
    // =========================================================================

    /// Current pet collection.
    pub fn list_pets(&self) -> Vec<FfiPet> {
        self.clinic.pets().snapshot().into_iter().map(Into::into).collect()
    }

    /// Look up one pet by id.
    pub fn get_pet(&self, id: u32) -> Option<FfiPet> {
        self.clinic.pets().get_by_id(id).map(Into::into)
    }

    /// Pets belonging to one owner.
    pub fn pets_by_owner(&self, owner_id: String) -> Vec<FfiPet> {
        self.clinic
            .pets()
            .get_by_owner(&owner_id)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Current owner collection.
    pub fn list_owners(&self) -> Vec<FfiOwner> {
        self.clinic.owners().snapshot().into_iter().map(Into::into).collect()
    }

    /// Look up one owner by id.
    pub fn get_owner(&self, id: String) -> Option<FfiOwner> {
        self.clinic.owners().get_by_id(&id).map(Into::into)
    }

    /// Whether an owner with this id is registered.
    pub fn owner_exists(&self, id: String) -> bool {
        self.clinic.owners().exists(&id)
    }

    /// Current staff roster.
    pub fn list_veterinarians(&self) -> Vec<FfiVeterinarian> {
        self.clinic
            .veterinarians()
            .snapshot()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Look up one veterinarian by id.
    pub fn get_veterinarian(&self, id: u32) -> Option<FfiVeterinarian> {
        self.clinic.veterinarians().get_by_id(id).map(Into::into)
    }

    /// Staff practicing one specialty.
    pub fn veterinarians_by_specialty(&self, specialty: Specialty) -> Vec<FfiVeterinarian> {
        self.clinic
            .veterinarians()
            .get_by_specialty(specialty)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Current consultation history.
    pub fn list_consultations(&self) -> Vec<FfiConsultation> {
        self.clinic
            .consultations()
            .snapshot()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Look up one consultation by id.
    pub fn get_consultation(&self, id: u32) -> Option<FfiConsultation> {
        self.clinic.consultations().get_by_id(id).map(Into::into)
    }

    /// Consultations of one pet.
    pub fn consultations_by_pet(&self, pet_id: u32) -> Vec<FfiConsultation> {
        self.clinic
            .consultations()
            .get_by_pet(pet_id)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Consultations of one owner.
    pub fn consultations_by_owner(&self, owner_id: String) -> Vec<FfiConsultation> {
        self.clinic
            .consultations()
            .get_by_owner(&owner_id)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Dashboard counts over the current snapshots.
    pub fn clinic_summary(&self) -> FfiClinicSummary {
        clinic_summary(&self.clinic).into()
    }

    /// Consultations joined with their pets, ready for display.
    pub fn consultation_details(&self) -> Vec<FfiConsultationDetail> {
        consultation_details(self.clinic.consultations(), self.clinic.pets())
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Monotonic change counter; poll it to detect that any collection
    /// changed since a remembered value.
    pub fn revision(&self) -> u64 {
        self.clinic.revision()
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl VetClinicCore {
    // =========================================================================
    // Mutations (simulated latency)
    // =========================================================================

    /// Store a new pet; the returned record carries the assigned id.
    pub async fn add_pet(&self, pet: FfiPet) -> Result<FfiPet, VetClinicError> {
        let stored = self.clinic.pets().add(pet.into()).await?;
        Ok(stored.into())
    }

    /// Replace the pet with the matching id.
    pub async fn update_pet(&self, pet: FfiPet) -> Result<FfiPet, VetClinicError> {
        let stored = self.clinic.pets().update(pet.into()).await?;
        Ok(stored.into())
    }

    /// Remove the pet with the given id, if present.
    pub async fn delete_pet(&self, id: u32) -> Result<(), VetClinicError> {
        self.clinic.pets().delete(id).await?;
        Ok(())
    }

    /// Register a new owner; fails when the id is already taken.
    pub async fn add_owner(&self, owner: FfiOwner) -> Result<FfiOwner, VetClinicError> {
        let stored = self.clinic.owners().add(owner.into()).await?;
        Ok(stored.into())
    }

    /// Replace the owner with the matching id.
    pub async fn update_owner(&self, owner: FfiOwner) -> Result<FfiOwner, VetClinicError> {
        let stored = self.clinic.owners().update(owner.into()).await?;
        Ok(stored.into())
    }

    /// Remove the owner with the given id, if present. Their pets are left
    /// in place.
    pub async fn delete_owner(&self, id: String) -> Result<(), VetClinicError> {
        self.clinic.owners().delete(&id).await?;
        Ok(())
    }

    /// Store a new veterinarian; the returned record carries the assigned id.
    pub async fn add_veterinarian(
        &self,
        veterinarian: FfiVeterinarian,
    ) -> Result<FfiVeterinarian, VetClinicError> {
        let stored = self.clinic.veterinarians().add(veterinarian.into()).await?;
        Ok(stored.into())
    }

    /// Replace the veterinarian with the matching id.
    pub async fn update_veterinarian(
        &self,
        veterinarian: FfiVeterinarian,
    ) -> Result<FfiVeterinarian, VetClinicError> {
        let stored = self.clinic.veterinarians().update(veterinarian.into()).await?;
        Ok(stored.into())
    }

    /// Remove the veterinarian with the given id, if present.
    pub async fn delete_veterinarian(&self, id: u32) -> Result<(), VetClinicError> {
        self.clinic.veterinarians().delete(id).await?;
        Ok(())
    }

    /// Store a new consultation; the returned record carries the assigned id.
    pub async fn add_consultation(
        &self,
        consultation: FfiConsultation,
    ) -> Result<FfiConsultation, VetClinicError> {
        let consultation: Consultation = consultation.try_into()?;
        let stored = self.clinic.consultations().add(consultation).await?;
        Ok(stored.into())
    }

    /// Replace the consultation with the matching id.
    pub async fn update_consultation(
        &self,
        consultation: FfiConsultation,
    ) -> Result<FfiConsultation, VetClinicError> {
        let consultation: Consultation = consultation.try_into()?;
        let stored = self.clinic.consultations().update(consultation).await?;
        Ok(stored.into())
    }

    /// Remove the consultation with the given id, if present.
    pub async fn delete_consultation(&self, id: u32) -> Result<(), VetClinicError> {
        self.clinic.consultations().delete(id).await?;
        Ok(())
    }
}

// =========================================================================
// Validation helpers (exported to FFI)
// =========================================================================

/// Advisory form validation; repositories accept whatever they are given.
#[uniffi::export]
pub fn validate_pet(pet: FfiPet) -> bool {
    Pet::from(pet).is_valid()
}

#[uniffi::export]
pub fn validate_owner(owner: FfiOwner) -> bool {
    Owner::from(owner).is_valid()
}

#[uniffi::export]
pub fn validate_veterinarian(veterinarian: FfiVeterinarian) -> bool {
    Veterinarian::from(veterinarian).is_valid()
}

/// A consultation with an unparseable date is invalid.
#[uniffi::export]
pub fn validate_consultation(consultation: FfiConsultation) -> bool {
    match Consultation::try_from(consultation) {
        Ok(consultation) => consultation.is_valid(),
        Err(_) => false,
    }
}

/// Display name with the professional title prefixed.
#[uniffi::export]
pub fn veterinarian_title(veterinarian: FfiVeterinarian) -> String {
    Veterinarian::from(veterinarian).professional_title()
}

/// Body-condition class for the pet's recorded weight.
#[uniffi::export]
pub fn pet_body_condition(pet: FfiPet) -> BodyCondition {
    Pet::from(pet).body_condition()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPet {
    pub id: u32,
    pub owner_id: String,
    pub name: String,
    pub species: Species,
    pub age: u32,
    pub weight_kg: f64,
    pub breed: Option<String>,
}

impl From<Pet> for FfiPet {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            owner_id: pet.owner_id,
            name: pet.name,
            species: pet.species,
            age: pet.age,
            weight_kg: pet.weight_kg,
            breed: pet.breed,
        }
    }
}

impl From<FfiPet> for Pet {
    fn from(pet: FfiPet) -> Self {
        Pet {
            id: pet.id,
            owner_id: pet.owner_id,
            name: pet.name,
            species: pet.species,
            age: pet.age,
            weight_kg: pet.weight_kg,
            breed: pet.breed,
        }
    }
}

/// FFI-safe owner.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOwner {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<Owner> for FfiOwner {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            phone: owner.phone,
            email: owner.email,
        }
    }
}

impl From<FfiOwner> for Owner {
    fn from(owner: FfiOwner) -> Self {
        Owner {
            id: owner.id,
            name: owner.name,
            phone: owner.phone,
            email: owner.email,
        }
    }
}

/// FFI-safe veterinarian.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVeterinarian {
    pub id: u32,
    pub name: String,
    pub specialty: Specialty,
}

impl From<Veterinarian> for FfiVeterinarian {
    fn from(vet: Veterinarian) -> Self {
        Self {
            id: vet.id,
            name: vet.name,
            specialty: vet.specialty,
        }
    }
}

impl From<FfiVeterinarian> for Veterinarian {
    fn from(vet: FfiVeterinarian) -> Self {
        Veterinarian {
            id: vet.id,
            name: vet.name,
            specialty: vet.specialty,
        }
    }
}

/// FFI-safe consultation. The date crosses the boundary as an ISO-8601
/// string (`YYYY-MM-DD`).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConsultation {
    pub id: u32,
    pub pet_id: u32,
    pub owner_id: String,
    pub description: String,
    pub base_cost: f64,
    pub date: String,
}

impl From<Consultation> for FfiConsultation {
    fn from(consultation: Consultation) -> Self {
        Self {
            id: consultation.id,
            pet_id: consultation.pet_id,
            owner_id: consultation.owner_id,
            description: consultation.description,
            base_cost: consultation.base_cost,
            date: consultation.date.to_string(),
        }
    }
}

impl TryFrom<FfiConsultation> for Consultation {
    type Error = VetClinicError;

    fn try_from(consultation: FfiConsultation) -> Result<Self, Self::Error> {
        let date: NaiveDate = consultation
            .date
            .parse()
            .map_err(|_| VetClinicError::InvalidInput(format!("bad date: {}", consultation.date)))?;

        Ok(Consultation {
            id: consultation.id,
            pet_id: consultation.pet_id,
            owner_id: consultation.owner_id,
            description: consultation.description,
            base_cost: consultation.base_cost,
            date,
        })
    }
}

/// FFI-safe dashboard summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicSummary {
    pub total_pets: u32,
    pub total_owners: u32,
    pub total_consultations: u32,
    pub total_veterinarians: u32,
}

impl From<ClinicSummary> for FfiClinicSummary {
    fn from(summary: ClinicSummary) -> Self {
        Self {
            total_pets: summary.total_pets as u32,
            total_owners: summary.total_owners as u32,
            total_consultations: summary.total_consultations as u32,
            total_veterinarians: summary.total_veterinarians as u32,
        }
    }
}

/// FFI-safe consultation detail row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConsultationDetail {
    pub consultation: FfiConsultation,
    pub pet_name: String,
    pub senior_pet: bool,
    pub final_cost: f64,
    pub category: ConsultationCategory,
}

impl From<ConsultationDetail> for FfiConsultationDetail {
    fn from(detail: ConsultationDetail) -> Self {
        Self {
            consultation: detail.consultation.into(),
            pet_name: detail.pet_name,
            senior_pet: detail.senior_pet,
            final_cost: detail.final_cost,
            category: detail.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultation_date_roundtrip() {
        let consultation = Consultation::new(
            1,
            "1-1".into(),
            "Control de rutina".into(),
            20_000.0,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        );

        let ffi: FfiConsultation = consultation.clone().into();
        assert_eq!(ffi.date, "2024-03-10");

        let back: Consultation = ffi.try_into().unwrap();
        assert_eq!(back, consultation);
    }

    #[test]
    fn test_bad_date_rejected() {
        let ffi = FfiConsultation {
            id: 0,
            pet_id: 1,
            owner_id: "1-1".into(),
            description: "Control de rutina".into(),
            base_cost: 20_000.0,
            date: "10/03/2024".into(),
        };

        assert!(Consultation::try_from(ffi.clone()).is_err());
        assert!(!validate_consultation(ffi));
    }

    #[tokio::test]
    async fn test_core_object_mutations() {
        let core = VetClinicCore {
            clinic: Arc::new(VetClinic::new(std::time::Duration::ZERO)),
        };

        let stored = core
            .add_pet(FfiPet {
                id: 0,
                owner_id: "1-1".into(),
                name: "Firulais".into(),
                species: Species::Dog,
                age: 5,
                weight_kg: 12.5,
                breed: None,
            })
            .await
            .unwrap();

        assert_eq!(stored.id, 1);
        assert_eq!(core.list_pets().len(), 1);
        assert_eq!(core.revision(), 1);
        assert_eq!(core.clinic().pets().snapshot().len(), 1);
    }
}
