//! Composite-resource aggregation.
//!
//! # Data Flow
//! ```text
//! build_profile(pet_id):
//!     ┌─ pets.pet(id)            (mandatory; failure fails the build)
//!     ├─ history.for_pet(id)     (optional; failure degrades to null)
//!     └─ applications.for_pet(id) (optional; prober degrades to [])
//!     → join all three → CompositeProfile
//! ```
//!
//! # Design Decisions
//! - The three sub-fetches run concurrently; aggregate latency tracks
//!   the slowest sub-fetch, not the sum
//! - The pet record is the anchor of the aggregate: without it there is
//!   nothing to degrade around
//! - The adopted-pets listing is best-effort reconciliation across two
//!   systems of record; it swallows failures at every stage and prefers
//!   the pet registry's own adopted-state view

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::UpstreamError;
use crate::model::{AdoptionState, CompositeProfile, Pet};
use crate::upstream::{ApplicationRegistry, HistoryArchive, PetRegistry};

/// Fans out the per-upstream fetches and composes the results.
#[derive(Debug, Clone)]
pub struct Aggregator {
    pets: PetRegistry,
    history: HistoryArchive,
    applications: ApplicationRegistry,
}

impl Aggregator {
    pub fn new(
        pets: PetRegistry,
        history: HistoryArchive,
        applications: ApplicationRegistry,
    ) -> Self {
        Self {
            pets,
            history,
            applications,
        }
    }

    /// Build the composite profile for one pet.
    pub async fn build_profile(&self, pet_id: Uuid) -> Result<CompositeProfile, UpstreamError> {
        let (pet, history, applications) = tokio::join!(
            self.pets.pet(pet_id),
            self.history.for_pet(pet_id),
            self.applications.for_pet(pet_id),
        );

        let pet = pet?;
        let history = history.unwrap_or_else(|err| {
            tracing::warn!(%pet_id, error = %err, "history unavailable, degrading to absent");
            None
        });

        Ok(CompositeProfile {
            pet,
            history,
            applications,
        })
    }

    /// List adopted pets, optionally within a date range.
    ///
    /// Primary source is the pet registry's own adopted-state view. When
    /// that yields nothing (including on failure), reconcile against the
    /// application registry's approved requests and re-fetch each
    /// referenced pet, skipping ids that fail to resolve.
    pub async fn list_adopted(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<Pet> {
        match self.pets.list(Some(AdoptionState::Adopted), from, to).await {
            Ok(pets) if !pets.is_empty() => return pets,
            Ok(_) => {
                tracing::debug!("pet registry reports no adopted pets, trying approved requests");
            }
            Err(err) => {
                tracing::warn!(error = %err, "adopted-pet listing failed, trying approved requests");
            }
        }

        let approved = match self.applications.approved_in_range(from, to).await {
            Ok(requests) => requests,
            Err(err) => {
                tracing::warn!(error = %err, "approved-request listing failed, returning empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut pets = Vec::new();
        for pet_id in approved.into_iter().map(|request| request.pet_id) {
            if !seen.insert(pet_id) {
                continue;
            }
            match self.pets.pet(pet_id).await {
                Ok(pet) => pets.push(pet),
                Err(err) => {
                    tracing::debug!(%pet_id, error = %err, "skipping unresolvable adopted pet");
                }
            }
        }
        pets
    }
}
