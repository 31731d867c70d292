//! Value objects exchanged with the upstream services.
//!
//! Field names and serde attributes follow the upstream wire formats:
//! the application registry speaks camelCase, the history service labels
//! its document id `_id`, and the composite profile keeps the Spanish
//! keys (`mascota`, `historia`, `solicitudes`) that gateway callers and
//! the cache already depend on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Adoption lifecycle state as reported by the pet registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionState {
    Available,
    Adopted,
    Pending,
    Unknown,
}

impl fmt::Display for AdoptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdoptionState::Available => "available",
            AdoptionState::Adopted => "adopted",
            AdoptionState::Pending => "pending",
            AdoptionState::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Current adoption status attached to a pet record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionStatus {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub state: AdoptionState,
    pub last_updated: DateTime<Utc>,
}

/// A single administered vaccine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vaccine {
    pub id: Uuid,
    pub pet_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
}

/// A pet record from the pet registry. `id` is immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub adoption_center_id: Uuid,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub adoption_status: Option<AdoptionStatus>,
    #[serde(default)]
    pub vaccines: Vec<Vaccine>,
}

/// One entry in a pet's medical history timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub date: DateTime<Utc>,
    pub event: String,
}

/// Medical history document for a pet.
///
/// The history service may omit the whole document for a pet; absence is
/// a valid terminal state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub pet_id: Uuid,
    #[serde(default)]
    pub history: Vec<HistoryEvent>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// Adoption application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// An adoption application as served by the application registry.
///
/// The approved-requests feed is known to spell the pet reference
/// `pet_id` in some deployments, hence the alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub id: Uuid,
    #[serde(alias = "user_id")]
    pub user_id: Uuid,
    #[serde(alias = "pet_id")]
    pub pet_id: Uuid,
    pub request_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub status_date: DateTime<Utc>,
    pub message: String,
}

/// The composite view served to gateway callers.
///
/// Built fresh per request or reconstructed verbatim from the cache;
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeProfile {
    #[serde(rename = "mascota")]
    pub pet: Pet,
    #[serde(rename = "historia")]
    pub history: Option<HistoryRecord>,
    #[serde(rename = "solicitudes")]
    pub applications: Vec<ApplicationRequest>,
}
