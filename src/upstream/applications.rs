//! Application registry client, including the fallback prober.
//!
//! # Responsibilities
//! - Probe the ordered candidate paths for "applications for a pet"
//! - Fetch the approved-requests feed used by the adopted-pets fallback
//!
//! # Design Decisions
//! - A successful-but-empty candidate means "try the next one": an empty
//!   list from a not-yet-deployed path variant is indistinguishable from
//!   a genuinely empty list, and probing until non-empty is the chosen
//!   mitigation
//! - Exhausting every candidate yields the empty sequence, never an
//!   error
//! - A bare object response counts as a one-element list (some
//!   deployments answer that way)

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::UpstreamError;
use crate::model::ApplicationRequest;
use crate::upstream::http::UpstreamCore;

const APPROVED_ROUTE: &str = "applications.approved";

/// Candidate (path, breaker route) pairs for the by-pet resource, in
/// probe order.
const BY_PET_CANDIDATES: [(&str, &str); 3] = [
    ("applications", "applications.applications"),
    ("requests", "applications.requests"),
    ("prev-requests", "applications.prev-requests"),
];

/// Client for the application registry upstream.
#[derive(Debug, Clone)]
pub struct ApplicationRegistry {
    core: Arc<UpstreamCore>,
    base: String,
}

impl ApplicationRegistry {
    pub fn new(core: Arc<UpstreamCore>, base_url: &str) -> Self {
        Self {
            core,
            base: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Applications filed for `pet_id`, via ordered fallback probing.
    pub async fn for_pet(&self, pet_id: Uuid) -> Vec<ApplicationRequest> {
        for (path, route) in BY_PET_CANDIDATES {
            let url = format!("{}/{}", self.base, path);
            let query = [("petId", pet_id.to_string())];
            match self
                .core
                .get_json::<OneOrMany<ApplicationRequest>>(route, &url, &query)
                .await
            {
                Ok(found) => {
                    let found = found.into_vec();
                    if found.is_empty() {
                        tracing::debug!(path, %pet_id, "candidate returned no applications, trying next");
                        continue;
                    }
                    return found;
                }
                Err(err) => {
                    tracing::debug!(path, %pet_id, error = %err, "candidate failed, trying next");
                }
            }
        }
        Vec::new()
    }

    /// `GET /requests?status=approved&from=&to=`: the feed the
    /// adopted-pets fallback reconciles against.
    pub async fn approved_in_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ApplicationRequest>, UpstreamError> {
        let url = format!("{}/requests", self.base);
        let mut query = vec![("status", "approved".to_owned())];
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        self.core.get_json(APPROVED_ROUTE, &url, &query).await
    }
}

/// Accepts both `[{...}]` and a bare `{...}` payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
