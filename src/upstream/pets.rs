//! Pet registry client.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::UpstreamError;
use crate::model::{AdoptionState, Pet};
use crate::upstream::http::UpstreamCore;

const GET_ROUTE: &str = "pets.get";
const LIST_ROUTE: &str = "pets.list";

/// Client for the pet registry upstream.
#[derive(Debug, Clone)]
pub struct PetRegistry {
    core: Arc<UpstreamCore>,
    base: String,
}

impl PetRegistry {
    pub fn new(core: Arc<UpstreamCore>, base_url: &str) -> Self {
        Self {
            core,
            base: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// `GET /pets/{id}`: the mandatory anchor of the composite profile.
    pub async fn pet(&self, pet_id: Uuid) -> Result<Pet, UpstreamError> {
        let url = format!("{}/pets/{}", self.base, pet_id);
        self.core.get_json(GET_ROUTE, &url, &[]).await
    }

    /// `GET /pets?state=&from=&to=`: filtered listing, possibly empty.
    pub async fn list(
        &self,
        state: Option<AdoptionState>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Pet>, UpstreamError> {
        let url = format!("{}/pets", self.base);
        let mut query = Vec::new();
        if let Some(state) = state {
            query.push(("state", state.to_string()));
        }
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        self.core.get_json(LIST_ROUTE, &url, &query).await
    }
}
