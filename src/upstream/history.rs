//! Medical history client.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::UpstreamError;
use crate::model::HistoryRecord;
use crate::upstream::http::UpstreamCore;

const GET_ROUTE: &str = "history.get";

/// Client for the history upstream.
#[derive(Debug, Clone)]
pub struct HistoryArchive {
    core: Arc<UpstreamCore>,
    base: String,
}

impl HistoryArchive {
    pub fn new(core: Arc<UpstreamCore>, base_url: &str) -> Self {
        Self {
            core,
            base: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// `GET /history/pet/{id}`.
    ///
    /// Many pets have no history document; the upstream's 404 comes back
    /// as `Ok(None)` rather than a failure.
    pub async fn for_pet(&self, pet_id: Uuid) -> Result<Option<HistoryRecord>, UpstreamError> {
        let url = format!("{}/history/pet/{}", self.base, pet_id);
        self.core.get_json_opt(GET_ROUTE, &url, &[]).await
    }
}
