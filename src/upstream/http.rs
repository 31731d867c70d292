//! Shared HTTP layer for upstream calls.
//!
//! # Responsibilities
//! - Issue the GET and classify its outcome into the failure taxonomy
//! - Route every call through the invoker and the route's breaker
//!
//! # Design Decisions
//! - 404 maps to NotFound; any other non-success status and every
//!   transport error map to Unavailable; an undecodable body maps to
//!   Malformed. A 2xx with a bad payload is a failure, not a success
//! - The reqwest client carries the fixed per-call timeout, so a slow
//!   upstream surfaces as Unavailable like any other transport error

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;
use crate::resilience::{BreakerRegistry, Invoker};

/// Query parameters for one upstream call.
pub type Query = Vec<(&'static str, String)>;

/// Breaker- and retry-aware HTTP access shared by all upstream clients.
#[derive(Debug, Clone)]
pub struct UpstreamCore {
    client: reqwest::Client,
    invoker: Invoker,
    breakers: BreakerRegistry,
}

impl UpstreamCore {
    pub fn new(client: reqwest::Client, invoker: Invoker, breakers: BreakerRegistry) -> Self {
        Self {
            client,
            invoker,
            breakers,
        }
    }

    /// GET `url` and decode the JSON body as `T`.
    pub async fn get_json<T>(
        &self,
        route: &'static str,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let breaker = self.breakers.route(route);
        self.invoker
            .invoke(&breaker, || {
                fetch_json(&self.client, route, url.to_owned(), query.to_vec())
            })
            .await
    }

    /// Like [`get_json`](Self::get_json), but a 404 is a successful
    /// determination of absence: it yields `Ok(None)` inside the guarded
    /// operation, so it neither counts against the breaker nor burns
    /// retry attempts.
    pub async fn get_json_opt<T>(
        &self,
        route: &'static str,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Option<T>, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let breaker = self.breakers.route(route);
        self.invoker
            .invoke(&breaker, || {
                let fetch = fetch_json(&self.client, route, url.to_owned(), query.to_vec());
                async move {
                    match fetch.await {
                        Err(UpstreamError::NotFound { .. }) => Ok(None),
                        other => other.map(Some),
                    }
                }
            })
            .await
    }
}

async fn fetch_json<T>(
    client: &reqwest::Client,
    route: &'static str,
    url: String,
    query: Query,
) -> Result<T, UpstreamError>
where
    T: DeserializeOwned,
{
    let response = client
        .get(&url)
        .query(&query)
        .send()
        .await
        .map_err(|err| UpstreamError::Unavailable {
            route,
            reason: err.to_string(),
        })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound { route });
    }
    if !status.is_success() {
        return Err(UpstreamError::Unavailable {
            route,
            reason: format!("status {status}"),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| UpstreamError::Malformed {
            route,
            reason: err.to_string(),
        })
}
