//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Build the Axum router with all gateway endpoints
//! - Wire up middleware (tracing, inbound timeout)
//! - Construct the dependency graph from configuration
//! - Serve with graceful shutdown

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::aggregator::Aggregator;
use crate::cache::{CacheAside, MemoryStore};
use crate::config::GatewayConfig;
use crate::http::response::ApiError;
use crate::model::{CompositeProfile, Pet};
use crate::observability::metrics;
use crate::resilience::{BreakerRegistry, Invoker};
use crate::upstream::{ApplicationRegistry, HistoryArchive, PetRegistry, UpstreamCore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub cache: CacheAside,
}

impl AppState {
    /// Construct the full dependency graph from configuration:
    /// breaker registry → invoker → upstream clients → aggregator →
    /// cache-aside layer.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.upstream_secs))
            .build()?;
        let breakers = BreakerRegistry::new(
            config.breaker.fail_max,
            Duration::from_secs(config.breaker.reset_timeout_secs),
        );
        let invoker = Invoker::new(
            config.retry.attempts,
            Duration::from_millis(config.retry.backoff_base_ms),
        );
        let core = Arc::new(UpstreamCore::new(client, invoker, breakers));

        let aggregator = Arc::new(Aggregator::new(
            PetRegistry::new(core.clone(), &config.upstreams.pets_url),
            HistoryArchive::new(core.clone(), &config.upstreams.history_url),
            ApplicationRegistry::new(core, &config.upstreams.applications_url),
        ));
        let cache = CacheAside::new(
            Arc::new(MemoryStore::new()),
            Duration::from_secs(config.cache.ttl_secs),
        );

        Ok(Self { aggregator, cache })
    }
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    pub fn new(config: &GatewayConfig, state: AppState) -> Self {
        let router = Router::new()
            .route("/mascotas/{pet_id}/perfil_completo", get(pet_profile))
            .route("/adoptadas", get(adopted_pets))
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Serve until the shutdown signal fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "gateway listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("gateway stopped");
        Ok(())
    }
}

fn profile_cache_key(pet_id: Uuid) -> String {
    format!("perfil:mascota:{pet_id}")
}

/// Composite profile for one pet, served cache-aside.
async fn pet_profile(
    State(state): State<AppState>,
    Path(pet_id): Path<Uuid>,
) -> Result<Json<CompositeProfile>, ApiError> {
    let key = profile_cache_key(pet_id);
    let aggregator = state.aggregator.clone();
    let result = state
        .cache
        .get_or_build(&key, || async move { aggregator.build_profile(pet_id).await })
        .await;

    match result {
        Ok(profile) => {
            metrics::record_request("perfil_completo", 200);
            Ok(Json(profile))
        }
        Err(err) => {
            let err = ApiError::from(err);
            metrics::record_request("perfil_completo", err.status().as_u16());
            tracing::warn!(%pet_id, detail = %err.0, "composite build failed");
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdoptedQuery {
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct AdoptedResponse {
    count: usize,
    results: Vec<Pet>,
}

/// Adopted pets, best effort; never errors on upstream failure.
async fn adopted_pets(
    State(state): State<AppState>,
    Query(range): Query<AdoptedQuery>,
) -> Json<AdoptedResponse> {
    let results = state
        .aggregator
        .list_adopted(range.from_date, range.to_date)
        .await;
    metrics::record_request("adoptadas", 200);
    Json(AdoptedResponse {
        count: results.len(),
        results,
    })
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}
