//! Shared utilities for integration testing: programmable mock
//! upstreams, wire fixtures, and a gateway harness.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use adoption_gateway::config::GatewayConfig;
use adoption_gateway::http::{AppState, GatewayServer};
use adoption_gateway::lifecycle::Shutdown;

/// A programmable mock upstream with a hit counter.
pub struct MockUpstream {
    pub base_url: String,
    hits: Arc<AtomicU32>,
}

impl MockUpstream {
    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock upstream. The handler sees (path, query) and returns
/// (status, JSON body).
pub async fn start_upstream<F>(handler: F) -> MockUpstream
where
    F: Fn(&str, &HashMap<String, String>) -> (u16, Value) + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicU32::new(0));
    let handler = Arc::new(handler);
    let app = Router::new().fallback({
        let hits = hits.clone();
        move |request: Request| {
            let handler = handler.clone();
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let path = request.uri().path().to_owned();
                let query: HashMap<String, String> = request
                    .uri()
                    .query()
                    .map(|q| {
                        url::form_urlencoded::parse(q.as_bytes())
                            .into_owned()
                            .collect()
                    })
                    .unwrap_or_default();
                let (status, body) = handler(&path, &query);
                let status = StatusCode::from_u16(status).unwrap();
                (status, Json(body)).into_response()
            }
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// A running gateway instance bound to an ephemeral port.
pub struct TestGateway {
    pub base_url: String,
    // Dropping the coordinator would drain the server mid-test.
    _shutdown: Shutdown,
}

/// Test-friendly configuration: single attempt, short backoff, breaker
/// effectively disabled unless a test tightens it.
pub fn test_config(
    pets: &MockUpstream,
    applications: &MockUpstream,
    history: &MockUpstream,
) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstreams.pets_url = pets.base_url.clone();
    config.upstreams.applications_url = applications.base_url.clone();
    config.upstreams.history_url = history.base_url.clone();
    config.retry.attempts = 1;
    config.retry.backoff_base_ms = 10;
    config.breaker.fail_max = 100;
    config.breaker.reset_timeout_secs = 60;
    config.observability.metrics_enabled = false;
    config
}

pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let state = AppState::from_config(&config).unwrap();
    let server = GatewayServer::new(&config, state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestGateway {
        base_url: format!("http://{addr}"),
        _shutdown: shutdown,
    }
}

// --- Wire fixtures matching the upstream formats ---

pub fn pet_json(pet_id: Uuid) -> Value {
    json!({
        "id": pet_id,
        "name": "Fido",
        "species": "dog",
        "breed": "mixed",
        "birth_date": "2020-01-01",
        "adoption_center_id": Uuid::new_v4(),
        "image_url": null,
        "created_at": "2023-01-01T12:00:00Z",
        "adoption_status": {
            "id": Uuid::new_v4(),
            "pet_id": pet_id,
            "state": "available",
            "last_updated": "2024-01-01T12:00:00Z"
        },
        "vaccines": []
    })
}

pub fn adopted_pet_json(pet_id: Uuid) -> Value {
    json!({
        "id": pet_id,
        "name": "Luna",
        "species": "cat",
        "breed": "siamese",
        "birth_date": "2021-05-01",
        "adoption_center_id": Uuid::new_v4(),
        "adoption_status": {
            "id": Uuid::new_v4(),
            "pet_id": pet_id,
            "state": "adopted",
            "last_updated": "2024-01-01T12:00:00Z"
        },
        "vaccines": []
    })
}

pub fn history_json(pet_id: Uuid) -> Value {
    json!({
        "_id": "65f0c0ffee1dea1",
        "pet_id": pet_id,
        "history": [{"date": "2024-02-01T10:00:00Z", "event": "checkup"}],
        "images": [],
        "details": "healthy",
        "user_id": Uuid::new_v4(),
        "meta": {"weight": 12.5}
    })
}

pub fn application_json(pet_id: Uuid, status: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "userId": Uuid::new_v4(),
        "petId": pet_id,
        "requestDate": "2024-03-01T10:00:00Z",
        "status": status,
        "statusDate": "2024-03-02T10:00:00Z",
        "message": "I love this pet"
    })
}

pub fn not_found() -> (u16, Value) {
    (404, json!({"detail": "not found"}))
}
