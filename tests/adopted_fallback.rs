//! Adopted-pet listing and its cross-registry fallback.

use serde_json::json;
use uuid::Uuid;

mod common;

fn adopted_url(gateway: &common::TestGateway) -> String {
    format!("{}/adoptadas", gateway.base_url)
}

#[tokio::test]
async fn adopted_comes_from_the_pet_registry_when_available() {
    let pet_id = Uuid::new_v4();

    let pets = common::start_upstream(move |path, query| {
        if path == "/pets" && query.get("state").map(String::as_str) == Some("adopted") {
            (200, json!([common::adopted_pet_json(pet_id)]))
        } else {
            common::not_found()
        }
    })
    .await;
    let applications = common::start_upstream(|_, _| common::not_found()).await;
    let history = common::start_upstream(|_, _| common::not_found()).await;

    let gateway = common::start_gateway(common::test_config(&pets, &applications, &history)).await;

    let response = reqwest::get(adopted_url(&gateway)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["results"][0]["id"], json!(pet_id));
    // The application registry was never consulted.
    assert_eq!(applications.hit_count(), 0);
}

#[tokio::test]
async fn failed_listing_falls_back_to_approved_requests() {
    let pet_id = Uuid::new_v4();

    let pets = common::start_upstream(move |path, _| {
        if path == format!("/pets/{pet_id}") {
            (200, common::pet_json(pet_id))
        } else {
            // The adopted-state listing is down.
            (500, json!({"detail": "boom"}))
        }
    })
    .await;
    let applications = common::start_upstream(move |path, query| {
        if path == "/requests" && query.get("status").map(String::as_str) == Some("approved") {
            (200, json!([common::application_json(pet_id, "approved")]))
        } else {
            common::not_found()
        }
    })
    .await;
    let history = common::start_upstream(|_, _| common::not_found()).await;

    let gateway = common::start_gateway(common::test_config(&pets, &applications, &history)).await;

    let response = reqwest::get(adopted_url(&gateway)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["results"][0]["id"], json!(pet_id));
}

#[tokio::test]
async fn duplicate_approvals_resolve_to_one_pet() {
    let pet_id = Uuid::new_v4();

    let pets = common::start_upstream(move |path, _| {
        if path == format!("/pets/{pet_id}") {
            (200, common::pet_json(pet_id))
        } else {
            (200, json!([]))
        }
    })
    .await;
    let applications = common::start_upstream(move |path, _| {
        if path == "/requests" {
            (
                200,
                json!([
                    common::application_json(pet_id, "approved"),
                    common::application_json(pet_id, "approved"),
                ]),
            )
        } else {
            common::not_found()
        }
    })
    .await;
    let history = common::start_upstream(|_, _| common::not_found()).await;

    let gateway = common::start_gateway(common::test_config(&pets, &applications, &history)).await;

    let response = reqwest::get(adopted_url(&gateway)).await.unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], json!(1));
}

#[tokio::test]
async fn unresolvable_pets_are_skipped_silently() {
    let good = Uuid::new_v4();
    let gone = Uuid::new_v4();

    let pets = common::start_upstream(move |path, _| {
        if path == format!("/pets/{good}") {
            (200, common::pet_json(good))
        } else if path == "/pets" {
            (200, json!([]))
        } else {
            common::not_found()
        }
    })
    .await;
    let applications = common::start_upstream(move |path, _| {
        if path == "/requests" {
            (
                200,
                json!([
                    common::application_json(gone, "approved"),
                    common::application_json(good, "approved"),
                ]),
            )
        } else {
            common::not_found()
        }
    })
    .await;
    let history = common::start_upstream(|_, _| common::not_found()).await;

    let gateway = common::start_gateway(common::test_config(&pets, &applications, &history)).await;

    let response = reqwest::get(adopted_url(&gateway)).await.unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["results"][0]["id"], json!(good));
}

#[tokio::test]
async fn total_outage_returns_an_empty_listing() {
    let pets = common::start_upstream(|_, _| (500, json!({"detail": "boom"}))).await;
    let applications = common::start_upstream(|_, _| (500, json!({"detail": "boom"}))).await;
    let history = common::start_upstream(|_, _| common::not_found()).await;

    let gateway = common::start_gateway(common::test_config(&pets, &applications, &history)).await;

    let response = reqwest::get(adopted_url(&gateway)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], json!(0));
    assert_eq!(body["results"], json!([]));
}
