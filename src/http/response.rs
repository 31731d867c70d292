//! Error-to-response mapping.
//!
//! # Design Decisions
//! - NotFound surfaces as 404; every other upstream failure as 502
//! - The `detail` body names the failing dependency but carries no
//!   retry guidance; retries already happened inside the gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::UpstreamError;

/// An upstream failure on its way out to a gateway caller.
#[derive(Debug)]
pub struct ApiError(pub UpstreamError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            UpstreamError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.0.to_string() }));
        (status, body).into_response()
    }
}
