//! Upstream failure taxonomy.
//!
//! Every failure carries the route label of the dependency that produced
//! it, so callers and metrics can tell "the upstream is down" apart from
//! "we stopped asking" (circuit open) and from plain absence.

use thiserror::Error;

/// A failed interaction with one of the backend services.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Network error, timeout, or non-success status after exhausting retries.
    #[error("{route}: upstream unavailable: {reason}")]
    Unavailable { route: &'static str, reason: String },

    /// The circuit breaker for this route is open; the upstream was not called.
    #[error("{route}: circuit open")]
    CircuitOpen { route: &'static str },

    /// The upstream explicitly reported the resource as absent.
    #[error("{route}: resource not found")]
    NotFound { route: &'static str },

    /// The upstream answered, but the payload failed shape validation.
    #[error("{route}: malformed response: {reason}")]
    Malformed { route: &'static str, reason: String },
}

impl UpstreamError {
    /// The breaker route this failure originated from.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Unavailable { route, .. }
            | Self::CircuitOpen { route }
            | Self::NotFound { route }
            | Self::Malformed { route, .. } => route,
        }
    }
}
