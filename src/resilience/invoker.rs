//! Bounded-retry wrapper around breaker-gated upstream calls.
//!
//! # Responsibilities
//! - Run every attempt through the route's circuit breaker
//! - Sleep a linearly increasing interval between attempts
//! - Propagate the last observed failure once the budget is spent
//!
//! # Design Decisions
//! - A breaker rejection counts as a failed attempt and is retried like
//!   any other failure; against a fully-open breaker the loop spends its
//!   whole budget paying only the gating check
//! - NotFound is deterministic and returns immediately; retrying a 404
//!   cannot change the outcome
//! - The backoff sleep suspends only the retrying task

use std::future::Future;
use std::time::Duration;

use crate::error::UpstreamError;
use crate::observability::metrics;
use crate::resilience::backoff::linear_backoff;
use crate::resilience::circuit_breaker::CircuitBreaker;

/// Retry policy applied to every upstream call.
#[derive(Debug, Clone, Copy)]
pub struct Invoker {
    attempts: u32,
    backoff_base: Duration,
}

impl Invoker {
    /// `attempts` is clamped to a minimum of 1.
    pub fn new(attempts: u32, backoff_base: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff_base,
        }
    }

    /// Invoke `op` through `breaker`, retrying up to the attempt budget.
    pub async fn invoke<T, F, Fut>(
        &self,
        breaker: &CircuitBreaker,
        mut op: F,
    ) -> Result<T, UpstreamError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let route = breaker.route();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match breaker.call(&mut op).await {
                Ok(value) => {
                    metrics::record_upstream_attempt(route, "ok");
                    return Ok(value);
                }
                Err(err @ UpstreamError::NotFound { .. }) => {
                    metrics::record_upstream_attempt(route, "not_found");
                    return Err(err);
                }
                Err(err) if attempt >= self.attempts => {
                    metrics::record_upstream_attempt(route, "error");
                    tracing::warn!(route, attempt, error = %err, "upstream call failed, budget exhausted");
                    return Err(err);
                }
                Err(err) => {
                    metrics::record_upstream_attempt(route, "error");
                    let delay = linear_backoff(attempt, self.backoff_base);
                    tracing::debug!(
                        route,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "upstream call failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
