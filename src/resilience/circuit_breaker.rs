//! Circuit breaker for upstream protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: upstream assumed down, calls fail fast
//! - Half-Open: testing if the upstream recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive failures >= fail_max
//! Open → Half-Open: after reset_timeout
//! Half-Open → Closed: trial call succeeds
//! Half-Open → Open: trial call fails (timer re-armed)
//! ```
//!
//! # Design Decisions
//! - One breaker per upstream route, not per upstream service
//! - Single trial in Half-Open (prevents hammering a recovering upstream)
//! - A half-open failure counts like any other failure
//! - State is a per-route critical section; the lock is never held
//!   across an await

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use crate::error::UpstreamError;
use crate::observability::metrics;

/// Breaker mode for one upstream route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerMode {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug)]
struct BreakerState {
    mode: BreakerMode,
    failures: u32,
    opened_at: Option<Instant>,
}

/// Circuit breaker guarding a single upstream route for the process
/// lifetime.
#[derive(Debug)]
pub struct CircuitBreaker {
    route: &'static str,
    fail_max: u32,
    reset_timeout: Duration,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(route: &'static str, fail_max: u32, reset_timeout: Duration) -> Self {
        Self {
            route,
            fail_max: fail_max.max(1),
            reset_timeout,
            state: Mutex::new(BreakerState {
                mode: BreakerMode::Closed,
                failures: 0,
                opened_at: None,
            }),
        }
    }

    /// The route label this breaker guards.
    pub fn route(&self) -> &'static str {
        self.route
    }

    /// Current mode, for tests and introspection.
    pub fn mode(&self) -> BreakerMode {
        self.lock().mode
    }

    /// Run `op` through the breaker.
    ///
    /// Returns the operation's value on success, propagates its failure
    /// after recording it, or rejects with [`UpstreamError::CircuitOpen`]
    /// without invoking `op` when gating.
    pub async fn call<T, F, Fut>(&self, op: F) -> Result<T, UpstreamError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        if !self.try_acquire() {
            return Err(UpstreamError::CircuitOpen { route: self.route });
        }

        match op().await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(err) => {
                self.record_failure();
                Err(err)
            }
        }
    }

    /// Decide whether a call may proceed, flipping Open → Half-Open once
    /// the reset timeout has elapsed.
    fn try_acquire(&self) -> bool {
        let mut state = self.lock();
        match state.mode {
            BreakerMode::Closed => true,
            // A trial is already in flight; keep failing fast.
            BreakerMode::HalfOpen => false,
            BreakerMode::Open => {
                let elapsed = state
                    .opened_at
                    .map(|at| at.elapsed())
                    .unwrap_or(Duration::MAX);
                if elapsed < self.reset_timeout {
                    false
                } else {
                    state.mode = BreakerMode::HalfOpen;
                    tracing::info!(route = self.route, "circuit half-open, allowing trial call");
                    true
                }
            }
        }
    }

    fn record_success(&self) {
        let mut state = self.lock();
        if state.mode != BreakerMode::Closed {
            tracing::info!(route = self.route, "circuit closed");
            metrics::record_breaker_transition(self.route, "closed");
        }
        state.mode = BreakerMode::Closed;
        state.failures = 0;
        state.opened_at = None;
    }

    fn record_failure(&self) {
        let mut state = self.lock();
        state.failures += 1;
        if state.mode == BreakerMode::HalfOpen || state.failures >= self.fail_max {
            state.mode = BreakerMode::Open;
            state.opened_at = Some(Instant::now());
            tracing::warn!(
                route = self.route,
                failures = state.failures,
                "circuit opened"
            );
            metrics::record_breaker_transition(self.route, "open");
        }
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registry handing out one breaker per route label.
///
/// Constructed at startup and injected into the upstream layer, so tests
/// get isolated instances instead of ambient globals.
#[derive(Debug, Clone)]
pub struct BreakerRegistry {
    fail_max: u32,
    reset_timeout: Duration,
    breakers: Arc<DashMap<&'static str, Arc<CircuitBreaker>>>,
}

impl BreakerRegistry {
    pub fn new(fail_max: u32, reset_timeout: Duration) -> Self {
        Self {
            fail_max,
            reset_timeout,
            breakers: Arc::new(DashMap::new()),
        }
    }

    /// The breaker guarding `route`, created on first use.
    pub fn route(&self, route: &'static str) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(route)
            .or_insert_with(|| {
                Arc::new(CircuitBreaker::new(route, self.fail_max, self.reset_timeout))
            })
            .clone()
    }
}
