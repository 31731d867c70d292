//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to an upstream:
//!     → invoker.rs (bounded retries, linear backoff between attempts)
//!     → circuit_breaker.rs (per-route gating, failure accounting)
//!     → actual HTTP request (upstream layer)
//! ```
//!
//! # Design Decisions
//! - Every upstream call has a fixed deadline (the client's timeout)
//! - A breaker rejection is just another failed attempt to the invoker
//! - Breakers are per route and dependency-injected, never ambient

pub mod backoff;
pub mod circuit_breaker;
pub mod invoker;

pub use circuit_breaker::{BreakerMode, BreakerRegistry, CircuitBreaker};
pub use invoker::Invoker;
