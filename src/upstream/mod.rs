//! Upstream access subsystem.
//!
//! # Data Flow
//! ```text
//! aggregator
//!     → pets.rs / history.rs / applications.rs (endpoint knowledge)
//!     → http.rs (GET + outcome classification)
//!     → resilience (invoker → circuit breaker)
//!     → reqwest (fixed per-call timeout)
//! ```

pub mod applications;
pub mod history;
pub mod http;
pub mod pets;

pub use applications::ApplicationRegistry;
pub use history::HistoryArchive;
pub use http::UpstreamCore;
pub use pets::PetRegistry;
