//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum router, handlers)
//!     → cache-aside → aggregator → upstream layer
//!     → response.rs (failure taxonomy → status + detail body)
//! ```

pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::{AppState, GatewayServer};
