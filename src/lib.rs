//! Backend-for-frontend gateway for the pet-adoption platform.
//!
//! Aggregates three backend services (pet registry, adoption
//! applications, medical history) into a single composite profile,
//! shielding callers from upstream instability.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │                   GATEWAY                     │
//!   Client        │  ┌──────┐   ┌───────┐   ┌────────────┐        │
//!   ──────────────┼─▶│ http │──▶│ cache │──▶│ aggregator │        │
//!                 │  └──────┘   │ aside │   └─────┬──────┘        │
//!                 │             └───────┘         │ fan-out       │
//!                 │                               ▼               │
//!                 │                        ┌────────────┐         │    pets
//!                 │                        │  upstream  │─────────┼──▶ applications
//!                 │                        │  clients   │         │    history
//!                 │                        └─────┬──────┘         │
//!                 │                              │                │
//!                 │                        ┌─────▼──────┐         │
//!                 │                        │ resilience │         │
//!                 │                        │ retry + cb │         │
//!                 │                        └────────────┘         │
//!                 │   config · lifecycle · observability          │
//!                 └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod aggregator;
pub mod cache;
pub mod error;
pub mod http;
pub mod model;
pub mod resilience;
pub mod upstream;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use error::UpstreamError;
pub use http::{AppState, GatewayServer};
pub use lifecycle::Shutdown;
