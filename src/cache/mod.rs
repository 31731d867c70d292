//! Composite-profile caching subsystem.
//!
//! # Data Flow
//! ```text
//! request → aside.rs (get_or_build)
//!     hit  → store.rs (CacheStore::get) → deserialize → serve
//!     miss → aggregator build → serialize → CacheStore::set(TTL) → serve
//! ```

pub mod aside;
pub mod memory;
pub mod store;

pub use aside::CacheAside;
pub use memory::MemoryStore;
pub use store::CacheStore;
