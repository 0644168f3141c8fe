//! In-memory storage backend.
//!
//! Keeps resources in a `Vec` behind a `tokio::sync::RwLock`, preserving
//! insertion order for deterministic listings. Used for tests and local
//! development; data is lost when the process exits.

mod repository;

pub use repository::InMemoryStore;
