//! Storage backend implementations.
//!
//! Concrete implementations of `resourcery_core::storage::ResourceStore`,
//! selected at compile time via feature flags, plus the cached repository
//! decorator that layers the cache protocol over whichever backend is
//! active.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMap-backed store for tests and local dev
//! - `postgres`: Postgres via sqlx
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "postgres"))]
compile_error!(
    "Features 'inmemory' and 'postgres' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "postgres")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'postgres' feature. \
    Example: cargo build -p resourcery --features inmemory"
);

pub mod cached;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use cached::CachedResourceStore;

#[cfg(feature = "inmemory")]
#[allow(unused_imports)]
pub use inmemory::InMemoryStore;

#[cfg(feature = "postgres")]
#[allow(unused_imports)]
pub use postgres::PostgresStore;
