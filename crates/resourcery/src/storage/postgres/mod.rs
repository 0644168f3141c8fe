//! Postgres storage backend.
//!
//! Implements `ResourceStore` with sqlx over a connection pool. The schema
//! is bootstrapped from SQL constants at startup; dedicated migration
//! tooling lives outside this service.

mod error;
mod repository;
mod schema;

pub use repository::PostgresStore;
