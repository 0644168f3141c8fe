//! Pure functions for mapping repository errors to the HTTP boundary.
//!
//! Keeping the mapping here lets the handler layer stay a thin wrapper and
//! keeps status-code decisions testable without a running server.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

/// Maps a [`RepositoryError`] to the error kind name used in response bodies.
///
/// Absence is the only condition with its own kind; everything else is an
/// operation failure from the caller's point of view.
pub fn repository_error_kind(error: &RepositoryError) -> &'static str {
    match error {
        RepositoryError::NotFound { .. } => "NotFoundError",
        _ => "OperationError",
    }
}
