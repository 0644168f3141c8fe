//! Postgres error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `resourcery_core::storage`.
//! Specific errors are mapped to semantic variants (e.g., unique violation
//! to AlreadyExists).

use resourcery_core::storage::RepositoryError;

/// Postgres SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign key constraint violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - unique / primary key violation → `RepositoryError::AlreadyExists`
/// - foreign key violation → `RepositoryError::InvalidData`
/// - row not found → `RepositoryError::NotFound`
/// - pool/IO errors → `RepositoryError::ConnectionFailed`
/// - row decode errors → `RepositoryError::Serialization`
/// - all other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    map_sqlx_error_with_id(err, entity_type, "unknown")
}

/// Maps a sqlx error with a known ID to a RepositoryError.
///
/// Use this variant when the entity ID is known at the call site.
pub fn map_sqlx_error_with_id(
    err: sqlx::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let id = id.into();
    match &err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound { entity_type, id },

        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => RepositoryError::AlreadyExists { entity_type, id },
            Some(FOREIGN_KEY_VIOLATION) => RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            )),
            _ => RepositoryError::QueryFailed(db_err.to_string()),
        },

        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(err.to_string())
        }

        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let result = map_sqlx_error_with_id(sqlx::Error::RowNotFound, "Resource", "abc-123");

        assert_eq!(
            result,
            RepositoryError::NotFound {
                entity_type: "Resource",
                id: "abc-123".to_string(),
            }
        );
    }

    #[test]
    fn test_pool_timeout_maps_to_connection_failed() {
        let result = map_sqlx_error(sqlx::Error::PoolTimedOut, "Resource");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_pool_closed_maps_to_connection_failed() {
        let result = map_sqlx_error(sqlx::Error::PoolClosed, "Resource");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_worker_crashed_maps_to_query_failed() {
        let result = map_sqlx_error(sqlx::Error::WorkerCrashed, "Resource");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
