use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use resourcery_auth::AuthError;
use resourcery_core::resource::ValidationError;
use resourcery_core::storage::{
    repository_error_kind, repository_error_to_status_code, PageError, RepositoryError,
};

/// Application error type that wraps `anyhow::Error`.
///
/// This allows using `?` on functions that return domain errors and have
/// them automatically converted into the JSON error envelope:
///
/// ```json
/// { "error": "NotFoundError", "message": "Resource not found: ..." }
/// ```
pub struct ApiError(pub anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, repository_error_kind(repo_error))
        } else if self.0.downcast_ref::<ValidationError>().is_some()
            || self.0.downcast_ref::<PageError>().is_some()
        {
            (StatusCode::BAD_REQUEST, "ValidationError")
        } else if let Some(auth_error) = self.0.downcast_ref::<AuthError>() {
            (auth_error.status_code(), auth_error.kind())
        } else {
            tracing::error!(error = %self.0, "Unhandled application error");
            (StatusCode::INTERNAL_SERVER_ERROR, "InternalServerError")
        };

        let body = Json(json!({
            "error": kind,
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = ApiError(RepositoryError::not_found("Resource", "abc").into());
        assert_eq!(status_of(error), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let error = ApiError(ValidationError::EmptyField("title").into());
        assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn page_error_maps_to_400() {
        let error = ApiError(PageError::InvalidPage.into());
        assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_token_maps_to_401() {
        let error = ApiError(AuthError::MissingToken.into());
        assert_eq!(status_of(error), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn query_failure_maps_to_500() {
        let error = ApiError(RepositoryError::QueryFailed("boom".to_string()).into());
        assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unknown_error_maps_to_500() {
        let error = ApiError(anyhow::anyhow!("something else"));
        assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
