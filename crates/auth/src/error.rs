use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Auth errors for the resourcery_auth crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authentication token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("token invalid. {0} token required")]
    WrongTokenType(&'static str),
}

impl AuthError {
    /// Error kind name used in the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Unauthorized",
            AuthError::InvalidToken(_) => "OperationError",
            AuthError::ExpiredToken => "ExpiredTokenError",
            AuthError::WrongTokenType(_) => "ValidationError",
        }
    }

    /// HTTP status for this error.
    ///
    /// An absent bearer is 401; a present-but-bad token is a 400, matching
    /// the operation/validation error family.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken(_)
            | AuthError::ExpiredToken
            | AuthError::WrongTokenType(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (self.status_code(), body).into_response()
    }
}
