//! Token issuance handlers.
//!
//! Tokens are issued for an anonymous, freshly generated user id; user
//! accounts live in a separate authentication service that this backend
//! does not manage.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use resourcery_auth::TokenPair;

use crate::{handlers::ApiError, state::AppState};

/// Query parameters for refreshing a token pair.
#[derive(Debug, Deserialize)]
pub struct RefreshTokenQuery {
    pub refresh_token: String,
}

/// Issue a fresh access/refresh pair (GET /api/v1/tokens).
pub async fn issue_tokens(State(state): State<AppState>) -> Result<Json<TokenPair>, ApiError> {
    let user_id = Uuid::new_v4().to_string();
    let pair = state.tokens.issue_pair(&user_id)?;
    Ok(Json(pair))
}

/// Exchange a refresh token for a new pair (GET /api/v1/tokens/refresh).
pub async fn refresh_tokens(
    State(state): State<AppState>,
    Query(query): Query<RefreshTokenQuery>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state.tokens.refresh(&query.refresh_token)?;
    Ok(Json(pair))
}
