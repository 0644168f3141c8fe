//! Axum integration: bearer-token middleware and extractor.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{AuthError, Claims, TokenService};

/// Route-layer middleware that rejects requests without a valid access token.
///
/// Applied at route-registration time to the mutating routes. On success the
/// verified claims are inserted as a request extension so handlers can pick
/// them up through [`AuthenticatedUser`] without re-verifying the token.
pub async fn require_auth(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = claims_from_headers(request.headers(), &tokens)?;
    tracing::debug!(user_id = %claims.sub, "authenticated request");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extractor for the verified claims of the calling user. Returns 401/400 if
/// the request carries no valid access token.
pub struct AuthenticatedUser(pub Claims);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Claims injected by `require_auth` take precedence.
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthenticatedUser(claims.clone()));
        }

        let tokens = TokenService::from_ref(state);
        let claims = claims_from_headers(&parts.headers, &tokens)?;
        Ok(AuthenticatedUser(claims))
    }
}

fn claims_from_headers(headers: &HeaderMap, tokens: &TokenService) -> Result<Claims, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| AuthError::MissingToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;
    tokens.verify_access(token)
}
