//! JWT bearer authentication for the resourcery service.
//!
//! Issues short-lived access tokens paired with longer-lived refresh tokens
//! (HS256), and provides the axum pieces that protect mutating routes: a
//! `require_auth` middleware applied at route-registration time and an
//! `AuthenticatedUser` extractor for handlers that need the claims.

mod config;
mod error;
mod extract;
mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extract::{require_auth, AuthenticatedUser};
pub use token::{Claims, TokenPair, TokenService, TokenType};
