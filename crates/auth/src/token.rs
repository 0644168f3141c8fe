use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::{AuthConfig, AuthError};

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// The two token roles issued by this service.
///
/// Access tokens gate mutating routes; refresh tokens may only be exchanged
/// for a new pair and are rejected everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Signed claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user this token was issued for.
    pub sub: String,
    pub token_type: TokenType,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// An access/refresh token pair as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token past its exp is expired, full stop.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: Duration::seconds(config.access_ttl_seconds as i64),
            refresh_ttl: Duration::seconds(config.refresh_ttl_seconds as i64),
        }
    }

    /// Issues a fresh access/refresh pair for the given user id.
    pub fn issue_pair(&self, user_id: &str) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenType::Access, self.access_ttl)?,
            refresh_token: self.issue(user_id, TokenType::Refresh, self.refresh_ttl)?,
        })
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// Rejects anything that is not a refresh token, so a leaked access
    /// token cannot be used to mint new credentials.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let claims = self.decode(refresh_token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::WrongTokenType("refresh"));
        }
        self.issue_pair(&claims.sub)
    }

    /// Decodes and verifies a token, then requires it to be an access token.
    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AuthError::WrongTokenType("access"));
        }
        Ok(claims)
    }

    /// Decodes and verifies signature and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken(err.to_string()),
            })
    }

    fn issue(&self, user_id: &str, token_type: TokenType, ttl: Duration) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))
    }
}
