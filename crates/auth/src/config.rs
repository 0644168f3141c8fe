use std::env;

/// Token signing configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in seconds (default: 300).
    pub access_ttl_seconds: u64,
    /// Refresh token lifetime in seconds (default: 2100).
    pub refresh_ttl_seconds: u64,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `JWT_SECRET` - signing secret (default: "SECRET"; override in production)
    /// - `ACCESS_TOKEN_TTL_SECONDS` - access token lifetime (default: 300)
    /// - `REFRESH_TOKEN_TTL_SECONDS` - refresh token lifetime (default: 2100)
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| "SECRET".to_string()),
            access_ttl_seconds: env::var("ACCESS_TOKEN_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            refresh_ttl_seconds: env::var("REFRESH_TOKEN_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2_100),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        env::remove_var("JWT_SECRET");
        env::remove_var("ACCESS_TOKEN_TTL_SECONDS");
        env::remove_var("REFRESH_TOKEN_TTL_SECONDS");

        let config = AuthConfig::from_env();

        assert_eq!(config.secret, "SECRET");
        assert_eq!(config.access_ttl_seconds, 300);
        assert_eq!(config.refresh_ttl_seconds, 2_100);
    }
}
