use std::{env, time::Duration};

use resourcery_auth::AuthConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection URL (default: "postgres://localhost:5432/resourcery")
    /// Note: Only used when the `postgres` feature is enabled.
    #[allow(dead_code)]
    pub database_url: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Page size when the caller supplies none (default: 10)
    pub default_per_page: u32,
    /// Token signing configuration.
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - Postgres connection URL
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `DEFAULT_PER_PAGE` - Default page size (default: 10)
    ///
    /// plus the `JWT_SECRET` / `*_TOKEN_TTL_SECONDS` variables read by
    /// [`AuthConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/resourcery".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            default_per_page: env::var("DEFAULT_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            auth: AuthConfig::from_env(),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_ttl_conversion() {
        let config = Config {
            database_url: "postgres://localhost:5432/test".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            cache_ttl_seconds: 600,
            cache_max_entries: 10_000,
            default_per_page: 10,
            auth: AuthConfig {
                secret: "test-secret".to_string(),
                access_ttl_seconds: 300,
                refresh_ttl_seconds: 2_100,
            },
        };

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_default_values() {
        env::remove_var("DATABASE_URL");
        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("DEFAULT_PER_PAGE");

        let config = Config::from_env();

        assert_eq!(config.cache_ttl_seconds, 300);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.default_per_page, 10);
        assert_eq!(config.redis_url, "redis://localhost:6379");
    }
}
