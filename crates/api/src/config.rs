use std::time::Duration;

use arena_core::validation::cross_field::CheckSizePolicy;

/// Default minimum check-size bands per investor type.
pub const DEFAULT_MIN_CHECK_SIZE: &str = "institutional=50k-100k,family-office=50k-100k";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long a subscriber status lookup stays cached (default: `300`).
    pub subscriber_cache_ttl_secs: u64,
    /// Maximum cached subscriber lookups (default: `10000`).
    pub subscriber_cache_capacity: usize,
    /// Minimum check-size band per investor type.
    pub check_size_policy: CheckSizePolicy,
    /// Postgres connection string. `None` runs on in-memory stores.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                                          |
    /// |-----------------------------------|--------------------------------------------------|
    /// | `HOST`                            | `0.0.0.0`                                        |
    /// | `PORT`                            | `3000`                                           |
    /// | `CORS_ORIGINS`                    | `http://localhost:5173`                          |
    /// | `REQUEST_TIMEOUT_SECS`            | `30`                                             |
    /// | `SUBSCRIBER_CACHE_TTL_SECS`       | `300`                                            |
    /// | `SUBSCRIBER_CACHE_CAPACITY`       | `10000`                                          |
    /// | `MIN_CHECK_SIZE_BY_INVESTOR_TYPE` | `institutional=50k-100k,family-office=50k-100k`  |
    /// | `DATABASE_URL`                    | unset                                            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let subscriber_cache_ttl_secs = checked_cache_ttl(
            std::env::var("SUBSCRIBER_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()
                .expect("SUBSCRIBER_CACHE_TTL_SECS must be a valid u64"),
        )
        .unwrap_or_else(|e| panic!("{e}"));

        let subscriber_cache_capacity: usize = std::env::var("SUBSCRIBER_CACHE_CAPACITY")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("SUBSCRIBER_CACHE_CAPACITY must be a valid usize");

        let check_size_policy = CheckSizePolicy::parse(
            &std::env::var("MIN_CHECK_SIZE_BY_INVESTOR_TYPE")
                .unwrap_or_else(|_| DEFAULT_MIN_CHECK_SIZE.into()),
        )
        .unwrap_or_else(|e| panic!("MIN_CHECK_SIZE_BY_INVESTOR_TYPE is invalid: {e}"));

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            subscriber_cache_ttl_secs,
            subscriber_cache_capacity,
            check_size_policy,
            database_url,
        }
    }
}

/// Reject cache TTLs that would overflow the monotonic clock when an entry's
/// expiry is computed.
fn checked_cache_ttl(secs: u64) -> Result<u64, String> {
    tokio::time::Instant::now()
        .checked_add(Duration::from_secs(secs))
        .map(|_| secs)
        .ok_or_else(|| format!("SUBSCRIBER_CACHE_TTL_SECS={secs} is too large"))
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn cache_ttl_must_fit_the_clock() {
        assert_eq!(checked_cache_ttl(300), Ok(300));
        assert_eq!(checked_cache_ttl(0), Ok(0));
        let err = checked_cache_ttl(u64::MAX).unwrap_err();
        assert!(err.contains("SUBSCRIBER_CACHE_TTL_SECS"));
    }

    #[test]
    fn default_check_size_policy_parses() {
        let policy = CheckSizePolicy::parse(DEFAULT_MIN_CHECK_SIZE).unwrap();
        assert_eq!(policy.minimum_for("institutional"), Some("50k-100k"));
        assert_eq!(policy.minimum_for("family-office"), Some("50k-100k"));
        assert_eq!(policy.minimum_for("individual"), None);
    }
}
