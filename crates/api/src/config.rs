use std::str::FromStr;

use monitabits_core::device::MAX_CLIENT_CLOCK_SKEW_SECS;

/// A malformed configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidVar {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

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
    /// Maximum distance between `X-Client-Time` and server time, in seconds
    /// (default: `300`). The bound itself is accepted.
    pub client_time_tolerance_secs: i64,
    /// PostgreSQL connection string. When unset the server keeps all data
    /// in memory.
    pub database_url: Option<String>,
    /// Pool size (default: `20`).
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:3000".into()],
            request_timeout_secs: 30,
            client_time_tolerance_secs: MAX_CLIENT_CLOCK_SKEW_SECS,
            database_url: None,
            db_max_connections: 20,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name,
                expected,
                value: raw,
            })
        }
        _ => Ok(default),
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `HOST`                       | `0.0.0.0`                |
    /// | `PORT`                       | `3000`                   |
    /// | `CORS_ORIGINS`               | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                     |
    /// | `CLIENT_TIME_TOLERANCE_SECS` | `300`                    |
    /// | `DATABASE_URL`               | unset (in-memory store)  |
    /// | `DB_MAX_CONNECTIONS`         | `20`                     |
    /// | `LOG_FORMAT`                 | `pretty` (or `json`)     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.cors_origins,
        };

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let log_format = match std::env::var("LOG_FORMAT").as_deref().map(str::trim) {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Ok("") | Err(_) => LogFormat::Pretty,
            Ok(other) => {
                return Err(ConfigError::InvalidVar {
                    name: "LOG_FORMAT",
                    expected: "log format (pretty|json)",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port: parse_var("PORT", "u16", defaults.port)?,
            cors_origins,
            request_timeout_secs: parse_var(
                "REQUEST_TIMEOUT_SECS",
                "u64",
                defaults.request_timeout_secs,
            )?,
            client_time_tolerance_secs: parse_var(
                "CLIENT_TIME_TOLERANCE_SECS",
                "i64",
                defaults.client_time_tolerance_secs,
            )?,
            database_url,
            db_max_connections: parse_var(
                "DB_MAX_CONNECTIONS",
                "u32",
                defaults.db_max_connections,
            )?,
            log_format,
        })
    }

    /// `client_time_tolerance_secs` as a duration.
    pub fn client_time_tolerance(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.client_time_tolerance_secs)
    }
}
