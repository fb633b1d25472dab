use std::str::FromStr;
use std::time::Duration;

use places_geocoding::opencage::DEFAULT_BASE_URL;

/// Placeholder image attached to every new place.
const DEFAULT_PLACE_IMAGE_URL: &str = "https://picsum.photos/id/237/200/300";

/// Placeholder avatar attached to every new user.
const DEFAULT_USER_IMAGE_URL: &str = "https://picsum.photos/200";

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} has invalid value '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Geocoding service settings.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    /// OpenCage API key. Without one, the server falls back to an empty
    /// fixed table and every address fails to resolve.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub geocoding: GeocodingConfig,
    pub place_image_url: String,
    pub user_image_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                                         |
    /// |----------------------------|-------------------------------------------------|
    /// | `HOST`                     | `0.0.0.0`                                       |
    /// | `PORT`                     | `5000`                                          |
    /// | `CORS_ORIGINS`             | `*`                                             |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                                            |
    /// | `DATABASE_URL`             | unset (in-memory store)                         |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                                            |
    /// | `GEOCODING_API_KEY`        | unset                                           |
    /// | `GEOCODING_BASE_URL`       | `https://api.opencagedata.com/geocode/v1/json`  |
    /// | `GEOCODING_TIMEOUT_SECS`   | `10`                                            |
    /// | `PLACE_IMAGE_URL`          | `https://picsum.photos/id/237/200/300`          |
    /// | `USER_IMAGE_URL`           | `https://picsum.photos/200`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let cors_origins: Vec<String> = non_empty("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var(&lookup, "PORT", 5000)?,
            cors_origins,
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            database_url: non_empty("DATABASE_URL"),
            database_max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            geocoding: GeocodingConfig {
                api_key: non_empty("GEOCODING_API_KEY"),
                base_url: non_empty("GEOCODING_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
                timeout: Duration::from_secs(parse_var(&lookup, "GEOCODING_TIMEOUT_SECS", 10)?),
            },
            place_image_url: non_empty("PLACE_IMAGE_URL")
                .unwrap_or_else(|| DEFAULT_PLACE_IMAGE_URL.into()),
            user_image_url: non_empty("USER_IMAGE_URL")
                .unwrap_or_else(|| DEFAULT_USER_IMAGE_URL.into()),
        })
    }

    /// Whether CORS should accept any origin.
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { var, value }),
    }
}
