// Application configuration loaded from environment variables

use thiserror::Error;

/// Default token lifetime: 7 days, in seconds
pub const DEFAULT_JWT_EXPIRES_IN_SECS: i64 = 604_800;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Runtime configuration for the API server
///
/// Loaded once at startup; the JWT secret and expiry are process-wide
/// policy shared with the token service.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jwt_expires_in_secs: i64,
    pub host: String,
    pub port: u16,
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a
    /// development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let redis_url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let jwt_expires_in_secs =
            parse_expires_in(std::env::var("JWT_EXPIRES_IN").ok().as_deref())?;

        Ok(Self {
            database_url,
            redis_url,
            jwt_secret,
            jwt_expires_in_secs,
            host,
            port,
            environment,
        })
    }
}

fn parse_port(value: Option<&str>) -> Result<u16, ConfigError> {
    match value {
        None => Ok(8080),
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidVar("PORT", raw.to_string())),
    }
}

/// Token lifetime in seconds; rejects zero and negative values
fn parse_expires_in(value: Option<&str>) -> Result<i64, ConfigError> {
    match value {
        None => Ok(DEFAULT_JWT_EXPIRES_IN_SECS),
        Some(raw) => match raw.parse::<i64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidVar("JWT_EXPIRES_IN", raw.to_string())),
        },
    }
}
