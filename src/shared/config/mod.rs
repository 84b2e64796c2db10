//! Application configuration module
//!
//! Configuration is read once at startup from environment variables (a `.env`
//! file is loaded by the binary first) and validated by
//! [`AppConfigBuilder::build`]. Any error here is fatal: the server refuses
//! to start rather than run with a missing signing key or an unusable store.
//!
//! | Variable          | Default       | Notes                                  |
//! |-------------------|---------------|----------------------------------------|
//! | `JWT_SECRET`      | (required)    | HMAC signing key                       |
//! | `JWT_EXPIRES_IN`  | `24h`         | humantime duration (`30m`, `7d`, ...)  |
//! | `BCRYPT_ROUNDS`   | `12`          | 4..=31                                 |
//! | `ACCOUNT_STORE`   | `split`       | `split`, `unified` or `memory`         |
//! | `DATABASE_URL`    | (none)        | required by `split` and `unified`      |
//! | `APP_ENV`         | `production`  | `development`, `production`, `test`    |
//! | `PORT`            | `3000`        |                                        |
//! | `ALLOWED_ORIGINS` | (any)         | comma separated CORS origins           |

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default token lifetime label
pub const DEFAULT_TOKEN_LIFETIME: &str = "24h";

/// Default bcrypt cost factor
pub const DEFAULT_BCRYPT_ROUNDS: u32 = 12;

/// Accepted bcrypt cost range
pub const BCRYPT_ROUNDS_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Deployment environment
///
/// An unset `APP_ENV` is production: internal detail stays hidden unless
/// development is asked for explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
    Test,
}

impl Environment {
    /// Whether internal error details may be shown to API callers
    pub fn exposes_internal_errors(self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                message: format!("unknown environment '{other}'"),
            }),
        }
    }
}

/// Which account storage layout backs the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreLayout {
    /// Separate `clients` and `sellers` tables
    #[default]
    Split,
    /// A single `users` table with an `is_seller` flag
    Unified,
    /// In-process store; never allowed in production
    Memory,
}

impl StoreLayout {
    pub fn needs_database(self) -> bool {
        !matches!(self, StoreLayout::Memory)
    }
}

impl fmt::Display for StoreLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreLayout::Split => "split",
            StoreLayout::Unified => "unified",
            StoreLayout::Memory => "memory",
        })
    }
}

impl FromStr for StoreLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(StoreLayout::Split),
            "unified" => Ok(StoreLayout::Unified),
            "memory" => Ok(StoreLayout::Memory),
            other => Err(ConfigError::InvalidValue {
                key: "ACCOUNT_STORE",
                message: format!("unknown store layout '{other}'"),
            }),
        }
    }
}

/// Application configuration
#[derive(Debug)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub store: StoreLayout,
    pub database_url: Option<String>,
    /// HMAC key for session tokens
    pub jwt_secret: SecretString,
    /// Token lifetime as configured, echoed to clients as `expiresIn`
    pub token_lifetime_label: String,
    pub token_lifetime: Duration,
    pub bcrypt_rounds: u32,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(env) = lookup("APP_ENV") {
            builder = builder.environment(env.parse()?);
        }
        if let Some(port) = lookup("PORT") {
            let port = port.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                message: e.to_string(),
            })?;
            builder = builder.port(port);
        }
        if let Some(store) = lookup("ACCOUNT_STORE") {
            builder = builder.store(store.parse()?);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(lifetime) = lookup("JWT_EXPIRES_IN") {
            builder = builder.token_lifetime(lifetime);
        }
        if let Some(rounds) = lookup("BCRYPT_ROUNDS") {
            let rounds = rounds.trim().parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                key: "BCRYPT_ROUNDS",
                message: e.to_string(),
            })?;
            builder = builder.bcrypt_rounds(rounds);
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            builder = builder.allowed_origins(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        builder.build()
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    environment: Option<Environment>,
    port: Option<u16>,
    store: Option<StoreLayout>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_lifetime: Option<String>,
    bcrypt_rounds: Option<u32>,
    allowed_origins: Vec<String>,
}

impl AppConfigBuilder {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn store(mut self, store: StoreLayout) -> Self {
        self.store = Some(store);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Token lifetime in humantime notation, e.g. `24h`
    pub fn token_lifetime(mut self, lifetime: impl Into<String>) -> Self {
        self.token_lifetime = Some(lifetime.into());
        self
    }

    pub fn bcrypt_rounds(mut self, rounds: u32) -> Self {
        self.bcrypt_rounds = Some(rounds);
        self
    }

    pub fn allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let environment = self.environment.unwrap_or_default();
        let store = self.store.unwrap_or_default();

        let jwt_secret = self
            .jwt_secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let token_lifetime_label = self
            .token_lifetime
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| DEFAULT_TOKEN_LIFETIME.to_string());
        let token_lifetime = parse_lifetime(&token_lifetime_label)?;

        let bcrypt_rounds = self.bcrypt_rounds.unwrap_or(DEFAULT_BCRYPT_ROUNDS);
        if !BCRYPT_ROUNDS_RANGE.contains(&bcrypt_rounds) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_ROUNDS",
                message: format!(
                    "{bcrypt_rounds} is outside {}..={}",
                    BCRYPT_ROUNDS_RANGE.start(),
                    BCRYPT_ROUNDS_RANGE.end()
                ),
            });
        }

        if store == StoreLayout::Memory && environment == Environment::Production {
            return Err(ConfigError::InvalidValue {
                key: "ACCOUNT_STORE",
                message: "the memory store cannot be used in production".to_string(),
            });
        }
        let database_url = self.database_url.filter(|u| !u.trim().is_empty());
        if store.needs_database() && database_url.is_none() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }

        Ok(AppConfig {
            environment,
            port: self.port.unwrap_or(DEFAULT_PORT),
            store,
            database_url,
            jwt_secret: SecretString::from(jwt_secret),
            token_lifetime_label,
            token_lifetime,
            bcrypt_rounds,
            allowed_origins: self.allowed_origins,
        })
    }
}

/// Parse a token lifetime such as `24h`, `30m` or `7d`
///
/// A bare number is taken as seconds.
pub fn parse_lifetime(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    let parsed = match value.parse::<u64>() {
        Ok(seconds) => Duration::from_secs(seconds),
        Err(_) => humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
            key: "JWT_EXPIRES_IN",
            message: format!("'{value}': {e}"),
        })?,
    };
    if parsed.as_secs() == 0 {
        return Err(ConfigError::InvalidValue {
            key: "JWT_EXPIRES_IN",
            message: "token lifetime must be at least one second".to_string(),
        });
    }
    Ok(parsed)
}

impl AppConfig {
    /// Signing key bytes
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}
