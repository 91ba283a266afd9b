use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Secret used when no `JWT_SECRET` is set outside production.
const DEVELOPMENT_JWT_SECRET: &str = "blog-api-development-secret";

pub const DEFAULT_JWT_EXPIRY_HOURS: u64 = 1;
/// Token lifetimes are capped at one year
pub const JWT_EXPIRY_HOURS_RANGE: RangeInclusive<u64> = 1..=24 * 365;

pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Costs the bcrypt crate accepts
pub const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the individual parts below
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: SslMode,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SslMode {
    Disable,
    Prefer,
    Require,
}

impl SslMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "disable" | "off" | "false" => Some(SslMode::Disable),
            "prefer" => Some(SslMode::Prefer),
            "require" | "on" | "true" => Some(SslMode::Require),
            _ => None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub bcrypt_cost: u32,
    pub require_auth_for_writes: bool,
}

// Keep the signing secret out of debug logs
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("require_auth_for_writes", &self.require_auth_for_writes)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable source
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_overrides(&lookup);

        if config.security.jwt_secret.is_empty() {
            if config.environment == Environment::Production {
                return Err(ConfigError::Missing("JWT_SECRET"));
            }
            tracing::warn!("JWT_SECRET not set, using the development signing secret");
            config.security.jwt_secret = DEVELOPMENT_JWT_SECRET.to_string();
        }

        Ok(config)
    }

    fn with_overrides(mut self, lookup: &impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        override_parsed(lookup, "PORT", &mut self.server.port);

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Some(v) = lookup("DB_HOST") {
            self.database.host = v;
        }
        override_parsed(lookup, "DB_PORT", &mut self.database.port);
        if let Some(v) = lookup("DB_USER") {
            self.database.user = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("DB_SSLMODE") {
            match SslMode::parse(&v) {
                Some(mode) => self.database.ssl_mode = mode,
                None => tracing::warn!("Ignoring DB_SSLMODE={:?}", v),
            }
        }
        override_parsed(lookup, "DB_MAX_CONNECTIONS", &mut self.database.max_connections);

        // Security overrides
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        override_parsed(lookup, "JWT_EXPIRY_HOURS", &mut self.security.jwt_expiry_hours);
        if !JWT_EXPIRY_HOURS_RANGE.contains(&self.security.jwt_expiry_hours) {
            tracing::warn!(
                "JWT_EXPIRY_HOURS={} is outside {:?}, using {}",
                self.security.jwt_expiry_hours,
                JWT_EXPIRY_HOURS_RANGE,
                DEFAULT_JWT_EXPIRY_HOURS
            );
            self.security.jwt_expiry_hours = DEFAULT_JWT_EXPIRY_HOURS;
        }
        override_parsed(lookup, "BCRYPT_COST", &mut self.security.bcrypt_cost);
        if !BCRYPT_COST_RANGE.contains(&self.security.bcrypt_cost) {
            tracing::warn!(
                "BCRYPT_COST={} is outside {:?}, using {}",
                self.security.bcrypt_cost,
                BCRYPT_COST_RANGE,
                DEFAULT_BCRYPT_COST
            );
            self.security.bcrypt_cost = DEFAULT_BCRYPT_COST;
        }
        override_parsed(
            lookup,
            "REQUIRE_AUTH_FOR_WRITES",
            &mut self.security.require_auth_for_writes,
        );

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 5000 },
            database: DatabaseConfig {
                max_connections: 10,
                ..DatabaseConfig::local()
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
                bcrypt_cost: DEFAULT_BCRYPT_COST,
                require_auth_for_writes: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 5000 },
            database: DatabaseConfig {
                max_connections: 20,
                ..DatabaseConfig::local()
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
                bcrypt_cost: DEFAULT_BCRYPT_COST,
                require_auth_for_writes: true,
            },
        }
    }
}

/// Replace `target` with the parsed variable; malformed values keep the current one
fn override_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut T)
where
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!("Ignoring malformed {}={:?}", key, raw),
    }
}

impl DatabaseConfig {
    fn local() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "postgres".to_string(),
            ssl_mode: SslMode::Prefer,
            max_connections: 10,
        }
    }
}
