use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, SslMode};

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Build the shared connection pool.
///
/// The pool connects lazily so the server still starts (and reports a degraded
/// health check) while the database is unreachable.
pub fn build_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let options = connect_options(config)?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(options);

    info!(
        "Configured database pool for {}:{}/{} (max {} connections)",
        config.host, config.port, config.name, config.max_connections
    );
    Ok(pool)
}

fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
    if let Some(url) = &config.url {
        return url
            .parse::<PgConnectOptions>()
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()));
    }

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(ssl_mode(config.ssl_mode)))
}

fn ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
    }
}
