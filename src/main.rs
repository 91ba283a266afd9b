use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blog_api::config::AppConfig;
use blog_api::database::{build_pool, init_schema, PgStore};
use blog_api::AppState;

#[derive(Debug, Parser)]
#[command(name = "blog-api", version, about = "Blog backend: signup/login and blog post CRUD")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Do not run the CREATE TABLE IF NOT EXISTS statements at startup
    #[arg(long)]
    skip_schema_init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_*, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting Blog API in {:?} mode", config.environment);
    if !config.security.require_auth_for_writes {
        tracing::warn!("Blog writes are open to unauthenticated callers (REQUIRE_AUTH_FOR_WRITES=false)");
    }

    let pool = build_pool(&config.database).context("invalid database configuration")?;

    if !args.skip_schema_init {
        // Fire and forget: failures are logged and never block startup
        let schema_pool = pool.clone();
        tokio::spawn(async move {
            init_schema(&schema_pool).await;
        });
    }

    let state = AppState::from_config(&config, PgStore::new(pool));
    let app = blog_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Blog API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
