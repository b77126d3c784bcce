//! Banana API server binary.
//!
//! Reads configuration from flags, the environment and `.env`, prepares the
//! user store, and serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use banana_api::config::ApiConfig;
use banana_api::messages::Locale;
use banana_core::auth::password::DEFAULT_COST;
use banana_core::auth::token::DEFAULT_TTL_MS;
use banana_core::repository::UserRepository;
use banana_core::repository::memory::InMemoryUserRepository;
use banana_core::repository::postgres::PgUserRepository;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "banana_api_server", about = "Banana API server")]
struct Args {
    /// Host to bind.
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/banana"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Keep users in memory instead of PostgreSQL. Data is lost on exit.
    #[arg(long, default_value_t = false)]
    in_memory: bool,

    /// HMAC secret for signing access tokens (at least 32 bytes).
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Access token lifetime in milliseconds.
    #[arg(long, env = "TOKEN_TTL_MS", default_value_t = DEFAULT_TTL_MS)]
    token_ttl_ms: i64,

    /// bcrypt cost for new password hashes.
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_COST)]
    bcrypt_cost: u32,

    /// Response message locale (`ko` or `en`).
    #[arg(long, env = "MESSAGE_LOCALE", default_value = "ko")]
    locale: Locale,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,banana_api=debug,banana_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        jwt_secret: args.jwt_secret,
        token_ttl_ms: args.token_ttl_ms,
        bcrypt_cost: args.bcrypt_cost,
        locale: args.locale,
    };
    info!(
        version = banana_core::version(),
        ?config,
        in_memory = args.in_memory,
        "starting banana_api_server"
    );

    let users: Arc<dyn UserRepository> = if args.in_memory {
        warn!("using in-memory user store; data will not persist");
        Arc::new(InMemoryUserRepository::new())
    } else {
        info!(max_connections = args.max_connections, "configuring connection pool");
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&args.database_url)
            .await?;

        info!("running database migrations");
        banana_core::migrate::migrate(&pool).await?;
        Arc::new(PgUserRepository::new(pool))
    };

    let state = banana_api::AppState::new(&config, users)?;
    let app = banana_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C");
                return;
            }
            info!("shutdown requested");
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}
