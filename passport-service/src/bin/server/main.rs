use std::sync::Arc;

use auth::Authenticator;
use passport_service::config::Config;
use passport_service::domain::user::service::PassportService;
use passport_service::inbound::http::router::create_router;
use passport_service::outbound::repositories::PostgresCredentialStore;
use passport_service::outbound::security::Argon2PasswordHasher;
use passport_service::outbound::security::JwtTokenIssuer;
use passport_service::outbound::security::SystemClock;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passport_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "passport-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // Optional configuration file path as the only argument.
    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref())?;

    tracing::info!(
        config_path = config_path.as_deref().unwrap_or("<default>"),
        http_port = config.server.http_port,
        access_expires_secs = config.jwt.access_expires_secs,
        refresh_expires_secs = config.jwt.refresh_expires_secs,
        "Configuration loaded"
    );

    if config.jwt.secret.is_empty() {
        tracing::warn!("JWT secret is empty; every sign-in will fail until it is set");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = auth::PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::new(config.jwt.clone()));

    let passport_service = Arc::new(PassportService::new(
        Arc::new(PostgresCredentialStore::new(pg_pool)),
        Arc::new(Argon2PasswordHasher::new(password_hasher)),
        Arc::new(JwtTokenIssuer::new(authenticator)),
        Arc::new(SystemClock),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(passport_service)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
