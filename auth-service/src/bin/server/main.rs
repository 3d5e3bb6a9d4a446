use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::Config;
use auth_service::domain::user::ports::AuthServicePort;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::outbound::repositories::SqliteUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        access_token_expire_minutes = config.jwt.access_token_expire_minutes,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.algorithm()?,
        config.jwt.access_token_ttl(),
    )?);

    let auth_service = connect_auth_service(&config, authenticator).await?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

/// Open the user store named by `database.url`, run its migrations and wrap it in the service.
async fn connect_auth_service(
    config: &Config,
    authenticator: Arc<Authenticator>,
) -> Result<Arc<dyn AuthServicePort>, anyhow::Error> {
    let url = &config.database.url;
    let max_connections = config.database.max_connections;

    if url.starts_with("sqlite:") {
        let repository = SqliteUserRepository::connect(url, max_connections).await?;
        tracing::info!(
            max_connections,
            database = "sqlite",
            "Database connection pool created"
        );

        repository.migrate().await?;
        tracing::info!(database = "sqlite", "Database migrations completed");

        Ok(Arc::new(AuthService::new(
            Arc::new(repository),
            authenticator,
        )))
    } else {
        let repository = PostgresUserRepository::connect(url, max_connections).await?;
        tracing::info!(
            max_connections,
            database = "postgresql",
            "Database connection pool created"
        );

        repository.migrate().await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        Ok(Arc::new(AuthService::new(
            Arc::new(repository),
            authenticator,
        )))
    }
}
