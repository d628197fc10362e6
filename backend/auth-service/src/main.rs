/// Auth Service - Main entry point
///
/// Wires configuration, the PostgreSQL pool and the layered stubs
/// (repository -> business -> handler), then serves gRPC until a shutdown
/// signal arrives.
use anyhow::{Context, Result};
use tokio::signal;
use tonic::transport::Server;
use tonic_health::ServingStatus;
use tracing::info;

use auth_service::{
    config::Config,
    db::{self, AuthRepository},
    grpc::AuthHandler,
    services::AuthService,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "auth_service=info,info".into()))
        .with_target(false)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Starting auth service on port {}", config.port);

    let db_pool = db::create_pool(&config)
        .await
        .context("Failed to connect to PostgreSQL")?;
    info!(
        "Database pool initialized with {} max connections",
        config.max_connection_pool
    );

    let repository = AuthRepository::new(db_pool);
    let service = AuthService::new(repository);
    let _handler = AuthHandler::new(service);

    let addr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("Invalid server address")?;

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_service_status("", ServingStatus::Serving)
        .await;

    info!("Starting gRPC server on {}", addr);

    Server::builder()
        .add_service(health_service)
        // TODO: add_service for the auth handler once the proto contract
        // exists, e.g. .add_service(AuthServiceServer::new(handler))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Auth service shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}
