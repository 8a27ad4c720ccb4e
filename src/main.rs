use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tokio::signal;

use pest_detection_api::{
    app,
    cli::Cli,
    config::config,
    logging::init_logging,
    services::init_storage_service,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_*, STORAGE_*, JWT_* etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = config().clone();
    cli.apply_to(&mut config);

    init_logging(&config.logging);
    tracing::info!("Starting pest detection API in {:?} mode", config.environment);

    let storage = init_storage_service(&config.storage).await;

    tracing::info!(
        "Server: {} (request timeout {}s, auth required: {})",
        config.server.bind_addr(),
        config.server.request_timeout_secs,
        config.security.require_auth
    );
    tracing::info!(
        "Database: {}:{}/{}",
        config.database.host,
        config.database.port,
        config.database.database
    );
    tracing::info!("Redis: {} (db {})", config.redis.addr(), config.redis.database);
    tracing::info!("Kafka: {} (topic {})", config.kafka.brokers_string(), config.kafka.topic);
    tracing::info!(
        "Storage: {} at {} bucket={} ({})",
        config.storage.provider,
        config.storage.endpoint,
        config.storage.bucket,
        if storage.is_some() { "available" } else { "unavailable" }
    );

    let bind_addr = config.server.bind_addr();
    let state = AppState::new(config, storage);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Pest detection API listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
