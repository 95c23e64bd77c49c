//! campus-hub server entry point.
//!
//! Loads configuration, wires the event store into the service and
//! starts the Axum HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use campus_hub::config::{HubConfig, LogFormat};
use campus_hub::persistence::{EventStore, InMemoryEventStore, PostgresEventStore, postgres};
use campus_hub::{build_app, build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = HubConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting campus-hub");

    // Build storage
    let store: Arc<dyn EventStore> = if config.persistence_enabled {
        let pool = postgres::connect(&config).await?;
        postgres::run_migrations(&pool).await?;
        tracing::info!("connected to postgres, migrations applied");
        Arc::new(PostgresEventStore::new(pool))
    } else {
        tracing::warn!("persistence disabled, serving from an empty in-memory store");
        Arc::new(InMemoryEventStore::new())
    };

    // Build application
    let app_state = build_state(&config, store);
    let app = build_app(app_state, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
