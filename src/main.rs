use std::sync::Arc;

use account_management::{
    AppState, InMemoryGateway, ManagementGateway, SqlGateway, build_router,
    config::{AppConfig, DEFAULT_LOG_FILTER, DatabaseBackend},
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_tracing(&config);

    let gateway: Arc<dyn ManagementGateway> = match config.database_backend {
        DatabaseBackend::Memory => {
            info!("database backend: memory");
            Arc::new(InMemoryGateway::new())
        }
        DatabaseBackend::Sqlite => {
            info!(url = %config.database_url, "database backend: sqlite");
            let gateway = SqlGateway::connect(&config.database_url, config.db_max_connections)
                .await
                .context("failed to open SQLite database")?;
            Arc::new(gateway)
        }
    };

    gateway
        .init()
        .await
        .context("failed to initialize storage schema")?;

    let state = AppState::new(gateway).with_error_source(config.error_source.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(address = %config.bind_addr, "account management service started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = shutdown_signal().await;
            info!(signal, "draining connections before shutdown");
        })
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    info!(
        bind_addr = %config.bind_addr,
        backend = ?config.database_backend,
        error_source = %config.error_source,
        "configuration loaded"
    );
}

/// Resolves on Ctrl+C or SIGTERM and yields the name of the signal.
async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(err) => {
                error!(error = %err, "cannot listen for Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        let Ok(mut stream) = signal(SignalKind::terminate()).inspect_err(|err| {
            error!(error = %err, "cannot listen for SIGTERM");
        }) else {
            return std::future::pending().await;
        };
        stream.recv().await;
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    }
}
