// Main entry point for the bundler RPC gate

use bundler_gate::api::{create_router, AppState};
use bundler_gate::config::Config;
use bundler_gate::metrics::GateMetrics;
use bundler_gate::proxy::UpstreamDispatcher;

use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration comes first so the log settings are known
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config)?;

    info!("Starting bundler RPC gate");
    info!(
        bind_address = %config.bind_address,
        port = config.port,
        upstream_url = %config.upstream_url,
        gate = ?config.gate,
        "Configuration loaded"
    );

    if config.gate.api_key.is_none() && !config.gate.protected_methods.is_empty() {
        warn!("PROTECTED_METHODS is set but API_KEY is not; all methods are open");
    }

    let metrics = Arc::new(GateMetrics::new()?);
    let dispatcher = Arc::new(UpstreamDispatcher::new(
        &config.upstream_url,
        config.upstream_timeout_secs,
    )?);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let app_state = AppState::new(config, dispatcher, metrics);
    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!(error = %e, addr = %addr, "Failed to bind to address");
        e
    })?;

    info!(addr = %addr, "Server listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!(error = %e, "Server error");
            e
        })?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber based on configuration
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_env_filter(filter);

    let result = if config.log_format == "json" {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            info!("SIGTERM received, starting graceful shutdown");
        },
    }
}
