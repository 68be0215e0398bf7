//! clusterd
//!
//! Loads a pre-trained centroid model and serves nearest-centroid
//! assignments over HTTP.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use clusterd_server::{create_router, AppState, Cli, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose || cli.debug);

    info!("Starting clusterd");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Model: {}", config.model_path.display());
    if config.debug {
        warn!("Debug mode enabled: internal error detail is returned to clients");
    }

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // The model must be loaded before anything listens
    let state = match AppState::new(config.clone(), metrics_handle) {
        Ok(state) => state,
        Err(e) => {
            error!("Model load failed, not serving: {:#}", e);
            return Err(e);
        }
    };

    let addr: SocketAddr = config.bind_address().parse()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("clusterd=debug,clusterd_server=debug,clusterd_model=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("clusterd=info,clusterd_server=info,clusterd_model=info")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "clusterd_requests_total",
        "Total number of prediction requests received"
    );
    metrics::describe_counter!(
        "clusterd_predictions_total",
        "Successful predictions by assigned cluster"
    );
    metrics::describe_counter!("clusterd_errors_total", "Total number of errors by kind");
    metrics::describe_histogram!(
        "clusterd_predict_latency_us",
        metrics::Unit::Microseconds,
        "Prediction latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
