//! Shared application state

use anyhow::{Context, Result};
use clusterd_model::{load_model, ClusterAssigner};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests
///
/// Everything here is read-only once built, so handlers share it through
/// `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// The model every request is assigned against
    pub model: Arc<dyn ClusterAssigner>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Load the configured artifact and build the state
    ///
    /// Any load failure is returned before a listener exists.
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        info!("Loading model from: {}", config.model_path.display());

        let model = load_model(&config.model_config())
            .with_context(|| format!("failed to load model {}", config.model_path.display()))?;

        Ok(Self::with_model(config, Arc::new(model), metrics_handle))
    }

    /// Build state around an already loaded model
    pub fn with_model(
        config: ServerConfig,
        model: Arc<dyn ClusterAssigner>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        info!(
            model = model.name(),
            clusters = model.n_clusters(),
            features = model.n_features(),
            "Application state initialized"
        );

        Self {
            config: Arc::new(config),
            model,
            metrics_handle,
        }
    }
}
