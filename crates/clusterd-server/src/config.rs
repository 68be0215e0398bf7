//! Server configuration

use clusterd_model::{ModelConfig, ModelFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, DEFAULT_CONFIG_PATH};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Model artifact path
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Model artifact format
    #[serde(default)]
    pub model_format: ModelFormat,

    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode, off unless asked for
    #[serde(default)]
    pub debug: bool,

    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Only the default path may be absent; an explicit one must exist
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else if config_path == DEFAULT_CONFIG_PATH {
            Self::default()
        } else {
            anyhow::bail!("config file not found: {}", config_path);
        };

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.model_path = model.clone();
        }

        if let Some(format) = cli.format {
            config.model_format = format;
        }

        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if cli.debug {
            config.debug = true;
        }

        Ok(config)
    }

    /// Loader settings for the configured artifact
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::from_path(&self.model_path).with_format(self.model_format)
    }

    /// `listen:port` as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            model_format: ModelFormat::Auto,
            listen: default_listen(),
            port: default_port(),
            debug: false,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/kmeans_model.json")
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_default_file_missing() {
        assert!(!Path::new(DEFAULT_CONFIG_PATH).exists());

        let config = ServerConfig::load(DEFAULT_CONFIG_PATH, &Cli::default()).unwrap();
        assert_eq!(config.port, 5000);
        assert!(!config.debug);
        assert_eq!(config.model_path, PathBuf::from("models/kmeans_model.json"));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = ServerConfig::load("/nonexistent/clusterd.yaml", &Cli::default()).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/clusterd.yaml"));
    }

    #[test]
    fn test_default_model_path_is_shipped_artifact() {
        let shipped = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../..")
            .join(ServerConfig::default().model_path);
        let model = clusterd_model::load_model(&clusterd_model::ModelConfig::from_path(shipped)).unwrap();
        assert_eq!(model.n_clusters(), 2);
    }

    #[test]
    fn test_file_then_cli_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clusterd.yaml");
        std::fs::write(
            &path,
            "model_path: models/segments.yaml\nport: 8000\nmax_body_bytes: 4096\n",
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();

        let config = ServerConfig::load(&path, &Cli::default()).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_body_bytes, 4096);
        assert_eq!(config.model_path, PathBuf::from("models/segments.yaml"));

        let cli = Cli {
            port: Some(9000),
            debug: true,
            format: Some(ModelFormat::Json),
            ..Default::default()
        };
        let config = ServerConfig::load(&path, &cli).unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.debug);
        assert_eq!(config.model_config().format, ModelFormat::Json);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clusterd.yaml");
        std::fs::write(&path, "prot: 8000\n").unwrap();

        assert!(ServerConfig::load(&path.to_string_lossy(), &Cli::default()).is_err());
    }
}
