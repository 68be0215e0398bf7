//! Model artifact loading

use clusterd_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::{CentroidModel, ModelArtifact};

/// Configuration for loading a model artifact
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path to the artifact file
    pub path: PathBuf,

    /// Artifact encoding
    pub format: ModelFormat,
}

/// Artifact file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Pick from the file extension
    #[default]
    Auto,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl ModelFormat {
    /// Guess the format from a file extension, falling back to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    /// Replace `Auto` with the concrete format for `path`
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => Self::from_path(path),
            other => other,
        }
    }
}

impl std::str::FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown model format: {}", other)),
        }
    }
}

impl ModelConfig {
    /// Create a new model configuration from a local path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: ModelFormat::Auto,
        }
    }

    /// Set model format
    pub fn with_format(mut self, format: ModelFormat) -> Self {
        self.format = format;
        self
    }
}

/// Read, decode and validate the artifact named by `config`
pub fn load_model(config: &ModelConfig) -> Result<CentroidModel> {
    let path = &config.path;
    if !path.exists() {
        return Err(Error::artifact(format!(
            "model file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::artifact(format!("failed to read {}: {}", path.display(), e))
    })?;

    let format = config.format.resolve(path);
    let artifact = decode_artifact(&content, format).map_err(|e| {
        Error::artifact(format!("failed to decode {}: {}", path.display(), e))
    })?;

    let model = CentroidModel::from_artifact(artifact)?;

    info!(
        path = %path.display(),
        name = %model.metadata().name,
        clusters = model.n_clusters(),
        features = model.n_features(),
        "loaded model"
    );

    Ok(model)
}

fn decode_artifact(content: &str, format: ModelFormat) -> Result<ModelArtifact> {
    match format {
        ModelFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        ModelFormat::Json | ModelFormat::Auto => Ok(serde_json::from_str(content)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ModelFormat::from_path(Path::new("m.yaml")), ModelFormat::Yaml);
        assert_eq!(ModelFormat::from_path(Path::new("m.YML")), ModelFormat::Yaml);
        assert_eq!(ModelFormat::from_path(Path::new("m.json")), ModelFormat::Json);
        assert_eq!(ModelFormat::from_path(Path::new("model")), ModelFormat::Json);
    }

    #[test]
    fn test_explicit_format_wins() {
        let path = Path::new("m.json");
        assert_eq!(ModelFormat::Yaml.resolve(path), ModelFormat::Yaml);
        assert_eq!(ModelFormat::Auto.resolve(path), ModelFormat::Json);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("YAML".parse::<ModelFormat>().unwrap(), ModelFormat::Yaml);
        assert!("pickle".parse::<ModelFormat>().is_err());
    }

    #[test]
    fn test_missing_file_is_artifact_error() {
        let config = ModelConfig::from_path("/nonexistent/kmeans_model.json");
        let err = load_model(&config).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_decode_yaml() {
        let artifact = decode_artifact("centroids:\n  - [0.0, 1.0]\n", ModelFormat::Yaml).unwrap();
        assert_eq!(artifact.centroids, vec![vec![0.0, 1.0]]);
    }
}
