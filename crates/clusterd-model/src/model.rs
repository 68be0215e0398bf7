//! Centroid model and nearest-centroid assignment

use clusterd_core::{ClusterLabel, Error, FeatureVector, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::assigner::ClusterAssigner;

/// On-disk representation of a trained model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifact {
    /// One row per cluster
    pub centroids: Vec<Vec<f64>>,

    /// Declared dimensionality; must agree with the rows when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,

    /// Model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Model version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMetadata {
    /// Model name/identifier
    pub name: String,

    /// Model version
    pub version: String,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            name: "kmeans".to_string(),
            version: "1".to_string(),
        }
    }
}

/// Immutable set of centroids in a fixed-dimensional feature space
#[derive(Debug, Clone)]
pub struct CentroidModel {
    centroids: Vec<Vec<f64>>,
    n_features: usize,
    metadata: ModelMetadata,
}

impl CentroidModel {
    /// Create a model, validating the centroid set
    ///
    /// Requires at least one centroid, a non-zero dimension shared by every
    /// centroid, and finite coordinates.
    pub fn new(centroids: Vec<Vec<f64>>) -> Result<Self> {
        let n_features = match centroids.first() {
            Some(first) => first.len(),
            None => return Err(Error::invalid_model("model has no centroids")),
        };

        if n_features == 0 {
            return Err(Error::invalid_model("centroids have zero dimensions"));
        }

        for (i, centroid) in centroids.iter().enumerate() {
            if centroid.len() != n_features {
                return Err(Error::invalid_model(format!(
                    "centroid {} has {} dimensions, expected {}",
                    i,
                    centroid.len(),
                    n_features
                )));
            }
            if let Some(j) = centroid.iter().position(|v| !v.is_finite()) {
                return Err(Error::invalid_model(format!(
                    "centroid {} has a non-finite coordinate at index {}",
                    i, j
                )));
            }
        }

        Ok(Self {
            centroids,
            n_features,
            metadata: ModelMetadata::default(),
        })
    }

    /// Build a model from a decoded artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let ModelArtifact {
            centroids,
            n_features,
            name,
            version,
        } = artifact;

        let mut model = Self::new(centroids)?;

        if let Some(declared) = n_features {
            if declared != model.n_features {
                return Err(Error::invalid_model(format!(
                    "artifact declares {} features but centroids have {}",
                    declared, model.n_features
                )));
            }
        }

        if let Some(name) = name {
            model.metadata.name = name;
        }
        if let Some(version) = version {
            model.metadata.version = version;
        }

        Ok(model)
    }

    /// Convert back into the on-disk representation
    pub fn to_artifact(&self) -> ModelArtifact {
        ModelArtifact {
            centroids: self.centroids.clone(),
            n_features: Some(self.n_features),
            name: Some(self.metadata.name.clone()),
            version: Some(self.metadata.version.clone()),
        }
    }

    /// Write the model as an artifact file, format chosen by extension
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let artifact = self.to_artifact();
        let content = match crate::ModelFormat::from_path(path) {
            crate::ModelFormat::Yaml => serde_yaml::to_string(&artifact)?,
            _ => serde_json::to_string_pretty(&artifact)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Number of centroids
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Dimensionality of the feature space
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Get the centroid rows
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Get model metadata
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Squared Euclidean distance from `features` to every centroid
    ///
    /// Entries overflow to infinity when coordinates are far apart; use
    /// [`CentroidModel::predict`] for an assignment that tolerates that.
    pub fn distances(&self, features: &[f64]) -> Result<Vec<f64>> {
        self.check_dimensions(features)?;
        Ok(self
            .centroids
            .iter()
            .map(|c| squared_distance(c, features))
            .collect())
    }

    /// Index of the nearest centroid; ties resolve to the lowest index
    pub fn predict(&self, features: &[f64]) -> Result<ClusterLabel> {
        let mut distances = self.distances(features)?;

        if distances.iter().any(|d| !d.is_finite()) {
            debug!("squared distances overflowed, comparing on a scaled metric");
            distances = self.scaled_distances(features);
        }

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, d) in distances.into_iter().enumerate() {
            if !d.is_finite() {
                return Err(Error::computation(format!(
                    "distance to centroid {} is not finite",
                    i
                )));
            }
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }

        debug!(cluster = best, distance = best_distance, "assigned observation");
        Ok(ClusterLabel::new(best))
    }

    /// Squared distances divided by a common factor, finite for any finite input
    ///
    /// Coordinates are halved before subtracting so the difference cannot
    /// overflow, then every difference is divided by the largest one so each
    /// squared term is at most 1. The common factor preserves the ordering.
    fn scaled_distances(&self, features: &[f64]) -> Vec<f64> {
        let halved_diff = |c: f64, x: f64| c * 0.5 - x * 0.5;

        let scale = self
            .centroids
            .iter()
            .flat_map(|c| c.iter().zip(features).map(|(c, x)| halved_diff(*c, *x).abs()))
            .fold(0.0_f64, f64::max);

        if scale == 0.0 {
            return vec![0.0; self.centroids.len()];
        }

        self.centroids
            .iter()
            .map(|c| {
                c.iter()
                    .zip(features)
                    .map(|(c, x)| {
                        let d = halved_diff(*c, *x) / scale;
                        d * d
                    })
                    .sum()
            })
            .collect()
    }

    /// Assign every row of a batch
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<ClusterLabel>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    fn check_dimensions(&self, features: &[f64]) -> Result<()> {
        if features.len() != self.n_features {
            return Err(Error::DimensionMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        Ok(())
    }
}

impl ClusterAssigner for CentroidModel {
    fn assign(&self, features: &FeatureVector) -> Result<ClusterLabel> {
        // A single observation is a batch of one
        let batch = [features.as_slice().to_vec()];
        self.predict_batch(&batch)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::internal("empty prediction batch"))
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn version(&self) -> &str {
        &self.metadata.version
    }

    fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
