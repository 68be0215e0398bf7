//! Cluster assignment trait

use clusterd_core::{ClusterLabel, FeatureVector, Result};

/// Trait for anything that maps an observation to a cluster
///
/// Implementations must be read-only: `assign` takes `&self` and is called
/// concurrently from every request task.
pub trait ClusterAssigner: Send + Sync {
    /// Assign one observation to its cluster
    fn assign(&self, features: &FeatureVector) -> Result<ClusterLabel>;

    /// Get the model name
    fn name(&self) -> &str;

    /// Get the model version
    fn version(&self) -> &str;

    /// Number of clusters the assigner can return
    fn n_clusters(&self) -> usize;

    /// Dimensionality every observation must have
    fn n_features(&self) -> usize;
}
