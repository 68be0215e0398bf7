//! clusterd Model
//!
//! The pre-trained centroid model served by clusterd.
//!
//! A model is a fixed set of centroids in a fixed-dimensional feature space.
//! It is loaded once from an artifact file and then only read:
//! - [`model_loader`] resolves and decodes the artifact (JSON or YAML)
//! - [`model`] validates the centroid set and assigns observations
//! - [`assigner`] is the trait the HTTP layer depends on

pub mod assigner;
pub mod model;
pub mod model_loader;

pub use assigner::ClusterAssigner;
pub use model::{CentroidModel, ModelArtifact, ModelMetadata};
pub use model_loader::{load_model, ModelConfig, ModelFormat};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::assigner::ClusterAssigner;
    pub use crate::model::{CentroidModel, ModelMetadata};
    pub use crate::model_loader::{load_model, ModelConfig, ModelFormat};
}
