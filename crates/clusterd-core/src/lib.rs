//! clusterd Core
//!
//! Core types and utilities shared across clusterd components.
//!
//! This crate provides:
//! - Feature vector and cluster label types
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClusterLabel, FeatureVector};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClusterLabel, FeatureVector};
}
