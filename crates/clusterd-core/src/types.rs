//! Core types for clusterd

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// One observation: an ordered sequence of numeric features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Create a feature vector, rejecting non-finite values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::invalid_input(format!(
                "feature at index {} is not a finite number",
                pos
            )));
        }
        Ok(Self(values))
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no features
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw values
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Index of a centroid within the loaded model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterLabel(usize);

impl ClusterLabel {
    /// Wrap a centroid index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The centroid index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<ClusterLabel> for usize {
    fn from(label: ClusterLabel) -> Self {
        label.0
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_rejects_nan() {
        let err = FeatureVector::new(vec![1.0, f64::NAN]).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_feature_vector_serde_is_plain_array() {
        let v: FeatureVector = serde_json::from_str("[0.1, 0.2]").unwrap();
        assert_eq!(v.as_slice(), &[0.1, 0.2]);
        assert_eq!(v.len(), 2);
        assert!(!v.is_empty());
        assert!(FeatureVector::new(vec![]).unwrap().is_empty());
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.1,0.2]");
    }

    #[test]
    fn test_cluster_label_serializes_as_integer() {
        let label = ClusterLabel::new(3);
        assert_eq!(serde_json::to_string(&label).unwrap(), "3");
        assert_eq!(label.to_string(), "3");
    }
}
