//! Error types for clusterd

/// Result type alias using clusterd's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for clusterd operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model artifact could not be read or decoded
    #[error("artifact error: {0}")]
    Artifact(String),

    /// The decoded model violates its shape invariants
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Feature vector length does not match the model
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Malformed request input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Numeric failure inside the assignment call
    #[error("computation error: {0}")]
    Computation(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new invalid model error
    pub fn invalid_model(msg: impl Into<String>) -> Self {
        Self::InvalidModel(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new computation error
    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. } | Self::InvalidInput(_))
    }

    /// Short machine-readable name, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Artifact(_) => "artifact",
            Self::InvalidModel(_) => "invalid_model",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::InvalidInput(_) => "invalid_input",
            Self::Computation(_) => "computation",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::DimensionMismatch { expected: 2, actual: 3 }.is_client_error());
        assert!(Error::invalid_input("features must be numbers").is_client_error());
        assert!(!Error::computation("overflow").is_client_error());
        assert!(!Error::artifact("missing").is_client_error());
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch { expected: 2, actual: 5 };
        assert_eq!(err.to_string(), "expected 2 features, got 5");
        assert_eq!(err.kind(), "dimension_mismatch");
    }
}
