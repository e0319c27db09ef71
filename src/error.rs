//! Error types for segmentation runs

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or running a segmentation
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid run configuration (bad `k`, tolerance, iteration cap, or
    /// fewer distinct records than requested clusters)
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Unrecognized clustering algorithm selector
    #[error("Unsupported algorithm: {name:?} (only \"k-means\" is available)")]
    UnsupportedAlgorithm {
        /// The selector that was requested
        name: String,
    },

    /// Internal numeric invariant violation
    #[error("Computation error: {message}")]
    ComputationError {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a new InvalidConfiguration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a new UnsupportedAlgorithm error
    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm { name: name.into() }
    }

    /// Create a new ComputationError
    pub fn computation_error(message: impl Into<String>) -> Self {
        Self::ComputationError {
            message: message.into(),
        }
    }
}
