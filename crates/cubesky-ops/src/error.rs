//! Error types for cube map operations.

use thiserror::Error;

/// Error type for cube map operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The caller's cancellation flag was raised between faces.
    #[error("cancelled after {completed} of 6 faces")]
    Cancelled {
        /// Faces fully rendered before the flag was observed.
        completed: usize,
    },

    /// Raster construction failed.
    #[error(transparent)]
    Core(#[from] cubesky_core::Error),
}

/// Result type for cube map operations.
pub type OpsResult<T> = Result<T, OpsError>;
