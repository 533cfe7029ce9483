//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported bit depth or colour type.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Missing required data.
    #[error("missing data: {0}")]
    MissingData(String),

    /// Decoded samples did not form a valid raster.
    #[error(transparent)]
    Core(#[from] cubesky_core::Error),

    /// Cube map assembly failed.
    #[error(transparent)]
    Ops(#[from] cubesky_ops::OpsError),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
