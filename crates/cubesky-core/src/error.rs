//! Error types for raster construction and access.
//!
//! # Usage
//!
//! ```rust
//! use cubesky_core::{Error, Image};
//!
//! let err = Image::from_rgba(2, 2, vec![0; 3]).unwrap_err();
//! assert!(matches!(err, Error::BufferSize { expected: 16, actual: 3 }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by [`Image`](crate::Image) construction and access.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate.
        x: u32,
        /// Y coordinate.
        y: u32,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },

    /// Width or height is unusable.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Why the dimensions were rejected.
        reason: String,
    },

    /// Pixel buffer length does not match the dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize {
        /// Bytes implied by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`].
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`].
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` for bounds errors.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
