//! # cubesky-io
//!
//! Image acquisition and re-encoding for cubesky.
//!
//! Decodes panoramas into [`cubesky_core::Image`] and writes faces back out:
//!
//! - **PNG** - Lossless, keeps alpha
//! - **JPEG** - Lossy, opaque, configurable quality
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cubesky_io::{read, write_cube_map, Format};
//! use cubesky_ops::{CubeMapProcessor, Interpolation};
//!
//! let pano = read("sky.jpg")?;
//! let cube = CubeMapProcessor::new(Interpolation::Bicubic, 512)?.process(&pano)?;
//! let paths = write_cube_map("sky_faces", &cube, Format::Png)?;
//! ```
//!
//! A failed decode returns an [`IoError`] before any projection work
//! starts.

#![warn(missing_docs)]

pub mod cubemap;
pub mod detect;
mod error;
pub mod jpeg;
pub mod png;

pub use cubemap::{read_cube_map, write_cube_map, write_cube_map_with};
pub use detect::Format;
pub use error::{IoError, IoResult};

use cubesky_core::Image;
use std::path::Path;

/// Encoder settings shared by all writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// JPEG quality, 1-100. Ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: jpeg::DEFAULT_QUALITY,
        }
    }
}

/// Reads an image, detecting the format from its content.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] if neither magic bytes nor the extension
/// identify a supported format.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    match Format::detect(path)? {
        Format::Png => png::read(path),
        Format::Jpeg => jpeg::read(path),
        Format::Unknown => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Decodes an encoded image held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    match Format::from_bytes(data) {
        Format::Png => png::read_from_memory(data),
        Format::Jpeg => jpeg::read_from_memory(data),
        Format::Unknown => Err(IoError::UnsupportedFormat("unrecognised image data".into())),
    }
}

/// Writes an image, choosing the format from the file extension.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    write_with(path, image, &WriteOptions::default())
}

/// Writes an image with explicit encoder settings.
pub fn write_with<P: AsRef<Path>>(path: P, image: &Image, options: &WriteOptions) -> IoResult<()> {
    let path = path.as_ref();
    write_as(path, image, Format::from_extension(path), options)
}

/// Writes an image in a given format regardless of the extension.
pub fn write_as<P: AsRef<Path>>(
    path: P,
    image: &Image,
    format: Format,
    options: &WriteOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    match format {
        Format::Png => png::write(path, image),
        Format::Jpeg => jpeg::write_with_quality(path, image, options.jpeg_quality),
        Format::Unknown => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Encodes an image to bytes in the given format.
pub fn write_to_memory(image: &Image, format: Format) -> IoResult<Vec<u8>> {
    match format {
        Format::Png => png::write_to_memory(image),
        Format::Jpeg => jpeg::write_to_memory(image, jpeg::DEFAULT_QUALITY),
        Format::Unknown => Err(IoError::UnsupportedFormat("unknown".into())),
    }
}
