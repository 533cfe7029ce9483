//! # cubesky-core
//!
//! Core raster types shared by every cubesky crate.
//!
//! - [`Image`] - Owned RGBA8 buffer, row-major, copy-on-write
//! - [`Rgb`], [`Rgba`] - Pixel aliases and small helpers
//! - [`Error`] - Buffer construction and bounds errors
//!
//! ## Crate Structure
//!
//! ```text
//! cubesky-core (this crate)
//!    ^
//!    |
//!    +-- cubesky-ops (cube faces, kernels, projector)
//!    +-- cubesky-io (PNG/JPEG decode and encode)
//!    +-- cubesky-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::Image;
pub use pixel::{OPAQUE, Rgb, Rgba, clamp_channel};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::pixel::{OPAQUE, Rgb, Rgba};
}
