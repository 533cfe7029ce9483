//! # cubesky-ops
//!
//! Equirectangular panorama to cube map resampling.
//!
//! Projects a single 360° equirectangular image onto the six faces of a cube
//! by inverse-mapping every output pixel through spherical coordinates and
//! sampling the source with a selectable reconstruction kernel.
//!
//! # Modules
//!
//! - [`face`] - Cube faces and their orientation table
//! - [`kernel`] - Nearest, bilinear, bicubic and Lanczos kernels
//! - [`projection`] - Cube direction to source coordinate mapping
//! - [`cubemap`] - The [`CubeMapProcessor`] and its [`CubeMap`] result
//! - [`layout`] - Horizontal cross packing
//!
//! # Example
//!
//! ```rust
//! use cubesky_core::Image;
//! use cubesky_ops::{CubeMapOptions, Interpolation, equirect_to_cubemap};
//!
//! let pano = Image::filled(256, 128, [90, 140, 200, 255]);
//! let options = CubeMapOptions::new(Interpolation::Bicubic, 64);
//! let cube = equirect_to_cubemap(&pano, &options).unwrap();
//! assert_eq!(cube.resolution(), 64);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Row-parallel face rendering with rayon
//! - `serde` - Serialize/deserialize [`CubeMapOptions`] and [`Interpolation`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod cubemap;
pub mod face;
pub mod kernel;
pub mod layout;
pub mod projection;

pub use cubemap::{CubeMap, CubeMapOptions, CubeMapProcessor, DEFAULT_RESOLUTION, equirect_to_cubemap};
pub use error::{OpsError, OpsResult};
pub use face::{Axis, CubeFace};
pub use kernel::Interpolation;
