//! Equirectangular panorama to cube map conversion.
//!
//! Each output pixel is inverse-mapped through [`projection`](crate::projection)
//! into the source panorama and sampled with the selected
//! [`Interpolation`]. Faces are independent of each other and every pixel is
//! written exactly once, so the result is deterministic regardless of
//! threading.
//!
//! When the `parallel` feature is enabled, rows within a face are rendered
//! with rayon.
//!
//! # Example
//!
//! ```rust
//! use cubesky_core::Image;
//! use cubesky_ops::{CubeFace, CubeMapProcessor, Interpolation};
//!
//! let pano = Image::filled(64, 32, [20, 40, 60, 255]);
//! let processor = CubeMapProcessor::new(Interpolation::Nearest, 8).unwrap();
//! let cube = processor.process(&pano).unwrap();
//!
//! assert_eq!(cube[CubeFace::PosY].dimensions(), (8, 8));
//! assert_eq!(cube[CubeFace::NegZ].pixel(3, 3), [20, 40, 60, 255]);
//! ```

use crate::face::CubeFace;
use crate::kernel::Interpolation;
use crate::projection::source_coordinate;
use crate::{OpsError, OpsResult};
use cubesky_core::{Image, OPAQUE};
use std::ops::Index;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug_span, info, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Face resolution used when none is configured.
pub const DEFAULT_RESOLUTION: u32 = 1024;

/// Conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CubeMapOptions {
    /// Reconstruction kernel, applied to all six faces.
    pub interpolation: Interpolation,
    /// Side length of each output face in pixels.
    pub resolution: u32,
}

impl Default for CubeMapOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl CubeMapOptions {
    /// Creates options with the given kernel and face resolution.
    pub fn new(interpolation: Interpolation, resolution: u32) -> Self {
        Self {
            interpolation,
            resolution,
        }
    }

    /// Checks that the resolution is positive.
    pub fn validate(&self) -> OpsResult<()> {
        if self.resolution == 0 {
            return Err(OpsError::InvalidParameter(
                "resolution must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// The six faces of a cube map, each `R×R` and fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeMap {
    faces: [Image; 6],
    resolution: u32,
}

impl CubeMap {
    /// Assembles a cube map from faces in [`CubeFace::ALL`] order.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] unless all faces are square, non-empty
    /// and the same size.
    pub fn from_faces(faces: [Image; 6]) -> OpsResult<Self> {
        let resolution = faces[0].width();
        if resolution == 0 {
            return Err(OpsError::InvalidDimensions("cube faces must not be empty".into()));
        }
        for (face, img) in CubeFace::ALL.iter().zip(&faces) {
            if img.dimensions() != (resolution, resolution) {
                return Err(OpsError::InvalidDimensions(format!(
                    "face {} is {}x{}, expected {}x{}",
                    face,
                    img.width(),
                    img.height(),
                    resolution,
                    resolution
                )));
            }
        }
        Ok(Self { faces, resolution })
    }

    /// Side length of every face.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Returns one face.
    #[inline]
    pub fn face(&self, face: CubeFace) -> &Image {
        &self.faces[face.index()]
    }

    /// Iterates over `(face, image)` in [`CubeFace::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (CubeFace, &Image)> {
        CubeFace::ALL.into_iter().zip(self.faces.iter())
    }

    /// Consumes the cube map, returning faces in [`CubeFace::ALL`] order.
    pub fn into_faces(self) -> [Image; 6] {
        self.faces
    }
}

impl Index<CubeFace> for CubeMap {
    type Output = Image;

    fn index(&self, face: CubeFace) -> &Image {
        self.face(face)
    }
}

/// Projects equirectangular panoramas onto cube faces.
#[derive(Debug, Clone, Copy)]
pub struct CubeMapProcessor {
    options: CubeMapOptions,
}

impl Default for CubeMapProcessor {
    fn default() -> Self {
        Self {
            options: CubeMapOptions::default(),
        }
    }
}

impl CubeMapProcessor {
    /// Creates a processor.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `resolution` is 0.
    pub fn new(interpolation: Interpolation, resolution: u32) -> OpsResult<Self> {
        Self::from_options(CubeMapOptions::new(interpolation, resolution))
    }

    /// Creates a processor from validated options.
    pub fn from_options(options: CubeMapOptions) -> OpsResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The active options.
    #[inline]
    pub fn options(&self) -> &CubeMapOptions {
        &self.options
    }

    /// Renders all six faces.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] if `src` is empty.
    pub fn process(&self, src: &Image) -> OpsResult<CubeMap> {
        self.run(src, None)
    }

    /// Renders all six faces, polling `cancel` before each face.
    ///
    /// # Errors
    ///
    /// [`OpsError::Cancelled`] once the flag is observed set, in addition to
    /// the errors of [`process`](Self::process).
    pub fn process_cancellable(&self, src: &Image, cancel: &AtomicBool) -> OpsResult<CubeMap> {
        self.run(src, Some(cancel))
    }

    fn run(&self, src: &Image, cancel: Option<&AtomicBool>) -> OpsResult<CubeMap> {
        check_source(src)?;
        let CubeMapOptions {
            interpolation,
            resolution,
        } = self.options;
        let _span = debug_span!(
            "cubemap",
            width = src.width(),
            height = src.height(),
            resolution,
            %interpolation
        )
        .entered();
        let start = Instant::now();

        let mut faces: [Image; 6] = std::array::from_fn(|_| Image::new(0, 0));
        for (completed, face) in CubeFace::ALL.into_iter().enumerate() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                info!(completed, "cube map cancelled");
                return Err(OpsError::Cancelled { completed });
            }
            trace!(%face, "rendering face");
            faces[face.index()] = render(src, face, interpolation, resolution)?;
        }

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
            "cube map rendered"
        );
        Ok(CubeMap { faces, resolution })
    }

    /// Renders a single face.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] if `src` is empty.
    pub fn render_face(&self, src: &Image, face: CubeFace) -> OpsResult<Image> {
        check_source(src)?;
        render(src, face, self.options.interpolation, self.options.resolution)
    }
}

/// Converts an equirectangular panorama with the given options.
///
/// Shorthand for [`CubeMapProcessor::from_options`] followed by
/// [`CubeMapProcessor::process`].
pub fn equirect_to_cubemap(src: &Image, options: &CubeMapOptions) -> OpsResult<CubeMap> {
    CubeMapProcessor::from_options(*options)?.process(src)
}

fn check_source(src: &Image) -> OpsResult<()> {
    if src.is_empty() {
        return Err(OpsError::InvalidDimensions(format!(
            "source image is {}x{}",
            src.width(),
            src.height()
        )));
    }
    Ok(())
}

fn render(src: &Image, face: CubeFace, interpolation: Interpolation, resolution: u32) -> OpsResult<Image> {
    let row_len = resolution as usize * 4;
    let mut buf = vec![0u8; row_len * resolution as usize];
    render_rows(src, face, interpolation, resolution, &mut buf, row_len);
    Ok(Image::from_rgba(resolution, resolution, buf)?)
}

/// Renders face rows in parallel.
#[cfg(feature = "parallel")]
fn render_rows(
    src: &Image,
    face: CubeFace,
    interpolation: Interpolation,
    resolution: u32,
    buf: &mut [u8],
    row_len: usize,
) {
    buf.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(py, row)| render_row(src, face, interpolation, resolution, py as u32, row));
}

/// Renders face rows (single-threaded fallback).
#[cfg(not(feature = "parallel"))]
fn render_rows(
    src: &Image,
    face: CubeFace,
    interpolation: Interpolation,
    resolution: u32,
    buf: &mut [u8],
    row_len: usize,
) {
    buf.chunks_mut(row_len)
        .enumerate()
        .for_each(|(py, row)| render_row(src, face, interpolation, resolution, py as u32, row));
}

#[inline]
fn render_row(
    src: &Image,
    face: CubeFace,
    interpolation: Interpolation,
    resolution: u32,
    py: u32,
    row: &mut [u8],
) {
    let (w, h) = src.dimensions();
    for (px, out) in row.chunks_exact_mut(4).enumerate() {
        let (sx, sy) = source_coordinate(face, px as u32, py, resolution, w, h);
        let [r, g, b] = interpolation.sample(src, sx, sy);
        out.copy_from_slice(&[r, g, b, OPAQUE]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Image {
        Image::from_fn(w, h, |x, y| [(x * 255 / w) as u8, (y * 255 / h) as u8, 128, 77])
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let err = CubeMapProcessor::new(Interpolation::Nearest, 0).unwrap_err();
        assert!(matches!(err, OpsError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_empty_source() {
        let processor = CubeMapProcessor::new(Interpolation::Bilinear, 4).unwrap();
        let err = processor.process(&Image::new(0, 0)).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));
    }

    #[test]
    fn test_six_opaque_faces() {
        let src = gradient(32, 16);
        for interp in Interpolation::ALL {
            let cube = CubeMapProcessor::new(interp, 5).unwrap().process(&src).unwrap();
            assert_eq!(cube.resolution(), 5);
            assert_eq!(cube.iter().count(), 6);
            for (_, img) in cube.iter() {
                assert_eq!(img.dimensions(), (5, 5));
                assert!(img.is_opaque());
            }
        }
    }

    #[test]
    fn test_render_face_matches_process() {
        let src = gradient(40, 20);
        let processor = CubeMapProcessor::new(Interpolation::Bicubic, 6).unwrap();
        let cube = processor.process(&src).unwrap();
        for face in CubeFace::ALL {
            assert_eq!(&processor.render_face(&src, face).unwrap(), &cube[face]);
        }
    }

    #[test]
    fn test_cancel_before_first_face() {
        let processor = CubeMapProcessor::default();
        let flag = AtomicBool::new(true);
        let err = processor
            .process_cancellable(&gradient(8, 4), &flag)
            .unwrap_err();
        assert!(matches!(err, OpsError::Cancelled { completed: 0 }));
    }

    #[test]
    fn test_uncancelled_run_completes() {
        let processor = CubeMapProcessor::new(Interpolation::Nearest, 3).unwrap();
        let flag = AtomicBool::new(false);
        let cube = processor.process_cancellable(&gradient(8, 4), &flag).unwrap();
        assert_eq!(cube, processor.process(&gradient(8, 4)).unwrap());
    }

    #[test]
    fn test_from_faces_validates_sizes() {
        let mut faces: [Image; 6] = std::array::from_fn(|_| Image::new(4, 4));
        assert!(CubeMap::from_faces(faces.clone()).is_ok());
        faces[3] = Image::new(4, 5);
        let err = CubeMap::from_faces(faces).unwrap_err();
        assert!(err.to_string().contains("ny"));
    }

    #[test]
    fn test_default_options() {
        let options = CubeMapOptions::default();
        assert_eq!(options.interpolation, Interpolation::Bilinear);
        assert_eq!(options.resolution, DEFAULT_RESOLUTION);
        assert!(options.validate().is_ok());
    }
}
