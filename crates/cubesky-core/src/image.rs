//! RGBA8 image buffer.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, four interleaved
//! bytes per pixel:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cubesky_core::Image;
//!
//! let mut img = Image::new(64, 32);
//! img.set_pixel(10, 5, [255, 128, 0, 255]);
//! assert_eq!(img.rgb(10, 5), [255, 128, 0]);
//! ```

use crate::pixel::{OPAQUE, Rgb, Rgba};
use crate::{Error, Result};
use std::sync::Arc;

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA8 raster.
///
/// The pixel buffer lives in an [`Arc<Vec<u8>>`], so cloning shares the
/// data. Mutating methods copy on write.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    data: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates an image filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: Arc::new(vec![0u8; byte_len(width, height)]),
            width,
            height,
        }
    }

    /// Creates an image filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Self {
        let mut img = Self::new(width, height);
        img.fill(pixel);
        img
    }

    /// Creates an image from interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if either side is zero,
    /// [`Error::BufferSize`] if `data.len() != width * height * 4`.
    ///
    /// ```rust
    /// use cubesky_core::Image;
    ///
    /// let img = Image::from_rgba(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    /// assert_eq!(img.pixel(1, 0), [5, 6, 7, 8]);
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates an opaque image from interleaved RGB bytes.
    ///
    /// # Errors
    ///
    /// Same as [`from_rgba`](Self::from_rgba), against `width * height * 3`.
    pub fn from_rgb(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let rgba: Vec<u8> = data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], OPAQUE])
            .collect();
        Ok(Self {
            data: Arc::new(rgba),
            width,
            height,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    ///
    /// ```rust
    /// use cubesky_core::Image;
    ///
    /// let ramp = Image::from_fn(4, 1, |x, _| [x as u8 * 10, 0, 0, 255]);
    /// assert_eq!(ramp.rgb(3, 0), [30, 0, 0]);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgba,
    {
        let mut data = Vec::with_capacity(byte_len(width, height));
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes (copy-on-write).
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the image and returns its bytes, cloning only if shared.
    pub fn into_raw(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Returns the colour channels at `(x, y)`, ignoring alpha.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    /// Bounds-checked [`pixel`](Self::pixel).
    pub fn checked_pixel(&self, x: u32, y: u32) -> Result<Rgba> {
        if x < self.width && y < self.height {
            Ok(self.pixel(x, y))
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        Arc::make_mut(&mut self.data)[o..o + CHANNELS].copy_from_slice(&pixel);
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: Rgba) {
        for chunk in Arc::make_mut(&mut self.data).chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Row `y` as a byte slice of length `width * 4`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Bytes per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Iterates over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact(0) panics, and an empty image has no rows anyway
        self.data.chunks_exact(self.row_len().max(1))
    }

    /// Returns `true` if every alpha sample is 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(CHANNELS).all(|px| px[3] == OPAQUE)
    }

    /// Interleaved RGB bytes with alpha dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.data
            .chunks_exact(CHANNELS)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[inline]
fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let img = Image::new(3, 2);
        assert_eq!(img.as_bytes().len(), 24);
        assert_eq!(img.pixel(2, 1), [0, 0, 0, 0]);
        assert!(!img.is_opaque());
    }

    #[test]
    fn test_from_rgba_rejects_bad_length() {
        let err = Image::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::BufferSize { expected: 16, actual: 15 }));
    }

    #[test]
    fn test_from_rgba_rejects_zero_side() {
        let err = Image::from_rgba(0, 4, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 4, .. }));
    }

    #[test]
    fn test_from_rgb_adds_alpha() {
        let img = Image::from_rgb(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.pixel(0, 0), [1, 2, 3, 255]);
        assert_eq!(img.pixel(1, 0), [4, 5, 6, 255]);
        assert!(img.is_opaque());
        assert_eq!(img.to_rgb_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_row_major_layout() {
        let img = Image::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]);
        assert_eq!(img.row(1), &[0, 1, 0, 255, 1, 1, 0, 255, 2, 1, 0, 255]);
        assert_eq!(img.rows().count(), 2);
    }

    #[test]
    fn test_copy_on_write() {
        let a = Image::filled(2, 2, [9, 9, 9, 255]);
        let mut b = a.clone();
        b.set_pixel(0, 0, [1, 1, 1, 255]);
        assert_eq!(a.pixel(0, 0), [9, 9, 9, 255]);
        assert_eq!(b.pixel(0, 0), [1, 1, 1, 255]);
    }

    #[test]
    fn test_checked_pixel() {
        let img = Image::new(4, 4);
        assert!(img.checked_pixel(3, 3).is_ok());
        assert!(img.checked_pixel(4, 0).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_into_raw_shared() {
        let a = Image::filled(1, 1, [1, 2, 3, 4]);
        let b = a.clone();
        assert_eq!(b.into_raw(), vec![1, 2, 3, 4]);
        assert_eq!(a.into_raw(), vec![1, 2, 3, 4]);
    }
}
