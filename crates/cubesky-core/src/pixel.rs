//! Pixel aliases and channel helpers.
//!
//! Samples are stored as 8-bit sRGB-encoded values. Kernels work in `f64`
//! and convert back with [`clamp_channel`].

/// RGB triple.
pub type Rgb = [u8; 3];

/// RGBA quadruple.
pub type Rgba = [u8; 4];

/// Alpha value of a fully opaque pixel.
pub const OPAQUE: u8 = 255;

/// Clamps an already-rounded channel value into `0..=255`.
///
/// NaN maps to 0.
///
/// ```rust
/// use cubesky_core::clamp_channel;
///
/// assert_eq!(clamp_channel(-3.0), 0);
/// assert_eq!(clamp_channel(128.0), 128);
/// assert_eq!(clamp_channel(300.0), 255);
/// ```
#[inline]
pub fn clamp_channel(value: f64) -> u8 {
    // float-to-int `as` saturates and maps NaN to 0
    value.clamp(0.0, 255.0) as u8
}

/// Extends an RGB triple with opaque alpha.
#[inline]
pub fn opaque(rgb: Rgb) -> Rgba {
    [rgb[0], rgb[1], rgb[2], OPAQUE]
}
