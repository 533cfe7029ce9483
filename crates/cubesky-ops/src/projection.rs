//! Cube surface to equirectangular coordinate mapping.
//!
//! For output pixel `(px, py)` of an `R×R` face:
//!
//! 1. face-local `x = 2(px + 0.5)/R − 1`, same for `y`
//! 2. [`CubeFace::direction`] gives a point on the cube
//! 3. longitude `atan2(dy, dx)` wrapped into `[0, 2π)`, latitude `acos(dz / r)`
//! 4. `srcX = W·lon/2π − 0.5`, `srcY = H·lat/π − 0.5`
//!
//! Source coordinates may land up to one unit outside the image near the
//! poles and the longitude seam; the kernels clamp them.

use crate::face::CubeFace;
use glam::DVec3;
use std::f64::consts::{PI, TAU};

/// Face-local coordinate of the center of pixel `p` on an `R`-wide face.
#[inline]
pub fn face_coordinate(p: u32, resolution: u32) -> f64 {
    2.0 * (f64::from(p) + 0.5) / f64::from(resolution) - 1.0
}

/// Converts a cube direction to `(longitude, latitude)` in radians.
///
/// Longitude is in `[0, 2π)`, latitude in `[0, π]` measured from `+z`.
#[inline]
pub fn direction_to_lon_lat(d: DVec3) -> (f64, f64) {
    let r = d.length();
    // Every face pins one axis at ±1, so r >= 1
    debug_assert!(r > 0.0, "direction at cube center");
    let lon = d.y.atan2(d.x).rem_euclid(TAU);
    let lat = (d.z / r).acos();
    (lon, lat)
}

/// Maps a cube direction to fractional source pixel coordinates.
#[inline]
pub fn direction_to_source(d: DVec3, width: u32, height: u32) -> (f64, f64) {
    let (lon, lat) = direction_to_lon_lat(d);
    let sx = f64::from(width) * lon / PI / 2.0 - 0.5;
    let sy = f64::from(height) * lat / PI - 0.5;
    (sx, sy)
}

/// Source coordinates sampled for output pixel `(px, py)` of `face`.
///
/// ```rust
/// use cubesky_ops::{CubeFace, projection::source_coordinate};
///
/// // The +x face looks down -y, a quarter turn before the seam
/// let (sx, sy) = source_coordinate(CubeFace::PosX, 0, 0, 1, 400, 200);
/// assert!((sx - 299.5).abs() < 1e-9);
/// assert!((sy - 99.5).abs() < 1e-9);
/// ```
#[inline]
pub fn source_coordinate(
    face: CubeFace,
    px: u32,
    py: u32,
    resolution: u32,
    width: u32,
    height: u32,
) -> (f64, f64) {
    let x = face_coordinate(px, resolution);
    let y = face_coordinate(py, resolution);
    direction_to_source(face.direction(x, y), width, height)
}
