//! Cube faces and their orientation table.
//!
//! The cube is centered at the origin with side length 2. Each face maps its
//! parameter square `[-1, 1]²` onto the cube surface:
//!
//! | Face | dx | dy | dz |
//! |------|----|----|----|
//! | +z   | −1 | −x | −y |
//! | −z   |  1 |  x | −y |
//! | +x   |  x | −1 | −y |
//! | −x   | −x |  1 | −y |
//! | +y   | −y | −x |  1 |
//! | −y   |  y | −x | −1 |
//!
//! The sign conventions line the faces up with the equirectangular source
//! as a cube texture loader expects them. Changing any one of them rotates
//! or mirrors that face against its neighbours.

use crate::{OpsError, OpsResult};
use glam::DVec3;
use std::fmt;
use std::str::FromStr;

/// One of the six faces of a cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CubeFace {
    /// Positive X (`px`).
    PosX,
    /// Negative X (`nx`).
    NegX,
    /// Positive Y (`py`).
    PosY,
    /// Negative Y (`ny`).
    NegY,
    /// Positive Z (`pz`).
    PosZ,
    /// Negative Z (`nz`).
    NegZ,
}

/// Cube axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl CubeFace {
    /// All faces in loader order: `px, nx, py, ny, pz, nz`.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Position in [`CubeFace::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Conventional short label (`px`, `nx`, ...), also used as file stem.
    pub const fn label(self) -> &'static str {
        match self {
            CubeFace::PosX => "px",
            CubeFace::NegX => "nx",
            CubeFace::PosY => "py",
            CubeFace::NegY => "ny",
            CubeFace::PosZ => "pz",
            CubeFace::NegZ => "nz",
        }
    }

    /// Signed axis tag (`+x`, `-x`, ...).
    pub const fn tag(self) -> &'static str {
        match self {
            CubeFace::PosX => "+x",
            CubeFace::NegX => "-x",
            CubeFace::PosY => "+y",
            CubeFace::NegY => "-y",
            CubeFace::PosZ => "+z",
            CubeFace::NegZ => "-z",
        }
    }

    /// Maps face-local `(x, y)` in `[-1, 1]²` to a point on the cube surface.
    ///
    /// The result is not normalized.
    ///
    /// ```rust
    /// use cubesky_ops::CubeFace;
    ///
    /// let d = CubeFace::PosZ.direction(0.0, 0.0);
    /// assert_eq!(d.to_array(), [-1.0, -0.0, -0.0]);
    /// ```
    #[inline]
    pub fn direction(self, x: f64, y: f64) -> DVec3 {
        match self {
            CubeFace::PosZ => DVec3::new(-1.0, -x, -y),
            CubeFace::NegZ => DVec3::new(1.0, x, -y),
            CubeFace::PosX => DVec3::new(x, -1.0, -y),
            CubeFace::NegX => DVec3::new(-x, 1.0, -y),
            CubeFace::PosY => DVec3::new(-y, -x, 1.0),
            CubeFace::NegY => DVec3::new(y, -x, -1.0),
        }
    }

    /// The axis held at ±1 by [`direction`](Self::direction), with its sign.
    pub const fn fixed_axis(self) -> (Axis, f64) {
        match self {
            CubeFace::PosZ => (Axis::X, -1.0),
            CubeFace::NegZ => (Axis::X, 1.0),
            CubeFace::PosX => (Axis::Y, -1.0),
            CubeFace::NegX => (Axis::Y, 1.0),
            CubeFace::PosY => (Axis::Z, 1.0),
            CubeFace::NegY => (Axis::Z, -1.0),
        }
    }

    /// `(column, row)` of this face in the 4×3 horizontal cross.
    ///
    /// ```text
    ///       [+y]
    /// [-x]  [+z]  [+x]  [-z]
    ///       [-y]
    /// ```
    pub const fn cross_cell(self) -> (u32, u32) {
        match self {
            CubeFace::NegX => (0, 1),
            CubeFace::PosZ => (1, 1),
            CubeFace::PosX => (2, 1),
            CubeFace::NegZ => (3, 1),
            CubeFace::PosY => (1, 0),
            CubeFace::NegY => (1, 2),
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CubeFace {
    type Err = OpsError;

    /// Accepts either the label (`px`) or the tag (`+x`), case-insensitive.
    fn from_str(s: &str) -> OpsResult<Self> {
        let name = s.trim().to_ascii_lowercase();
        CubeFace::ALL
            .into_iter()
            .find(|face| face.label() == name || face.tag() == name)
            .ok_or_else(|| OpsError::InvalidParameter(format!("unknown cube face: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(d: DVec3, axis: Axis) -> f64 {
        match axis {
            Axis::X => d.x,
            Axis::Y => d.y,
            Axis::Z => d.z,
        }
    }

    #[test]
    fn test_index_matches_all() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn test_parse_label_and_tag() {
        assert_eq!("px".parse::<CubeFace>().unwrap(), CubeFace::PosX);
        assert_eq!("-Z".parse::<CubeFace>().unwrap(), CubeFace::NegZ);
        assert_eq!(" ny ".parse::<CubeFace>().unwrap(), CubeFace::NegY);
        assert!("top".parse::<CubeFace>().is_err());
    }

    #[test]
    fn test_fixed_axis_holds_across_face() {
        for face in CubeFace::ALL {
            let (axis, sign) = face.fixed_axis();
            for &(x, y) in &[(-1.0, -1.0), (0.3, -0.7), (1.0, 1.0), (0.0, 0.0)] {
                assert_eq!(component(face.direction(x, y), axis), sign, "{face}");
            }
        }
    }

    #[test]
    fn test_faces_cover_distinct_half_spaces() {
        let mut normals: Vec<[i8; 3]> = CubeFace::ALL
            .iter()
            .map(|f| {
                let d = f.direction(0.0, 0.0);
                [d.x as i8, d.y as i8, d.z as i8]
            })
            .collect();
        normals.sort();
        normals.dedup();
        assert_eq!(normals.len(), 6);
    }

    #[test]
    fn test_cross_cells_unique() {
        let mut cells: Vec<_> = CubeFace::ALL.iter().map(|f| f.cross_cell()).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|&(c, r)| c < 4 && r < 3));
    }
}
