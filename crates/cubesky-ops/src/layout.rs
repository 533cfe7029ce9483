//! Unfolded cube map layouts.
//!
//! The horizontal cross puts the four equatorial faces in one row with the
//! poles above and below `+z`:
//!
//! ```text
//!          +----+
//!          | py |
//! +----+----+----+----+
//! | nx | pz | px | nz |
//! +----+----+----+----+
//!          | ny |
//!          +----+
//! ```
//!
//! Unused cells are transparent black.

use crate::cubemap::CubeMap;
use crate::face::CubeFace;
use crate::{OpsError, OpsResult};
use cubesky_core::Image;

/// Cross width in face cells.
pub const CROSS_COLUMNS: u32 = 4;
/// Cross height in face cells.
pub const CROSS_ROWS: u32 = 3;

/// Packs a cube map into a `4R × 3R` horizontal cross.
///
/// ```rust
/// use cubesky_core::Image;
/// use cubesky_ops::{CubeMapProcessor, Interpolation, layout};
///
/// let pano = Image::filled(32, 16, [9, 9, 9, 255]);
/// let cube = CubeMapProcessor::new(Interpolation::Nearest, 4).unwrap().process(&pano).unwrap();
/// let cross = layout::assemble_cross(&cube);
/// assert_eq!(cross.dimensions(), (16, 12));
/// assert_eq!(cross.pixel(0, 0), [0, 0, 0, 0]);
/// ```
pub fn assemble_cross(cube: &CubeMap) -> Image {
    let r = cube.resolution() as usize;
    let mut out = Image::new(CROSS_COLUMNS * cube.resolution(), CROSS_ROWS * cube.resolution());
    let out_row_len = out.row_len();
    let face_row_len = r * 4;
    let bytes = out.bytes_mut();

    for (face, img) in cube.iter() {
        let (col, row) = face.cross_cell();
        let x0 = col as usize * face_row_len;
        for (y, src_row) in img.rows().enumerate() {
            let start = (row as usize * r + y) * out_row_len + x0;
            bytes[start..start + face_row_len].copy_from_slice(src_row);
        }
    }
    out
}

/// Splits a `4R × 3R` horizontal cross back into six faces.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if the image is not a 4:3 grid of square
/// cells.
pub fn split_cross(cross: &Image) -> OpsResult<CubeMap> {
    let (w, h) = cross.dimensions();
    let r = w / CROSS_COLUMNS;
    if r == 0 || w != r * CROSS_COLUMNS || h != r * CROSS_ROWS {
        return Err(OpsError::InvalidDimensions(format!(
            "{w}x{h} is not a 4x3 cross of square faces"
        )));
    }

    let face_row_len = r as usize * 4;
    let mut faces: [Image; 6] = std::array::from_fn(|_| Image::new(0, 0));
    for face in CubeFace::ALL {
        let (col, row) = face.cross_cell();
        let x0 = col as usize * face_row_len;
        let mut data = Vec::with_capacity(face_row_len * r as usize);
        for y in 0..r {
            let src_row = cross.row(row * r + y);
            data.extend_from_slice(&src_row[x0..x0 + face_row_len]);
        }
        faces[face.index()] = Image::from_rgba(r, r, data)?;
    }
    CubeMap::from_faces(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CubeMapProcessor, Interpolation};

    fn cube() -> CubeMap {
        let pano = Image::from_fn(24, 12, |x, y| [(x * 10) as u8, (y * 20) as u8, 3, 255]);
        CubeMapProcessor::new(Interpolation::Bilinear, 3)
            .unwrap()
            .process(&pano)
            .unwrap()
    }

    #[test]
    fn test_cells_hold_faces() {
        let cube = cube();
        let cross = assemble_cross(&cube);
        for (face, img) in cube.iter() {
            let (col, row) = face.cross_cell();
            for y in 0..3 {
                for x in 0..3 {
                    assert_eq!(cross.pixel(col * 3 + x, row * 3 + y), img.pixel(x, y), "{face}");
                }
            }
        }
    }

    #[test]
    fn test_empty_cells_transparent() {
        let cross = assemble_cross(&cube());
        for &(col, row) in &[(0, 0), (2, 0), (3, 0), (0, 2), (2, 2), (3, 2)] {
            assert_eq!(cross.pixel(col * 3 + 1, row * 3 + 1), [0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_split_inverts_assemble() {
        let cube = cube();
        assert_eq!(split_cross(&assemble_cross(&cube)).unwrap(), cube);
    }

    #[test]
    fn test_split_rejects_bad_aspect() {
        assert!(split_cross(&Image::new(16, 16)).is_err());
        assert!(split_cross(&Image::new(3, 2)).is_err());
        assert!(split_cross(&Image::new(17, 12)).is_err());
    }
}
