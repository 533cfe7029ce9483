//! Cube map directories.
//!
//! A cube map on disk is six files named after the face labels, for example
//! `px.png nx.png py.png ny.png pz.png nz.png`.

use crate::detect::Format;
use crate::{IoError, IoResult, WriteOptions};
use cubesky_core::Image;
use cubesky_ops::{CubeFace, CubeMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Writes the six faces of `cube` into `dir` with default options.
///
/// Returns the written paths in face order.
pub fn write_cube_map<P: AsRef<Path>>(dir: P, cube: &CubeMap, format: Format) -> IoResult<Vec<PathBuf>> {
    write_cube_map_with(dir, cube, format, &WriteOptions::default())
}

/// Writes the six faces of `cube` into `dir`, creating it if needed.
pub fn write_cube_map_with<P: AsRef<Path>>(
    dir: P,
    cube: &CubeMap,
    format: Format,
    options: &WriteOptions,
) -> IoResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if format == Format::Unknown {
        return Err(IoError::UnsupportedFormat("cannot write faces without a format".into()));
    }
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(CubeFace::ALL.len());
    for (face, image) in cube.iter() {
        let path = face_path(dir, face, format);
        trace!(face = %face, path = %path.display(), "write face");
        crate::write_as(&path, image, format, options)?;
        paths.push(path);
    }
    debug!(dir = %dir.display(), resolution = cube.resolution(), format = %format, "cube map written");
    Ok(paths)
}

/// Reads six face files from `dir`.
///
/// Each face may be PNG or JPEG independently; PNG is tried first.
///
/// # Errors
///
/// [`IoError::MissingData`] if a face has no file, or any decode error.
/// Faces that are not square or differ in size are rejected by
/// [`CubeMap::from_faces`].
pub fn read_cube_map<P: AsRef<Path>>(dir: P) -> IoResult<CubeMap> {
    let dir = dir.as_ref();
    let mut faces: [Image; 6] = std::array::from_fn(|_| Image::new(0, 0));

    for face in CubeFace::ALL {
        let path = find_face(dir, face)
            .ok_or_else(|| IoError::MissingData(format!("no {} face in {}", face, dir.display())))?;
        trace!(face = %face, path = %path.display(), "read face");
        faces[face.index()] = crate::read(&path)?;
    }

    Ok(CubeMap::from_faces(faces)?)
}

/// Path of a face file inside `dir`.
pub fn face_path(dir: &Path, face: CubeFace, format: Format) -> PathBuf {
    dir.join(format!("{}.{}", face.label(), format.extension()))
}

fn find_face(dir: &Path, face: CubeFace) -> Option<PathBuf> {
    [Format::Png, Format::Jpeg]
        .iter()
        .flat_map(|f| f.extensions())
        .map(|ext| dir.join(format!("{}.{}", face.label(), ext)))
        .find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubesky_ops::{CubeMapProcessor, Interpolation};

    fn cube() -> CubeMap {
        let pano = Image::from_fn(32, 16, |x, y| [(x * 8) as u8, (y * 16) as u8, 7, 255]);
        CubeMapProcessor::new(Interpolation::Nearest, 4)
            .unwrap()
            .process(&pano)
            .unwrap()
    }

    #[test]
    fn test_paths_in_face_order() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("faces");
        let paths = write_cube_map(&out, &cube(), Format::Png).unwrap();

        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"]);
        assert!(paths.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_png_directory_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cube = cube();
        write_cube_map(dir.path(), &cube, Format::Png).unwrap();
        assert_eq!(read_cube_map(dir.path()).unwrap(), cube);
    }

    #[test]
    fn test_missing_face() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_cube_map(dir.path(), &cube(), Format::Jpeg).unwrap();
        fs::remove_file(&paths[3]).unwrap();

        let err = read_cube_map(dir.path()).unwrap_err();
        assert!(matches!(err, IoError::MissingData(ref m) if m.contains("ny")), "{err}");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            write_cube_map(dir.path(), &cube(), Format::Unknown),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
