//! Integration tests for cubesky crates.
//!
//! End-to-end checks that decode a panorama from disk, project it and
//! write the faces back out.

pub mod golden;

#[cfg(test)]
mod tests {
    use cubesky_core::Image;
    use cubesky_io::{Format, IoError, read, read_cube_map, write, write_cube_map};
    use cubesky_ops::{CubeFace, CubeMapProcessor, Interpolation, layout};
    use std::sync::atomic::AtomicBool;
    use tempfile::tempdir;

    /// Sky-like gradient: blue overhead, brown below the horizon.
    fn sky(w: u32, h: u32) -> Image {
        Image::from_fn(w, h, |x, y| {
            let t = y * 255 / (h - 1).max(1);
            let hue = (x * 255 / w) as u8;
            if y < h / 2 {
                [(t / 2) as u8, (t / 2 + 64) as u8, 255 - t as u8 / 4, 255]
            } else {
                [120, 80 + hue / 8, 40, 255]
            }
        })
    }

    /// Test full pipeline: decode -> project -> encode -> reload
    #[test]
    fn test_png_pipeline() {
        let dir = tempdir().unwrap();
        let pano_path = dir.path().join("sky.png");
        write(&pano_path, &sky(128, 64)).unwrap();

        let pano = read(&pano_path).unwrap();
        let cube = CubeMapProcessor::new(Interpolation::Bicubic, 32)
            .unwrap()
            .process(&pano)
            .unwrap();

        let faces_dir = dir.path().join("faces");
        let paths = write_cube_map(&faces_dir, &cube, Format::Png).unwrap();
        assert_eq!(paths.len(), 6);

        let reloaded = read_cube_map(&faces_dir).unwrap();
        assert_eq!(reloaded, cube);
    }

    #[test]
    fn test_jpeg_pipeline() {
        let dir = tempdir().unwrap();
        let pano_path = dir.path().join("sky.jpg");
        write(&pano_path, &sky(256, 128)).unwrap();

        let pano = read(&pano_path).unwrap();
        assert!(pano.is_opaque());

        let cube = CubeMapProcessor::new(Interpolation::Lanczos, 16)
            .unwrap()
            .process(&pano)
            .unwrap();
        let paths = write_cube_map(dir.path().join("faces"), &cube, Format::Jpeg).unwrap();
        for path in &paths {
            assert_eq!(path.extension().unwrap(), "jpg");
            let face = read(path).unwrap();
            assert_eq!(face.dimensions(), (16, 16));
        }
    }

    #[test]
    fn test_sky_up_ground_down() {
        let cube = CubeMapProcessor::new(Interpolation::Bilinear, 8)
            .unwrap()
            .process(&sky(128, 64))
            .unwrap();
        // Blue dominates the upward face, not the downward one
        let centre = |face: CubeFace| cube[face].pixel(4, 4);
        let up = centre(CubeFace::PosY);
        let down = centre(CubeFace::NegY);
        assert!(up[2] > up[0], "{up:?}");
        assert!(down[0] > down[2], "{down:?}");
    }

    #[test]
    fn test_cross_from_disk() {
        let dir = tempdir().unwrap();
        let cube = CubeMapProcessor::new(Interpolation::Nearest, 8)
            .unwrap()
            .process(&sky(64, 32))
            .unwrap();
        write_cube_map(dir.path(), &cube, Format::Png).unwrap();

        let cross = layout::assemble_cross(&read_cube_map(dir.path()).unwrap());
        let cross_path = dir.path().join("cross.png");
        write(&cross_path, &cross).unwrap();

        let loaded = read(&cross_path).unwrap();
        assert_eq!(loaded.dimensions(), (32, 24));
        assert_eq!(layout::split_cross(&loaded).unwrap(), cube);
    }

    #[test]
    fn test_undecodable_input_never_projects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sky.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();
        assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = AtomicBool::new(true);
        let err = CubeMapProcessor::new(Interpolation::Bilinear, 4)
            .unwrap()
            .process_cancellable(&sky(32, 16), &cancel)
            .unwrap_err();
        assert!(matches!(err, cubesky_ops::OpsError::Cancelled { completed: 0 }));
    }
}
