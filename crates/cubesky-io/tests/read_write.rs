//! File-level read/write tests.

use cubesky_core::Image;
use cubesky_io::{Format, IoError, WriteOptions, read, read_from_memory, write, write_to_memory, write_with};
use tempfile::TempDir;

fn pano() -> Image {
    Image::from_fn(64, 32, |x, y| [(x * 4) as u8, (y * 8) as u8, ((x + y) * 2) as u8, 255])
}

#[test]
fn png_file_roundtrip_is_exact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sky.png");
    write(&path, &pano()).unwrap();
    assert_eq!(Format::detect(&path).unwrap(), Format::Png);
    assert_eq!(read(&path).unwrap(), pano());
}

#[test]
fn jpeg_file_roundtrip_keeps_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sky.jpeg");
    write_with(&path, &pano(), &WriteOptions { jpeg_quality: 80 }).unwrap();
    assert_eq!(Format::detect(&path).unwrap(), Format::Jpeg);

    let loaded = read(&path).unwrap();
    assert_eq!(loaded.dimensions(), (64, 32));
    assert!(loaded.is_opaque());
}

#[test]
fn content_wins_over_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mislabelled.jpg");
    std::fs::write(&path, write_to_memory(&pano(), Format::Png).unwrap()).unwrap();
    assert_eq!(Format::detect(&path).unwrap(), Format::Png);
    assert_eq!(read(&path).unwrap(), pano());
}

#[test]
fn memory_dispatch_by_magic() {
    for format in [Format::Png, Format::Jpeg] {
        let bytes = write_to_memory(&pano(), format).unwrap();
        assert_eq!(Format::from_bytes(&bytes), format);
        assert_eq!(read_from_memory(&bytes).unwrap().dimensions(), (64, 32));
    }
}

#[test]
fn undecodable_input_is_an_error() {
    let dir = TempDir::new().unwrap();

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "not an image").unwrap();
    assert!(matches!(read(&text), Err(IoError::UnsupportedFormat(_))));

    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"\x89PNG\r\n\x1a\n\0\0\0\0").unwrap();
    assert!(matches!(read(&broken), Err(IoError::DecodeError(_))));

    assert!(matches!(read(dir.path().join("absent.png")), Err(IoError::Io(_))));
}

#[test]
fn unknown_extension_cannot_be_written() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        write(dir.path().join("sky.webp"), &pano()),
        Err(IoError::UnsupportedFormat(_))
    ));
}
