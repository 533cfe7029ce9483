//! JPEG format support.
//!
//! JPEG has no alpha channel. Decoded images come back opaque, and alpha is
//! dropped on encode. Grayscale and CMYK sources are converted to RGB.
//!
//! ```rust,ignore
//! use cubesky_io::jpeg;
//!
//! let panorama = jpeg::read("sky.jpg")?;
//! jpeg::write_with_quality("sky_q95.jpg", &panorama, 95)?;
//! ```

use crate::{IoError, IoResult};
use cubesky_core::Image;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a JPEG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    decode(Cursor::new(data))
}

fn decode<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let rgb: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l16| [l16[0], l16[0], l16[0]])
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels.chunks_exact(4).flat_map(cmyk_to_rgb).collect(),
    };

    Ok(Image::from_rgb(u32::from(info.width), u32::from(info.height), &rgb)?)
}

// Approximate, no colour management
fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 1.0 - f32::from(cmyk[3]) / 255.0;
    let ink = |c: u8| ((1.0 - f32::from(c) / 255.0) * k * 255.0) as u8;
    [ink(cmyk[0]), ink(cmyk[1]), ink(cmyk[2])]
}

/// Writes an image to a JPEG file at [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_QUALITY)
}

/// Writes an image to a JPEG file with an explicit quality (1-100).
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &Image, quality: u8) -> IoResult<()> {
    let bytes = write_to_memory(image, quality)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encodes an image to JPEG bytes.
///
/// # Errors
///
/// [`IoError::EncodeError`] if either dimension exceeds 65535 or the
/// encoder fails.
pub fn write_to_memory(image: &Image, quality: u8) -> IoResult<Vec<u8>> {
    let (w, h) = image.dimensions();
    let (w16, h16) = match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{w}x{h} exceeds the JPEG limit of 65535 pixels per side"
            )));
        }
    };

    let rgb = image.to_rgb_bytes();
    let mut buffer = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(&rgb, w16, h16, jpeg_encoder::ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}
