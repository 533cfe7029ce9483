//! PNG format support.
//!
//! Palette, low bit depth and 16-bit images are normalized to 8-bit on
//! read; grayscale is expanded to RGBA. Writing always produces 8-bit RGBA
//! tagged as sRGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use cubesky_io::png::{read, write};
//!
//! let panorama = read("sky.png")?;
//! write("copy.png", &panorama)?;
//! ```

use crate::{IoError, IoResult};
use cubesky_core::{Image, OPAQUE};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a PNG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    decode(Cursor::new(data))
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let samples = &buf[..info.buffer_size()];
    let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => samples.to_vec(),
        (png::ColorType::Rgb, png::BitDepth::Eight) => samples
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], OPAQUE])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            samples.iter().flat_map(|&g| [g, g, g, OPAQUE]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => samples
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(Image::from_rgba(info.width, info.height, rgba)?)
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Encodes an image to PNG bytes.
pub fn write_to_memory(image: &Image) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode(&mut buffer, image)?;
    Ok(buffer)
}

fn encode<W: Write>(writer: W, image: &Image) -> IoResult<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.as_bytes())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}
