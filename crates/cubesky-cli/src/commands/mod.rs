//! CLI command implementations

pub mod cross;
pub mod cubemap;
pub mod info;

use anyhow::{Context, Result};
use cubesky_core::Image;
use cubesky_io::{Format, WriteOptions};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    cubesky_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path in the given format
pub fn save_image(path: &Path, image: &Image, format: Format, options: &WriteOptions) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    cubesky_io::write_as(path, image, format, options)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Whether the panorama has the expected 2:1 aspect ratio.
pub fn is_two_to_one(width: u32, height: u32) -> bool {
    u64::from(width) == 2 * u64::from(height)
}

/// Face resolution that roughly preserves source pixel density.
pub fn suggested_resolution(width: u32) -> u32 {
    (width / 4).max(1)
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
