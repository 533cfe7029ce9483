//! Panorama info command.

use crate::InfoArgs;
use anyhow::{Context, Result};
use cubesky_io::Format;
use std::fs;

/// Prints dimensions, format and the suggested face size for each input.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path)?;
        let (w, h) = image.dimensions();

        println!("{}", path.display());
        println!("  Format:     {}", format);
        println!("  Resolution: {}x{}", w, h);
        println!("  File size:  {}", super::format_size(file_size));
        println!(
            "  Aspect 2:1: {}",
            if super::is_two_to_one(w, h) { "yes" } else { "no" }
        );
        println!("  Face size:  {} (suggested)", super::suggested_resolution(w));
        if verbose > 0 {
            println!("  Opaque:     {}", image.is_opaque());
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
