//! Cross command
//!
//! Packs an existing face directory into a single `4R x 3R` image.

use crate::CrossArgs;
use crate::config::Config;
use anyhow::{Context, Result, bail};
use cubesky_io::{Format, WriteOptions};
use cubesky_ops::layout;
use tracing::{info, trace};

pub fn run(args: CrossArgs, config: &Config, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "cross::run");

    let format = match args.format.as_deref() {
        Some(name) => name.parse::<Format>()?,
        None => match Format::from_extension(&args.output) {
            Format::Unknown => bail!("Cannot infer format from: {}", args.output.display()),
            format => format,
        },
    };

    let mut write = WriteOptions::default();
    if let Some(quality) = args.quality.or(config.quality) {
        write.jpeg_quality = quality;
    }

    let cube = cubesky_io::read_cube_map(&args.input)
        .with_context(|| format!("Failed to read faces from: {}", args.input.display()))?;
    info!(resolution = cube.resolution(), format = %format, "Assembling cross");

    let cross = layout::assemble_cross(&cube);
    super::save_image(&args.output, &cross, format, &write)?;

    if verbose > 0 {
        let (w, h) = cross.dimensions();
        println!("Wrote {}x{} cross to {}", w, h, args.output.display());
    }

    Ok(())
}
