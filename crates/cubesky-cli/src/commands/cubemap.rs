//! Cube map command
//!
//! Projects an equirectangular panorama onto six faces, written either as
//! separate files or packed into one horizontal cross.

use crate::CubemapArgs;
use crate::config::{Config, Overrides, Settings};
use anyhow::{Context, Result};
use cubesky_ops::{CubeMapProcessor, layout};
use std::time::Instant;
use tracing::{info, trace, warn};

pub fn run(args: CubemapArgs, config: &Config, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "cubemap::run");

    let settings = Settings::resolve(
        config,
        &Overrides {
            interpolation: args.interpolation.as_deref(),
            resolution: args.resolution,
            format: args.format.as_deref(),
            quality: args.quality,
            cross: args.cross,
        },
    )?;

    let pano = super::load_image(&args.input)?;
    let (w, h) = pano.dimensions();
    if !super::is_two_to_one(w, h) {
        warn!(w, h, "panorama is not 2:1, faces will be stretched");
    }

    let processor = CubeMapProcessor::from_options(settings.options)?;
    info!(
        interpolation = %settings.options.interpolation,
        resolution = settings.options.resolution,
        w,
        h,
        "Projecting cube map"
    );
    if verbose > 0 {
        println!(
            "Projecting {} ({}x{}) to {}px faces ({})",
            args.input.display(),
            w,
            h,
            settings.options.resolution,
            settings.options.interpolation
        );
    }

    let start = Instant::now();
    let cube = processor
        .process(&pano)
        .with_context(|| format!("Failed to project: {}", args.input.display()))?;

    let written = if settings.cross {
        let path = args.output.join(format!("cross.{}", settings.format.extension()));
        super::save_image(&path, &layout::assemble_cross(&cube), settings.format, &settings.write)?;
        vec![path]
    } else {
        cubesky_io::write_cube_map_with(&args.output, &cube, settings.format, &settings.write)
            .with_context(|| format!("Failed to write faces to: {}", args.output.display()))?
    };

    info!(files = written.len(), elapsed_ms = start.elapsed().as_millis() as u64, "Cube map written");
    for path in &written {
        println!("{}", path.display());
    }

    Ok(())
}
