//! cubesky - Equirectangular panorama to cube map converter
//!
//! Projects 360° panoramas onto six cube faces and packs or inspects the
//! results.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "cubesky")]
#[command(author, version, about = "Equirectangular panorama to cube map converter")]
#[command(long_about = "
Converts a 360° equirectangular panorama into the six faces of a cube map.

Examples:
  cubesky info sky.jpg                      # Dimensions and suggested face size
  cubesky cubemap sky.jpg -o faces          # px.png .. nz.png, 1024px, bilinear
  cubesky cubemap sky.jpg -o faces -i lanczos -r 2048 --format jpg -q 95
  cubesky cubemap sky.jpg -o out --cross    # Single 4x3 cross image
  cubesky cross faces -o cross.png          # Pack an existing face directory
  cubesky -c bake.yaml cubemap sky.jpg -o faces
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// YAML file with default cube map settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also write log events to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a panorama onto six cube faces
    #[command(visible_alias = "cm")]
    Cubemap(CubemapArgs),

    /// Pack a directory of six faces into a horizontal cross
    Cross(CrossArgs),

    /// Show panorama dimensions and suggested face resolution
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct CubemapArgs {
    /// Equirectangular input image
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Interpolation: nearest, linear, cubic, lanczos
    #[arg(short, long)]
    interpolation: Option<String>,

    /// Face resolution in pixels
    #[arg(short, long)]
    resolution: Option<u32>,

    /// Output format: png, jpg
    #[arg(long)]
    format: Option<String>,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Write one cross image instead of six faces
    #[arg(long)]
    cross: bool,
}

#[derive(Args)]
struct CrossArgs {
    /// Directory holding px, nx, py, ny, pz, nz images
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (default: from the output extension)
    #[arg(long)]
    format: Option<String>,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    quality: Option<u8>,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count. The returned guard
/// flushes the file writer on drop and must outlive the command.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Cubemap(args) => commands::cubemap::run(args, &config, cli.verbose),
        Commands::Cross(args) => commands::cross::run(args, &config, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cubemap() {
        let cli = Cli::try_parse_from([
            "cubesky", "-vv", "cubemap", "sky.jpg", "-o", "out", "-i", "cubic", "-r", "256", "--cross",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Cubemap(args) => {
                assert_eq!(args.input, PathBuf::from("sky.jpg"));
                assert_eq!(args.interpolation.as_deref(), Some("cubic"));
                assert_eq!(args.resolution, Some(256));
                assert!(args.cross);
                assert!(args.format.is_none());
            }
            _ => panic!("expected cubemap"),
        }
    }

    #[test]
    fn test_output_required() {
        assert!(Cli::try_parse_from(["cubesky", "cubemap", "sky.jpg"]).is_err());
        assert!(Cli::try_parse_from(["cubesky", "info"]).is_err());
    }
}
