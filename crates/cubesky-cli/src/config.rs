//! YAML defaults for the cube map commands.
//!
//! ```yaml
//! interpolation: lanczos
//! resolution: 2048
//! format: jpg
//! quality: 95
//! cross: false
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use anyhow::{Context, Result, bail};
use cubesky_io::{Format, WriteOptions};
use cubesky_ops::{CubeMapOptions, Interpolation};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub interpolation: Option<Interpolation>,
    pub resolution: Option<u32>,
    pub format: Option<String>,
    pub quality: Option<u8>,
    pub cross: Option<bool>,
}

impl Config {
    /// Loads `path`, or returns empty defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub options: CubeMapOptions,
    pub format: Format,
    pub write: WriteOptions,
    pub cross: bool,
}

/// Command-line values that may override the file.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub interpolation: Option<&'a str>,
    pub resolution: Option<u32>,
    pub format: Option<&'a str>,
    pub quality: Option<u8>,
    pub cross: bool,
}

impl Settings {
    pub fn resolve(config: &Config, cli: &Overrides<'_>) -> Result<Self> {
        let defaults = CubeMapOptions::default();
        let interpolation = cli
            .interpolation
            .map(Interpolation::from_name)
            .or(config.interpolation)
            .unwrap_or(defaults.interpolation);
        let resolution = cli.resolution.or(config.resolution).unwrap_or(defaults.resolution);
        let options = CubeMapOptions::new(interpolation, resolution);
        options.validate()?;

        let format = match cli.format.or(config.format.as_deref()) {
            Some(name) => name.parse::<Format>()?,
            None => Format::Png,
        };

        let mut write = WriteOptions::default();
        if let Some(quality) = cli.quality.or(config.quality) {
            if !(1..=100).contains(&quality) {
                bail!("JPEG quality must be 1-100, got {quality}");
            }
            write.jpeg_quality = quality;
        }

        Ok(Self {
            options,
            format,
            write,
            cross: cli.cross || config.cross.unwrap_or(false),
        })
    }
}
