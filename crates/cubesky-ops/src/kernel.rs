//! Reconstruction kernels.
//!
//! Estimates the colour of a source image at a fractional coordinate.
//!
//! # Kernels
//!
//! - [`Interpolation::Nearest`] - Copies the closest sample
//! - [`Interpolation::Bilinear`] - Blends the 2×2 neighbourhood, ceiling-rounded
//! - [`Interpolation::Bicubic`] - Separable 4×4 cubic with `B = -0.5`
//! - [`Interpolation::Lanczos`] - Separable 10×10 windowed sinc with `a = 5`
//!
//! Every kernel clamps its sample indices into the image, so any finite or
//! non-finite coordinate is safe to pass. At an integer coordinate inside
//! the image each kernel returns the sample at that coordinate unchanged.
//!
//! # Example
//!
//! ```rust
//! use cubesky_core::Image;
//! use cubesky_ops::Interpolation;
//!
//! let img = Image::from_fn(8, 8, |x, y| [x as u8 * 30, y as u8 * 30, 7, 255]);
//! assert_eq!(Interpolation::Lanczos.sample(&img, 3.0, 4.0), [90, 120, 7]);
//! ```

use cubesky_core::{Image, Rgb, clamp_channel};
use std::convert::Infallible;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Shape parameter of the cubic kernel.
pub const BICUBIC_B: f64 = -0.5;

/// Window half-width of the Lanczos kernel.
pub const LANCZOS_A: f64 = 5.0;

const MAX_TAPS: usize = 10;

/// Reconstruction kernel used to sample the source panorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "&'static str")
)]
pub enum Interpolation {
    /// Nearest-neighbour (fastest, blocky).
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Bicubic interpolation (Catmull-Rom family).
    Bicubic,
    /// Lanczos windowed sinc, `a = 5` (sharpest, slowest).
    Lanczos,
}

impl Interpolation {
    /// All kernels, fastest first.
    pub const ALL: [Interpolation; 4] = [
        Interpolation::Nearest,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
        Interpolation::Lanczos,
    ];

    /// Resolves a kernel name. Unknown names fall back to bilinear.
    ///
    /// Accepts `nearest`, `linear`/`bilinear`, `cubic`/`bicubic` and
    /// `lanczos`, case-insensitive.
    ///
    /// ```rust
    /// use cubesky_ops::Interpolation;
    ///
    /// assert_eq!(Interpolation::from_name("Cubic"), Interpolation::Bicubic);
    /// assert_eq!(Interpolation::from_name("sinc"), Interpolation::Bilinear);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "nearest" => Interpolation::Nearest,
            "linear" | "bilinear" => Interpolation::Bilinear,
            "cubic" | "bicubic" => Interpolation::Bicubic,
            "lanczos" => Interpolation::Lanczos,
            _ => {
                warn!(name, "unknown interpolation, falling back to bilinear");
                Interpolation::Bilinear
            }
        }
    }

    /// Canonical name, accepted back by [`from_name`](Self::from_name).
    pub const fn name(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "linear",
            Interpolation::Bicubic => "cubic",
            Interpolation::Lanczos => "lanczos",
        }
    }

    /// Half-width of the sampled neighbourhood (`2 * n` taps per axis).
    ///
    /// Nearest reads a single sample and reports 0.
    #[inline]
    pub const fn filter_size(self) -> usize {
        match self {
            Interpolation::Nearest => 0,
            Interpolation::Bilinear => 1,
            Interpolation::Bicubic => 2,
            Interpolation::Lanczos => 5,
        }
    }

    /// Evaluates the 1D kernel at offset `x`.
    #[inline]
    pub fn weight(self, x: f64) -> f64 {
        match self {
            Interpolation::Nearest => nearest_weight(x),
            Interpolation::Bilinear => bilinear_weight(x),
            Interpolation::Bicubic => bicubic_weight(x),
            Interpolation::Lanczos => lanczos_weight(x),
        }
    }

    /// Samples the RGB channels of `src` at fractional `(x, y)`.
    ///
    /// `src` must not be empty.
    #[inline]
    pub fn sample(self, src: &Image, x: f64, y: f64) -> Rgb {
        match self {
            Interpolation::Nearest => sample_nearest(src, x, y),
            Interpolation::Bilinear => sample_bilinear(src, x, y),
            Interpolation::Bicubic => sample_separable(src, x, y, 2, bicubic_weight),
            Interpolation::Lanczos => sample_separable(src, x, y, 5, lanczos_weight),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for Interpolation {
    fn from(s: &str) -> Self {
        Self::from_name(s)
    }
}

impl From<String> for Interpolation {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<Interpolation> for &'static str {
    fn from(interp: Interpolation) -> Self {
        interp.name()
    }
}

/// Box weight function.
#[inline]
fn nearest_weight(x: f64) -> f64 {
    if x.abs() < 0.5 { 1.0 } else { 0.0 }
}

/// Triangle weight function.
#[inline]
fn bilinear_weight(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Cubic convolution weight with `B = -0.5`.
#[inline]
pub fn bicubic_weight(x: f64) -> f64 {
    const B: f64 = BICUBIC_B;
    let ax = x.abs();
    let ax2 = ax * ax;
    let ax3 = ax2 * ax;
    if ax <= 1.0 {
        (B + 2.0) * ax3 - (B + 3.0) * ax2 + 1.0
    } else if ax < 2.0 {
        B * ax3 - 5.0 * B * ax2 + 8.0 * B * ax - 4.0 * B
    } else {
        0.0
    }
}

/// Lanczos weight with `a = 5`.
#[inline]
pub fn lanczos_weight(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else if x.abs() < LANCZOS_A {
        let xp = PI * x;
        LANCZOS_A * xp.sin() * (xp / LANCZOS_A).sin() / (xp * xp)
    } else {
        0.0
    }
}

/// Clamps a sample position to a valid index in `0..len`.
///
/// NaN maps to 0.
#[inline]
fn clamp_index(pos: f64, len: u32) -> u32 {
    pos.clamp(0.0, f64::from(len - 1)) as u32
}

fn sample_nearest(src: &Image, x: f64, y: f64) -> Rgb {
    let (w, h) = src.dimensions();
    src.rgb(clamp_index(x.round(), w), clamp_index(y.round(), h))
}

fn sample_bilinear(src: &Image, x: f64, y: f64) -> Rgb {
    let (w, h) = src.dimensions();
    let x_floor = x.floor();
    let y_floor = y.floor();

    let xl = clamp_index(x_floor, w);
    let xr = clamp_index(x.ceil(), w);
    let yl = clamp_index(y_floor, h);
    let yr = clamp_index(y.ceil(), h);

    // Blend weights come from the unclamped floor
    let xf = x - x_floor;
    let yf = y - y_floor;

    let p00 = src.rgb(xl, yl);
    let p10 = src.rgb(xr, yl);
    let p01 = src.rgb(xl, yr);
    let p11 = src.rgb(xr, yr);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let p0 = f64::from(p00[c]) * (1.0 - xf) + f64::from(p10[c]) * xf;
        let p1 = f64::from(p01[c]) * (1.0 - xf) + f64::from(p11[c]) * xf;
        out[c] = clamp_channel((p0 * (1.0 - yf) + p1 * yf).ceil());
    }
    out
}

/// Separable `2n × 2n` resampling shared by the bicubic and Lanczos kernels.
///
/// Taps start at `floor(x) - n + 1`; each tap's index is clamped per axis.
fn sample_separable(src: &Image, x: f64, y: f64, filter_size: usize, kernel: fn(f64) -> f64) -> Rgb {
    debug_assert!(filter_size * 2 <= MAX_TAPS);
    let (w, h) = src.dimensions();
    let taps = filter_size * 2;
    let x_start = x.floor() - filter_size as f64 + 1.0;
    let y_start = y.floor() - filter_size as f64 + 1.0;

    let mut x_weights = [0.0f64; MAX_TAPS];
    let mut y_weights = [0.0f64; MAX_TAPS];
    let mut x_index = [0usize; MAX_TAPS];
    let mut y_index = [0u32; MAX_TAPS];

    for i in 0..taps {
        let xi = x_start + i as f64;
        let yi = y_start + i as f64;
        x_weights[i] = kernel(x - xi);
        y_weights[i] = kernel(y - yi);
        x_index[i] = clamp_index(xi, w) as usize * 4;
        y_index[i] = clamp_index(yi, h);
    }

    let mut q = [0.0f64; 3];
    for i in 0..taps {
        let row = src.row(y_index[i]);
        let mut p = [0.0f64; 3];
        for j in 0..taps {
            let o = x_index[j];
            for c in 0..3 {
                p[c] += f64::from(row[o + c]) * x_weights[j];
            }
        }
        for c in 0..3 {
            q[c] += p[c] * y_weights[i];
        }
    }

    [
        clamp_channel(q[0].round()),
        clamp_channel(q[1].round()),
        clamp_channel(q[2].round()),
    ]
}
