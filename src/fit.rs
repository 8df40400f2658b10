//! Fit-to output sizing.
//!
//! Maps the size of the sampled source region to integral raster dimensions
//! and the uniform scale to apply while sampling.
//!
//! # Example
//!
//! ```
//! use zenfit::{Extent, FitTo, Size, fit::resolve};
//!
//! let out = resolve(Extent::new(180.0, 80.0), FitTo::Zoom(2.0));
//! assert_eq!(out.size(), Size::new(360, 160));
//! assert_eq!(out.scale, 2.0);
//!
//! let out = resolve(Extent::new(200.0, 100.0), FitTo::Width(300.0));
//! assert_eq!(out.size(), Size::new(300, 150));
//! ```

use core::fmt;
use core::str::FromStr;

use crate::geometry::{Axis, Extent, Size};
use crate::sanitize::{DEFAULT_MAX_DIMENSION, finite_or, round_to_dimension};

/// How the sampled region's size maps to output pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum FitTo {
    /// No scaling. Output is the source size, rounded to whole pixels.
    #[default]
    Original,
    /// Output width fixed to the value; height follows the aspect ratio.
    ///
    /// Like every mode, capped at the maximum output dimension
    /// (`16384` by default): `Width(20000)` on a 2:1 source yields
    /// `16384×8192`.
    Width(f64),
    /// Output height fixed to the value; width follows the aspect ratio.
    /// Capped like [`FitTo::Width`].
    Height(f64),
    /// Both dimensions multiplied by the value.
    Zoom(f64),
}

/// Fit mode without its value, as named in configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FitMode {
    Original,
    Width,
    Height,
    Zoom,
}

impl FitMode {
    /// Lowercase configuration name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Width => "width",
            Self::Height => "height",
            Self::Zoom => "zoom",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMode {
    type Err = FitToError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Self::Original, Self::Width, Self::Height, Self::Zoom]
            .into_iter()
            .find(|m| s.eq_ignore_ascii_case(m.as_str()))
            .ok_or(FitToError::UnknownMode)
    }
}

/// Structurally invalid fit configuration, rejected before any geometry runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitToError {
    /// Mode name outside `original | width | height | zoom`.
    UnknownMode,
    /// `width`, `height` or `zoom` given without a value.
    MissingValue(FitMode),
}

impl fmt::Display for FitToError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode => f.write_str("fit mode must be one of original|width|height|zoom"),
            Self::MissingValue(mode) => write!(f, "fit mode `{mode}` requires a value"),
        }
    }
}

impl core::error::Error for FitToError {}

impl FitTo {
    /// Build from a configuration tag and optional value.
    ///
    /// Only the structure is checked here. A value that is present but
    /// unusable (`NaN`, `0`, negative) is accepted and resolves to an empty
    /// output; `original` ignores any value.
    pub fn from_parts(mode: FitMode, value: Option<f64>) -> Result<Self, FitToError> {
        match (mode, value) {
            (FitMode::Original, _) => Ok(Self::Original),
            (FitMode::Width, Some(v)) => Ok(Self::Width(v)),
            (FitMode::Height, Some(v)) => Ok(Self::Height(v)),
            (FitMode::Zoom, Some(v)) => Ok(Self::Zoom(v)),
            (mode, None) => Err(FitToError::MissingValue(mode)),
        }
    }

    /// The mode tag.
    pub const fn mode(&self) -> FitMode {
        match self {
            Self::Original => FitMode::Original,
            Self::Width(_) => FitMode::Width,
            Self::Height(_) => FitMode::Height,
            Self::Zoom(_) => FitMode::Zoom,
        }
    }

    /// The mode's value, if it carries one.
    pub const fn value(&self) -> Option<f64> {
        match *self {
            Self::Original => None,
            Self::Width(v) | Self::Height(v) | Self::Zoom(v) => Some(v),
        }
    }

    /// The axis this mode fixes, for `width` and `height`.
    pub const fn pinned_axis(&self) -> Option<Axis> {
        match self {
            Self::Width(_) => Some(Axis::Horizontal),
            Self::Height(_) => Some(Axis::Vertical),
            Self::Original | Self::Zoom(_) => None,
        }
    }
}

/// Final raster size and the scale to sample with.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OutputDescriptor {
    /// Uniform source → output multiplier.
    pub scale: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl OutputDescriptor {
    /// `0×0` output, rendered as an empty transparent image.
    pub const EMPTY: Self = Self {
        scale: 0.0,
        width: 0,
        height: 0,
    };

    /// Output dimensions.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether there are no pixels to render.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Resolve output size with the default per-axis cap
/// ([`DEFAULT_MAX_DIMENSION`]).
pub fn resolve(source: Extent, fit: FitTo) -> OutputDescriptor {
    resolve_with_limit(source, fit, DEFAULT_MAX_DIMENSION)
}

/// Resolve output size, saturating each axis at `max_dimension`.
///
/// Never fails:
/// - a zero-area source gives `0×0` in every mode;
/// - a non-finite or non-positive fit value gives `0×0` with scale `0`;
/// - an output larger than `max_dimension` on either axis is scaled down
///   uniformly (aspect ratio kept, `scale` adjusted to match).
pub fn resolve_with_limit(source: Extent, fit: FitTo, max_dimension: u32) -> OutputDescriptor {
    let source = source.sanitized();

    let (scale, fw, fh) = match fit {
        FitTo::Original => (1.0, source.width, source.height),
        FitTo::Width(v) => {
            if !usable(v) {
                return unusable(fit);
            }
            // Width 0 would make the scale infinite.
            let scale = if source.width > 0.0 {
                v / source.width
            } else {
                0.0
            };
            (scale, v, source.height * scale)
        }
        FitTo::Height(v) => {
            if !usable(v) {
                return unusable(fit);
            }
            let scale = if source.height > 0.0 {
                v / source.height
            } else {
                0.0
            };
            (scale, source.width * scale, v)
        }
        FitTo::Zoom(v) => {
            if !usable(v) {
                return unusable(fit);
            }
            (v, source.width * v, source.height * v)
        }
    };

    if source.is_empty() {
        return OutputDescriptor {
            scale: finite_or(scale, 0.0),
            width: 0,
            height: 0,
        };
    }

    let (scale, fw, fh) = saturate(source, scale, fw, fh, max_dimension);
    OutputDescriptor {
        scale,
        width: round_to_dimension(fw, max_dimension),
        height: round_to_dimension(fh, max_dimension),
    }
}

fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn unusable(fit: FitTo) -> OutputDescriptor {
    log::debug!("fit value in {fit:?} is not a finite positive number, output is empty");
    OutputDescriptor::EMPTY
}

/// Scale both dimensions down together when either exceeds the cap.
fn saturate(
    source: Extent,
    scale: f64,
    fw: f64,
    fh: f64,
    max_dimension: u32,
) -> (f64, f64, f64) {
    let longest = fw.max(fh);
    let cap = max_dimension as f64;
    if longest <= cap {
        return (scale, fw, fh);
    }
    if !longest.is_finite() {
        // A huge fit value or a subnormal source side overflowed the
        // requested scale. Rebuild it from the source so the longest side
        // lands on the cap.
        let scale = finite_or(cap / source.width.max(source.height), 0.0);
        log::debug!("output size overflowed, saturating to {max_dimension} at scale {scale}");
        return (
            scale,
            finite_or(source.width * scale, 0.0),
            finite_or(source.height * scale, 0.0),
        );
    }
    let factor = cap / longest;
    log::debug!("output {fw}x{fh} exceeds {max_dimension}px, scaling by {factor}");
    (scale * factor, fw * factor, fh * factor)
}
