//! Padding and crop normalization.
//!
//! Turns a content bounding box plus a requested padding into the source
//! rectangle the rasterizer samples. Pure geometry: never fails, never
//! produces NaN, infinite or negative fields. The only "failure" is an empty
//! rectangle, which renders as an empty transparent image.
//!
//! # Example
//!
//! ```
//! use zenfit::{BoundingBox, crop::normalize};
//!
//! let bbox = BoundingBox::new(10.0, 10.0, 180.0, 80.0);
//!
//! let padded = normalize(&bbox, Some(5.0), false);
//! assert_eq!((padded.x, padded.width), (5.0, 190.0));
//!
//! // Squaring grows the short side around the padded box.
//! let square = normalize(&bbox, Some(0.0), true);
//! assert_eq!((square.width, square.height), (180.0, 180.0));
//! assert_eq!(square.y, -40.0);
//! ```

use crate::geometry::{Axis, BoundingBox, Extent};
use crate::sanitize::{MAX_COORDINATE, clamp_coordinate, clamp_extent, sanitize_non_negative_finite};

/// Final source-space rectangle to sample, after padding and squaring.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Rect covering `(0, 0)` to the far corner of `extent`.
    pub fn full(extent: Extent) -> Self {
        let extent = extent.sanitized();
        Self {
            x: 0.0,
            y: 0.0,
            width: extent.width,
            height: extent.height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width and height in source units.
    pub const fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Zero-area rect. Renders as an empty image.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether the whole rect lies inside the document `(0, 0, w, h)`.
    ///
    /// When it does not, some output pixels have no document content under
    /// them and must stay transparent.
    pub fn is_within(&self, document: Extent) -> bool {
        BoundingBox::new(self.x, self.y, self.width, self.height).is_within(document)
    }

    /// Grow the shorter side to match the longer one, centered. Never shrinks.
    pub fn squared(self) -> Self {
        let side = self.width.max(self.height);
        Self {
            x: clamp_coordinate(self.x - (side - self.width) / 2.0),
            y: clamp_coordinate(self.y - (side - self.height) / 2.0),
            width: side,
            height: side,
        }
    }
}

impl From<CropRect> for BoundingBox {
    fn from(r: CropRect) -> Self {
        BoundingBox::new(r.x, r.y, r.width, r.height)
    }
}

/// Sanitize a padding value. Anything that is not a finite non-negative
/// number is `0`. Also capped so `2 * padding` stays finite.
pub fn sanitize_padding(padding: Option<f64>) -> f64 {
    let p = sanitize_non_negative_finite(padding, 0.0);
    if padding.is_some_and(|raw| is_adjusted(raw, p)) {
        log::debug!("padding {padding:?} is not a finite non-negative number, using {p}");
    }
    p.min(MAX_COORDINATE)
}

/// Numeric comparison, so `-0.0` counts as an unchanged `0`.
fn is_adjusted(raw: f64, sanitized: f64) -> bool {
    raw != sanitized
}

/// Pad `bbox` symmetrically, clamp degenerate sides, optionally square.
///
/// `padding` of `None` models a missing argument. `NaN`, `±∞`, negative
/// and missing padding all behave exactly like `Some(0.0)`.
///
/// `bbox` is re-validated on every call, so a box the caller edited into
/// nonsense (negative size, `1e38` coordinates, NaN) still yields a finite
/// rectangle; oversized results are left for the fit stage to saturate.
pub fn normalize(bbox: &BoundingBox, padding: Option<f64>, square: bool) -> CropRect {
    let p = sanitize_padding(padding);
    pad(&checked_bbox(bbox), p, p, square)
}

/// Like [`normalize`], but keeps the content's aspect ratio.
///
/// The `pinned` axis gets the full padding; the other axis gets padding
/// proportional to the content's aspect ratio, so the padded rectangle has
/// the same shape as `bbox`. Used when the output size is pinned on one axis
/// and the other is derived: the derived side then does not drift as padding
/// grows. Falls back to [`normalize`] when the aspect ratio is undefined.
pub fn normalize_with_aspect(
    bbox: &BoundingBox,
    padding: Option<f64>,
    square: bool,
    pinned: Axis,
) -> CropRect {
    let b = checked_bbox(bbox);
    let p = sanitize_padding(padding);
    let (along, across) = match pinned {
        Axis::Horizontal => (b.width, b.height),
        Axis::Vertical => (b.height, b.width),
    };
    if !(along > 0.0 && across > 0.0) {
        return pad(&b, p, p, square);
    }
    // Overflow saturates instead of collapsing to zero.
    let derived = clamp_extent((p / along * across).min(MAX_COORDINATE));
    match pinned {
        Axis::Horizontal => pad(&b, p, derived, square),
        Axis::Vertical => pad(&b, derived, p, square),
    }
}

fn checked_bbox(bbox: &BoundingBox) -> BoundingBox {
    let b = bbox.sanitized();
    if !bbox.is_valid() {
        log::debug!("bounding box {bbox:?} out of range, using {b:?}");
    }
    b
}

fn pad(b: &BoundingBox, px: f64, py: f64, square: bool) -> CropRect {
    let rect = CropRect {
        x: clamp_coordinate(b.x - px),
        y: clamp_coordinate(b.y - py),
        width: clamp_extent(b.width + 2.0 * px),
        height: clamp_extent(b.height + 2.0 * py),
    };
    if square { rect.squared() } else { rect }
}
