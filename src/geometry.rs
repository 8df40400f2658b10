//! Geometry value types shared by the crop and fit stages.
//!
//! Source-space values ([`BoundingBox`], [`Extent`]) are `f64`. Raster-space
//! values ([`Size`], [`PixelRect`]) are integral pixels.

use crate::sanitize::{ceil, clamp_coordinate, clamp_extent, floor};

/// Axis-aligned rectangle enclosing rendered content, in document units.
///
/// A box produced by content measurement is well formed. A box the caller
/// rebuilt or edited is not trusted: every consumer in this crate runs it
/// through [`sanitized`](Self::sanitized) first.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box covering `(0, 0)` to the far corner of `extent`.
    pub const fn from_extent(extent: Extent) -> Self {
        Self::new(0.0, 0.0, extent.width, extent.height)
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width and height as an [`Extent`].
    pub const fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Whether the box encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether every field is already in range (finite, non-negative size,
    /// inside [`MAX_COORDINATE`](crate::sanitize::MAX_COORDINATE)).
    pub fn is_valid(&self) -> bool {
        *self == self.sanitized()
    }

    /// Re-validate a possibly caller-edited box.
    ///
    /// Non-finite coordinates become `0`, negative or non-finite sizes
    /// become `0`, and everything is clamped to the rasterizer's coordinate
    /// range. Never fails.
    pub fn sanitized(&self) -> Self {
        Self {
            x: clamp_coordinate(self.x),
            y: clamp_coordinate(self.y),
            width: clamp_extent(self.width),
            height: clamp_extent(self.height),
        }
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Union of every box in `boxes`. `None` when there are none, which is
    /// how "no visible content" is reported.
    pub fn enclosing<I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }

    /// Overlapping region, or `None` if the boxes do not overlap with
    /// positive area.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Self::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Intersection with the document rectangle `(0, 0, width, height)`.
    pub fn clip_to(&self, document: Extent) -> Option<Self> {
        self.intersection(&Self::from_extent(document))
    }

    /// Expand outward to whole units: origin floored, far edge ceiled.
    pub fn pixel_aligned(&self) -> Self {
        let left = floor(self.x);
        let top = floor(self.y);
        let right = ceil(self.right());
        let bottom = ceil(self.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Whether this box lies entirely inside `(0, 0, width, height)`.
    pub fn is_within(&self, document: Extent) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= document.width
            && self.bottom() <= document.height
    }
}

/// Width × height in document units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    /// Create a new extent.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Non-finite or negative sides become `0`.
    pub fn sanitized(&self) -> Self {
        Self::new(clamp_extent(self.width), clamp_extent(self.height))
    }

    /// Whether either side is zero (or not a positive number).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether this size has no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Dimensions of the rect.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether this rect covers the whole of `size` (no actual crop).
    pub fn is_full(&self, size: Size) -> bool {
        self.x == 0 && self.y == 0 && self.width == size.width && self.height == size.height
    }
}

/// One of the two axes of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}
