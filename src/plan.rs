//! Render request assembly: crop → fit → everything the rasterizer needs.

use crate::crop::{CropRect, normalize, normalize_with_aspect};
use crate::fit::{FitTo, OutputDescriptor, resolve_with_limit};
use crate::geometry::{BoundingBox, Extent, PixelRect, Size};
use crate::sanitize::{DEFAULT_MAX_DIMENSION, finite_or};

/// Crop-by-bounding-box settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BBoxCrop {
    /// Content bounds to crop to. Re-validated on every plan.
    pub bbox: BoundingBox,
    /// Padding on every side. `None` and invalid values mean `0`.
    pub padding: Option<f64>,
    /// Grow the short side so the crop is square.
    pub square: bool,
}

/// Pixel crop applied to the rendered output (left, top, right, bottom).
///
/// `right` and `bottom` default to the output width and height. An inverted
/// or fully out-of-bounds rectangle is ignored and the whole output kept.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutputCrop {
    pub left: i32,
    pub top: i32,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
}

impl OutputCrop {
    /// Create an output crop with all four edges.
    pub const fn ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right: Some(right),
            bottom: Some(bottom),
        }
    }

    /// Resolve against the rendered size. `None` means no crop.
    pub fn resolve(&self, output: Size) -> Option<PixelRect> {
        let w = i64::from(output.width);
        let h = i64::from(output.height);
        let left = i64::from(self.left);
        let top = i64::from(self.top);
        let right = self.right.map_or(w, i64::from);
        let bottom = self.bottom.map_or(h, i64::from);
        if right <= left || bottom <= top {
            return None;
        }
        let (l, t) = (left.clamp(0, w), top.clamp(0, h));
        let (r, b) = (right.clamp(0, w), bottom.clamp(0, h));
        if r <= l || b <= t {
            return None;
        }
        let rect = PixelRect::new(l as u32, t as u32, (r - l) as u32, (b - t) as u32);
        if rect.is_full(output) { None } else { Some(rect) }
    }
}

/// Source-to-pixel mapping: `pixel = source * scale + translate`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    /// Map a source-space point to output pixel space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.translate_x,
            y * self.scale + self.translate_y,
        )
    }

    /// Map an output pixel-space point back to source space.
    /// `None` for a degenerate (zero-scale) transform.
    pub fn invert(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        if self.scale == 0.0 {
            return None;
        }
        Some((
            (px - self.translate_x) / self.scale,
            (py - self.translate_y) / self.scale,
        ))
    }
}

/// A render request: document size plus optional crop, fit and output crop.
///
/// # Example
///
/// ```
/// use zenfit::{BoundingBox, Extent, FitTo, Request, Size};
///
/// let plan = Request::new(Extent::new(200.0, 100.0))
///     .crop_to_bbox(BoundingBox::new(10.0, 10.0, 180.0, 80.0), None, true)
///     .fit_to(FitTo::Zoom(2.0))
///     .plan();
///
/// assert_eq!(plan.output.size(), Size::new(360, 360));
/// // The squared crop reaches outside the 200×100 document.
/// assert!(plan.needs_alpha);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub document: Extent,
    pub crop: Option<BBoxCrop>,
    pub fit: FitTo,
    pub output_crop: Option<OutputCrop>,
    pub max_dimension: u32,
}

impl Request {
    /// Request rendering the whole document at its original size.
    pub fn new(document: Extent) -> Self {
        Self {
            document,
            crop: None,
            fit: FitTo::Original,
            output_crop: None,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    /// Crop to `bbox`, padded and optionally squared.
    pub fn crop_to_bbox(mut self, bbox: BoundingBox, padding: Option<f64>, square: bool) -> Self {
        self.crop = Some(BBoxCrop {
            bbox,
            padding,
            square,
        });
        self
    }

    /// Set the fit-to policy.
    pub fn fit_to(mut self, fit: FitTo) -> Self {
        self.fit = fit;
        self
    }

    /// Crop the rendered output in pixel space.
    pub fn output_crop(mut self, crop: OutputCrop) -> Self {
        self.output_crop = Some(crop);
        self
    }

    /// Per-axis output cap. `0` is treated as the default.
    pub fn max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = max;
        self
    }

    /// Resolve the request. Never fails; degenerate input yields an empty
    /// output.
    pub fn plan(&self) -> RenderPlan {
        let document = self.document.sanitized();
        let max_dimension = if self.max_dimension == 0 {
            DEFAULT_MAX_DIMENSION
        } else {
            self.max_dimension
        };

        // Step 1: sampled region.
        let viewport = match &self.crop {
            None => CropRect::full(document),
            Some(c) => match self.fit.pinned_axis() {
                // A pinned axis derives the other from the region's aspect
                // ratio, so padding must not change that ratio.
                Some(axis) if !c.square => {
                    normalize_with_aspect(&c.bbox, c.padding, c.square, axis)
                }
                _ => normalize(&c.bbox, c.padding, c.square),
            },
        };

        // Step 2: output size and scale.
        let output = resolve_with_limit(viewport.extent(), self.fit, max_dimension);

        // Step 3: transform and alpha.
        let transform = Transform {
            scale: output.scale,
            translate_x: finite_or(-viewport.x * output.scale, 0.0) + 0.0,
            translate_y: finite_or(-viewport.y * output.scale, 0.0) + 0.0,
        };
        let needs_alpha = output.is_empty()
            || !viewport.is_within(document)
            || !raster_within(&viewport, &output, document);

        // Step 4: output crop.
        let output_crop = self
            .output_crop
            .and_then(|c| c.resolve(output.size()));

        log::trace!(
            "planned viewport {viewport:?} -> {}x{} (scale {}, alpha {needs_alpha})",
            output.width,
            output.height,
            output.scale
        );

        RenderPlan {
            document,
            viewport,
            output,
            transform,
            needs_alpha,
            output_crop,
        }
    }
}

/// Whether the source region the raster actually samples stays inside the
/// document.
///
/// Rounding the output size can stretch the sampled region past the
/// viewport, e.g. a 100.5-wide document renders 101 columns and the last one
/// has nothing under it. A zero scale samples nothing meaningful.
fn raster_within(viewport: &CropRect, output: &OutputDescriptor, document: Extent) -> bool {
    if !(output.scale > 0.0) {
        return false;
    }
    let right = viewport.x + output.width as f64 / output.scale;
    let bottom = viewport.y + output.height as f64 / output.scale;
    // Division error at an exact document edge is not an uncovered pixel.
    let slack = |edge: f64| edge * 1e-12;
    right <= document.width + slack(document.width)
        && bottom <= document.height + slack(document.height)
}

/// Everything the rasterizer needs for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    /// Sanitized document size.
    pub document: Extent,
    /// Source region to sample (the whole document when not cropping).
    pub viewport: CropRect,
    /// Raster size and scale.
    pub output: OutputDescriptor,
    /// Source → pixel mapping for the viewport.
    pub transform: Transform,
    /// Whether the destination needs an alpha channel. True when some output
    /// pixels are not covered by the document and must stay transparent.
    pub needs_alpha: bool,
    /// Pixel region to keep after rendering. `None` = whole output.
    pub output_crop: Option<PixelRect>,
}

impl RenderPlan {
    /// Size of the image handed back to the caller.
    pub fn final_size(&self) -> Size {
        match &self.output_crop {
            Some(r) => r.size(),
            None => self.output.size(),
        }
    }

    /// Whether the viewport is exactly the document (no crop in effect).
    pub fn is_full_document(&self) -> bool {
        self.viewport == CropRect::full(self.document)
    }
}
