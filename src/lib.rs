//! Crop-by-bounding-box and fit-to output sizing for vector rasterization.
//!
//! Pure geometry: no pixels, no fonts, no parsing of the source document.
//! A renderer measures the content bounding box, hands it here with the
//! requested padding and fit policy, and gets back the source region to
//! sample, the raster size to allocate, the transform, and whether the
//! destination needs an alpha channel. Invalid numbers degrade to an empty
//! or saturated result instead of failing.
//!
//! # Modules
//!
//! - [`sanitize`]: Numeric clamps behind the "invalid input becomes 0" contract
//! - [`geometry`]: Bounding boxes, extents, pixel sizes and rects
//! - [`crop`]: Padding and square normalization of the crop rectangle
//! - [`fit`]: Fit-to modes (original, width, height, zoom) and output sizing
//! - [`plan`]: Request builder tying crop, fit and output crop together
//! - `options`: Query-string configuration (feature `options`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod crop;
pub mod fit;
pub mod geometry;
pub mod plan;
pub mod sanitize;

#[cfg(feature = "options")]
pub mod options;

pub use crop::{CropRect, normalize};
pub use fit::{FitMode, FitTo, FitToError, OutputDescriptor, resolve};
pub use geometry::{Axis, BoundingBox, Extent, PixelRect, Size};
pub use plan::{BBoxCrop, OutputCrop, RenderPlan, Request, Transform};
