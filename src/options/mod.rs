//! Query-string configuration for crop and fit settings.
//!
//! Parses strings like `fit=width&value=768&padding=10&square=true` into
//! [`Options`], then into a [`Request`](crate::Request) once the document
//! size is known.
//!
//! # Example
//!
//! ```
//! use zenfit::{BoundingBox, Extent, Size, options};
//!
//! let result = options::parse("w=768&padding=20&square=1");
//! assert!(result.warnings.is_empty());
//!
//! let plan = result
//!     .options
//!     .to_request(Extent::new(300.0, 150.0), Some(BoundingBox::new(10.0, 10.0, 200.0, 100.0)))
//!     .expect("valid fit")
//!     .plan();
//! assert_eq!(plan.output.size(), Size::new(768, 768));
//! ```
//!
//! Numeric values are kept as parsed, including `NaN` or negative padding:
//! the crop stage sanitizes them. Only structural problems (unknown fit
//! mode, a mode that needs a value without one) are errors, and those are
//! reported by [`Options::to_request`].

mod convert;
mod parse;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::fit::FitMode;
use crate::plan::OutputCrop;

/// Parsed configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct Options {
    /// Fit mode (`fit`, `mode`, `fitto`). Unset means `original`, unless a
    /// shorthand (`w`, `h`, `zoom`) set it.
    pub fit_mode: Option<FitMode>,
    /// Set when the fit mode text was not recognized.
    pub fit_mode_invalid: bool,
    /// Value for the fit mode (`value`, or the shorthand's value).
    pub fit_value: Option<f64>,
    /// Padding (`padding`, `pad`). Kept raw, sanitized at crop time.
    pub padding: Option<f64>,
    /// Square crop (`square`).
    pub square: Option<bool>,
    /// Output pixel crop (`crop=left,top[,right[,bottom]]`).
    pub output_crop: Option<OutputCrop>,
    /// Per-axis output cap (`maxdim`).
    pub max_dimension: Option<u32>,
    /// Keys this crate does not interpret, preserved for the renderer.
    pub extras: BTreeMap<String, String>,
}

impl Options {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access parameters preserved during parsing.
    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }
}

/// Result of parsing a query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed options.
    pub options: Options,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (options, warnings) = parse::parse_query(query);
    ParseResult { options, warnings }
}
