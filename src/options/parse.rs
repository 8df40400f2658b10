//! Query string tokenizer and value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::{Options, ParseWarning};
use crate::fit::FitMode;
use crate::plan::OutputCrop;

/// Renderer keys preserved in `extras` without warnings.
/// Sorted for binary search.
const KNOWN_EXTRAS: &[&str] = &[
    "background",
    "bg",
    "dpi",
    "font.defaultfontfamily",
    "font.defaultfontsize",
    "font.loadsystemfonts",
    "format",
    "imagerendering",
    "languages",
    "shaperendering",
    "textrendering",
];

/// Parse a query string into Options + warnings.
pub(crate) fn parse_query(query: &str) -> (Options, Vec<ParseWarning>) {
    let mut opts = Options::new();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        dispatch_key(&key, &value, &mut opts, &mut warnings);
    }

    (opts, warnings)
}

fn dispatch_key(key: &str, value: &str, opts: &mut Options, warnings: &mut Vec<ParseWarning>) {
    match key {
        // Fit mode
        "fit" | "mode" | "fitto" => match value.parse::<FitMode>() {
            Ok(mode) => {
                set_or_warn(&mut opts.fit_mode, Some(mode), key, value, warnings);
                opts.fit_mode_invalid = false;
            }
            Err(_) => {
                opts.fit_mode_invalid = true;
                warnings.push(ParseWarning::ValueInvalid {
                    key: static_key(key),
                    value: String::from(value),
                    reason: "expected original|width|height|zoom",
                });
            }
        },
        "value" => set_number(&mut opts.fit_value, key, value, warnings),

        // Shorthands carrying their own value
        "w" | "width" => set_shorthand(opts, FitMode::Width, parse_f64(value), key, value, warnings),
        "h" | "height" => {
            set_shorthand(opts, FitMode::Height, parse_f64(value), key, value, warnings);
        }
        "zoom" | "dpr" => {
            set_shorthand(opts, FitMode::Zoom, parse_dpr(value), key, value, warnings);
        }

        // Crop by bbox
        "padding" | "pad" => set_number(&mut opts.padding, key, value, warnings),
        "square" => {
            if let Some(b) = parse_bool(value) {
                set_or_warn(&mut opts.square, Some(b), key, value, warnings);
            } else {
                warnings.push(ParseWarning::ValueInvalid {
                    key: "square",
                    value: String::from(value),
                    reason: "expected true|false|1|0|yes|no|on|off",
                });
            }
        }

        // Output crop
        "crop" => {
            if let Some(c) = parse_output_crop(value) {
                set_or_warn(&mut opts.output_crop, Some(c), key, value, warnings);
            } else {
                warnings.push(ParseWarning::ValueInvalid {
                    key: "crop",
                    value: String::from(value),
                    reason: "expected left,top[,right[,bottom]] integers",
                });
            }
        }

        "maxdim" => {
            let parsed = value.trim().parse::<u32>().ok().filter(|&v| v > 0);
            if parsed.is_some() {
                set_or_warn(&mut opts.max_dimension, parsed, key, value, warnings);
            } else {
                warnings.push(ParseWarning::ValueInvalid {
                    key: "maxdim",
                    value: String::from(value),
                    reason: "expected a positive integer",
                });
            }
        }

        _ => {
            if KNOWN_EXTRAS.binary_search(&key).is_ok() {
                opts.extras.insert(String::from(key), String::from(value));
            } else {
                warnings.push(ParseWarning::KeyNotRecognized {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
        }
    }
}

/// Set a field, warning on duplicate.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if let Some(v) = parsed {
        if field.is_some() {
            warnings.push(ParseWarning::DuplicateKey {
                key: String::from(key),
                value: String::from(value),
            });
        }
        *field = Some(v);
    }
}

/// Set a numeric field; text that is not a number at all is a warning.
///
/// `NaN`, `inf` and negatives are numbers and are stored as-is.
fn set_number(field: &mut Option<f64>, key: &str, value: &str, warnings: &mut Vec<ParseWarning>) {
    match parse_f64(value) {
        Some(v) => set_or_warn(field, Some(v), key, value, warnings),
        None => warnings.push(ParseWarning::ValueInvalid {
            key: static_key(key),
            value: String::from(value),
            reason: "expected a number",
        }),
    }
}

/// `w=`, `h=` and `zoom=` set both the mode and its value.
fn set_shorthand(
    opts: &mut Options,
    mode: FitMode,
    parsed: Option<f64>,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    let Some(v) = parsed else {
        warnings.push(ParseWarning::ValueInvalid {
            key: static_key(key),
            value: String::from(value),
            reason: "expected a number",
        });
        return;
    };
    if opts.fit_mode.is_some() || opts.fit_value.is_some() {
        warnings.push(ParseWarning::DuplicateKey {
            key: String::from(key),
            value: String::from(value),
        });
    }
    opts.fit_mode = Some(mode);
    opts.fit_mode_invalid = false;
    opts.fit_value = Some(v);
}

// ---- Value parsers ----

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Parse DPR/zoom value, stripping trailing "x" suffix.
fn parse_dpr(s: &str) -> Option<f64> {
    let s = s.trim().trim_end_matches(['x', 'X']);
    s.parse::<f64>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if ["true", "1", "yes", "on"].iter().any(|t| s.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if ["false", "0", "no", "off"].iter().any(|t| s.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}

/// `left,top[,right[,bottom]]`, parens allowed.
fn parse_output_crop(s: &str) -> Option<OutputCrop> {
    let s = s.trim().trim_start_matches('(').trim_end_matches(')');
    let mut vals = [None; 4];
    let mut count = 0;
    for part in s.split(',') {
        if count == vals.len() {
            return None;
        }
        vals[count] = Some(part.trim().parse::<i32>().ok()?);
        count += 1;
    }
    if count < 2 {
        return None;
    }
    Some(OutputCrop {
        left: vals[0]?,
        top: vals[1]?,
        right: vals[2],
        bottom: vals[3],
    })
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let src = s.as_bytes();
    let mut i = 0;
    while i < src.len() {
        match src[i] {
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < src.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(src[i + 1]), hex_digit(src[i + 2])) {
                    bytes.push(hi << 4 | lo);
                    i += 3;
                } else {
                    bytes.push(b'%');
                    i += 1;
                }
            }
            b => {
                bytes.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// `&'static str` for key names used in `ValueInvalid` warnings.
fn static_key(key: &str) -> &'static str {
    match key {
        "fit" => "fit",
        "mode" => "mode",
        "fitto" => "fitto",
        "value" => "value",
        "w" => "w",
        "width" => "width",
        "h" => "h",
        "height" => "height",
        "zoom" => "zoom",
        "dpr" => "dpr",
        "padding" => "padding",
        "pad" => "pad",
        _ => "unknown",
    }
}
