//! Numeric sanitization shared by every entry point.
//!
//! Geometry requests never fail. Invalid numbers collapse to a documented
//! default here instead of being checked inline at each call site, so the
//! "invalid input becomes 0" contract is testable in one place.

use num_traits::Float;

/// Largest coordinate magnitude a crop rectangle may carry.
///
/// Matches the range of a single-precision rasterizer. Keeping every field
/// inside it means `x + width`, `2 * padding` and friends stay finite in f64.
pub const MAX_COORDINATE: f64 = f32::MAX as f64;

/// Default per-axis cap for output raster dimensions.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Returns `value` if it is present, finite and non-negative, else `default`.
///
/// `None` stands in for a missing (`null` / `undefined`) argument. `-0.0` is
/// returned as `+0.0`, so a sanitized negative zero is bit-identical to an
/// explicit zero.
///
/// ```
/// use zenfit::sanitize::sanitize_non_negative_finite;
///
/// assert_eq!(sanitize_non_negative_finite(Some(12.5), 0.0), 12.5);
/// assert_eq!(sanitize_non_negative_finite(Some(f64::NAN), 0.0), 0.0);
/// assert_eq!(sanitize_non_negative_finite(Some(-3.0), 0.0), 0.0);
/// assert_eq!(sanitize_non_negative_finite(None, 0.0), 0.0);
/// ```
pub fn sanitize_non_negative_finite(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v + 0.0,
        _ => default,
    }
}

/// Replace a non-finite value with `default`.
#[inline]
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

/// Finite-or-zero, then clamped to `±MAX_COORDINATE`.
#[inline]
pub fn clamp_coordinate(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(-MAX_COORDINATE, MAX_COORDINATE) + 0.0
}

/// Like [`clamp_coordinate`], but negative sizes become `0`.
#[inline]
pub fn clamp_extent(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(0.0, MAX_COORDINATE) + 0.0
}

/// Round half away from zero into a raster dimension.
///
/// NaN and negative values give `0`; anything above `max` saturates.
pub fn round_to_dimension(value: f64, max: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let rounded = round(value);
    if rounded >= max as f64 {
        max
    } else {
        rounded as u32
    }
}

/// Round half away from zero.
#[inline]
pub(crate) fn round(value: f64) -> f64 {
    Float::round(value)
}

#[inline]
pub(crate) fn floor(value: f64) -> f64 {
    Float::floor(value)
}

#[inline]
pub(crate) fn ceil(value: f64) -> f64 {
    Float::ceil(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_padding_collapses_to_default() {
        for v in [
            None,
            Some(f64::NAN),
            Some(f64::INFINITY),
            Some(f64::NEG_INFINITY),
            Some(-10.0),
            Some(-f64::MIN_POSITIVE),
        ] {
            assert_eq!(sanitize_non_negative_finite(v, 0.0).to_bits(), 0.0f64.to_bits());
        }
    }

    #[test]
    fn negative_zero_is_positive_zero() {
        let z = sanitize_non_negative_finite(Some(-0.0), 7.0);
        assert_eq!(z.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn valid_values_pass_through() {
        assert_eq!(sanitize_non_negative_finite(Some(0.0), 5.0), 0.0);
        assert_eq!(sanitize_non_negative_finite(Some(1e3), 0.0), 1e3);
        assert_eq!(sanitize_non_negative_finite(Some(f64::MAX), 0.0), f64::MAX);
    }

    #[test]
    fn coordinates_clamp_to_single_precision_range() {
        assert_eq!(clamp_coordinate(1e300), MAX_COORDINATE);
        assert_eq!(clamp_coordinate(-1e300), -MAX_COORDINATE);
        assert_eq!(clamp_coordinate(f64::NAN), 0.0);
        assert_eq!(clamp_coordinate(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_coordinate(50.4), 50.4);
    }

    #[test]
    fn extents_are_non_negative() {
        assert_eq!(clamp_extent(-10.0), 0.0);
        assert_eq!(clamp_extent(f64::INFINITY), 0.0);
        assert_eq!(clamp_extent(3e38), 3e38);
        assert_eq!(clamp_extent(1e39), MAX_COORDINATE);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_dimension(0.5, 100), 1);
        assert_eq!(round_to_dimension(1.5, 100), 2);
        assert_eq!(round_to_dimension(2.5, 100), 3);
        assert_eq!(round_to_dimension(2.4999, 100), 2);
        assert_eq!(round_to_dimension(0.49, 100), 0);
    }

    #[test]
    fn rounding_floors_and_saturates() {
        assert_eq!(round_to_dimension(-3.0, 100), 0);
        assert_eq!(round_to_dimension(f64::NAN, 100), 0);
        assert_eq!(round_to_dimension(f64::INFINITY, 100), 100);
        assert_eq!(round_to_dimension(1e38, DEFAULT_MAX_DIMENSION), DEFAULT_MAX_DIMENSION);
        assert_eq!(round_to_dimension(99.6, 100), 100);
    }
}
