//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Truncate a f64 toward zero and clamp it to the i64 range, returning 0 for NaN.
///
/// Reward and curve math multiplies integers by a float factor and keeps the
/// whole part, so truncation (not rounding) is the contract here.
#[must_use]
pub fn trunc_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let truncated = value.trunc();
    // i64::MAX is not exactly representable; anything at or past 2^63 saturates
    if truncated >= i64_to_f64(i64::MAX) {
        return i64::MAX;
    }
    if truncated < i64_to_f64(i64::MIN) {
        return i64::MIN;
    }
    cast::<f64, i64>(truncated).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Fraction `part / whole` clamped to `[0, 1]`; 0.0 whenever `whole` is not positive.
#[must_use]
pub fn unit_ratio(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (i64_to_f64(part) / i64_to_f64(whole)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunc_keeps_whole_part() {
        assert_eq!(trunc_f64_to_i64(1.9), 1);
        assert_eq!(trunc_f64_to_i64(787.5), 787);
        assert_eq!(trunc_f64_to_i64(-1.9), -1);
    }

    #[test]
    fn trunc_handles_non_finite_and_overflow() {
        assert_eq!(trunc_f64_to_i64(f64::NAN), 0);
        assert_eq!(trunc_f64_to_i64(f64::INFINITY), i64::MAX);
        assert_eq!(trunc_f64_to_i64(f64::NEG_INFINITY), i64::MIN);
        assert_eq!(trunc_f64_to_i64(1e30), i64::MAX);
        assert_eq!(trunc_f64_to_i64(-1e30), i64::MIN);
    }

    #[test]
    fn unit_ratio_clamps() {
        assert!((unit_ratio(50, 200) - 0.25).abs() < f64::EPSILON);
        assert!((unit_ratio(300, 200) - 1.0).abs() < f64::EPSILON);
        assert!((unit_ratio(10, 0) - 0.0).abs() < f64::EPSILON);
        assert!((unit_ratio(-5, 200) - 0.0).abs() < f64::EPSILON);
    }
}
