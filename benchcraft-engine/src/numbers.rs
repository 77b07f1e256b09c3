//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 gain and clamp it to the u32 range, returning 0 for
/// non-finite or negative values.
#[must_use]
pub fn floor_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).floor();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Ratio of `part` to `whole` as a percentage clamped to 0..=100.
#[must_use]
pub fn percent_of(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let ratio = f64::from(part) * 100.0 / f64::from(whole);
    let clamped = ratio.clamp(0.0, 100.0).floor();
    cast::<f64, u8>(clamped).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_reject_non_finite() {
        assert_eq!(floor_f64_to_u32(f64::NAN), 0);
        assert_eq!(floor_f64_to_u32(-3.2), 0);
        assert_eq!(floor_f64_to_u32(12.9), 12);
    }

    #[test]
    fn floors_clamp_ranges() {
        assert_eq!(floor_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn percent_handles_caps_and_zero() {
        assert_eq!(percent_of(50, 200), 25);
        assert_eq!(percent_of(400, 200), 100);
        assert_eq!(percent_of(10, 0), 0);
    }
}
