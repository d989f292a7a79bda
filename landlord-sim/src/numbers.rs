//! Numeric conversion helpers centralizing lossy casts for statistics.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn count_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert a round total to f64.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// `part / whole` as a percentage, 0.0 for an empty denominator.
#[must_use]
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    count_to_f64(part) / count_to_f64(whole) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_empty_denominator() {
        assert!(percent(3, 0).abs() < f64::EPSILON);
        assert!((percent(1, 4) - 25.0).abs() < f64::EPSILON);
        assert!((percent(300, 300) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn conversions_are_exact_for_small_values() {
        assert!((count_to_f64(42) - 42.0).abs() < f64::EPSILON);
        assert!((u64_to_f64(1_000) - 1_000.0).abs() < f64::EPSILON);
    }
}
