//! Pure field-validation predicates.
//!
//! Always return a boolean; no side effects, no panics.

/// Returns `true` iff the trimmed string is non-empty.
pub fn is_not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns `true` iff the value is strictly positive (zero is rejected).
pub fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Returns `true` iff the value is a percentage in `[0, 100]`.
pub fn is_valid_percentage(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_empty_trims_whitespace() {
        assert!(is_not_empty("Windpark"));
        assert!(is_not_empty("  x  "));
        assert!(!is_not_empty(""));
        assert!(!is_not_empty("   "));
        assert!(!is_not_empty("\t\n"));
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(is_positive(0.01));
        assert!(is_positive(1e9));
        assert!(!is_positive(0.0));
        assert!(!is_positive(-3.5));
    }

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(is_valid_percentage(0.0));
        assert!(is_valid_percentage(100.0));
        assert!(is_valid_percentage(35.5));
        assert!(!is_valid_percentage(-0.1));
        assert!(!is_valid_percentage(100.1));
    }

    #[test]
    fn percentage_rejects_nan() {
        assert!(!is_valid_percentage(f64::NAN));
    }
}
