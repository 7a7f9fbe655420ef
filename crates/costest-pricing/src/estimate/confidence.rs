//! Closed-form confidence score.
//!
//! `confidence = (1 - e^(-n/30)) × 1 / (1 + cv)`
//!
//! The sample term saturates toward 1 as `n` grows; the dispersion term
//! penalises spread. Summary-tier results have no per-contract spread and
//! pass `None`, which counts as a coefficient of variation of 0.

use costest_core::constants::{CONFIDENCE_SAMPLE_SCALE, MAX_CONFIDENCE};

/// Confidence in `[0, 1)` for `n` data points. Always 0 when `n == 0`.
pub fn confidence(n: usize, coef_var: Option<f64>) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let cv = coef_var
        .filter(|cv| cv.is_finite() && *cv >= 0.0)
        .unwrap_or(0.0);
    let sample_term = 1.0 - (-(n as f64) / CONFIDENCE_SAMPLE_SCALE).exp();
    let value = sample_term / (1.0 + cv);
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_points_zero_confidence() {
        assert_eq!(confidence(0, Some(0.1)), 0.0);
        assert_eq!(confidence(0, None), 0.0);
    }

    #[test]
    fn test_formula_matches_closed_form() {
        let expected = (1.0 - (-10.0f64 / 30.0).exp()) / 1.2;
        assert!((confidence(10, Some(0.2)) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_cv_counts_as_zero() {
        assert_eq!(confidence(10, None), confidence(10, Some(0.0)));
    }

    #[test]
    fn test_more_data_more_confidence() {
        assert!(confidence(40, Some(0.1)) > confidence(4, Some(0.1)));
        assert!(confidence(40, Some(0.1)) > confidence(40, Some(0.5)));
    }

    #[test]
    fn test_huge_samples_stay_below_one() {
        assert!(confidence(usize::MAX, Some(0.0)) < 1.0);
        assert!(confidence(100_000, None) < 1.0);
    }
}
