//! Sigma trimming.
//!
//! A screening pass compares each price against the mean of the *other*
//! prices and flags it when the gap exceeds `threshold` sample standard
//! deviations of the set. Trimming keeps the widest run of sorted prices
//! that a screening pass leaves untouched, so the retained set always
//! screens clean and a second trim removes nothing.

use statrs::statistics::Statistics;

/// Smallest set trimming will ever touch; below this every bid is kept.
const MIN_TRIMMABLE: usize = 3;

/// Keep-mask over `values`: `false` marks a trimmed value.
///
/// Nothing is trimmed when the set holds fewer than `min_points` values
/// (or fewer than three), when `threshold` is not positive, or when no run
/// of at least that many prices screens clean. Among equally wide clean runs
/// the one with the smallest spread wins, then the lowest.
pub fn keep_mask(values: &[f64], threshold: f64, min_points: usize) -> Vec<bool> {
    let n = values.len();
    let floor = min_points.max(MIN_TRIMMABLE);
    if n < floor || !(threshold.is_finite() && threshold > 0.0) {
        return vec![true; n];
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| values[*a].total_cmp(&values[*b]).then(a.cmp(b)));
    let sorted: Vec<f64> = order.iter().map(|i| values[*i]).collect();

    let Some((start, len)) = widest_clean_run(&sorted, threshold, floor) else {
        return vec![true; n];
    };
    let mut mask = vec![false; n];
    for i in &order[start..start + len] {
        mask[*i] = true;
    }
    mask
}

/// The values surviving trimming, in input order.
pub fn trim(values: &[f64], threshold: f64, min_points: usize) -> Vec<f64> {
    values
        .iter()
        .zip(keep_mask(values, threshold, min_points))
        .filter_map(|(v, keep)| keep.then_some(*v))
        .collect()
}

fn widest_clean_run(sorted: &[f64], threshold: f64, floor: usize) -> Option<(usize, usize)> {
    (floor..=sorted.len()).rev().find_map(|len| {
        (0..=sorted.len() - len)
            .filter_map(|start| {
                screen(&sorted[start..start + len], threshold).map(|spread| (start, spread))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(start, _)| (start, len))
    })
}

/// Spread of `run` when no price in it is flagged; `None` otherwise.
fn screen(run: &[f64], threshold: f64) -> Option<f64> {
    if run.iter().all(|v| *v == run[0]) {
        return Some(0.0);
    }
    let std_dev = run.iter().std_dev();
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return Some(std_dev);
    }
    let sum: f64 = run.iter().sum();
    let others = (run.len() - 1) as f64;
    let bound = threshold * std_dev;
    run.iter()
        .all(|v| (v - (sum - v) / others).abs() <= bound)
        .then_some(std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_outlier_removed() {
        let kept = trim(&[100.0, 102.0, 98.0, 300.0, 101.0], 2.0, 3);
        assert_eq!(kept, vec![100.0, 102.0, 98.0, 101.0]);
    }

    #[test]
    fn test_retrim_removes_nothing() {
        let once = trim(&[100.0, 102.0, 98.0, 300.0, 101.0], 2.0, 3);
        let twice = trim(&once, 2.0, 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_near_outlier_left_behind_is_trimmed_too() {
        let once = trim(&[10.0, 10.0, 10.0, 10.0, 11.0, 100.0], 2.0, 3);
        assert_eq!(once, vec![10.0, 10.0, 10.0, 10.0]);
        assert_eq!(trim(&once, 2.0, 3), once);
    }

    #[test]
    fn test_outliers_on_both_tails() {
        let values = [50.0, 100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 100.0, 101.0, 99.0, 400.0];
        let kept = trim(&values, 2.0, 3);
        assert_eq!(kept.len(), 9);
        assert!(!kept.contains(&50.0));
        assert!(!kept.contains(&400.0));
    }

    #[test]
    fn test_identical_values_untouched() {
        assert_eq!(trim(&[5.0; 6], 2.0, 3).len(), 6);
    }

    #[test]
    fn test_small_sets_untouched() {
        assert_eq!(trim(&[1.0, 1000.0], 0.1, 0).len(), 2);
        assert_eq!(trim(&[1.0, 2.0, 1000.0], 2.0, 4).len(), 3);
    }

    #[test]
    fn test_zero_threshold_disables() {
        assert_eq!(trim(&[100.0, 102.0, 98.0, 300.0, 101.0], 0.0, 3).len(), 5);
    }

    #[test]
    fn test_never_empties_the_set() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(trim(&values, 1e-9, 3).len(), 4);
    }
}
