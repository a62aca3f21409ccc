//! Multiple-testing correction.

use std::cmp::Ordering;

/// Benjamini-Hochberg adjusted p-values, returned in input order.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let n = p_values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        p_values[a]
            .partial_cmp(&p_values[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut adjusted = vec![0.0; n];
    let mut running_min = 1.0_f64;
    for (position, &idx) in order.iter().enumerate().rev() {
        let rank = (position + 1) as f64;
        let scaled = (p_values[idx] * n as f64 / rank).min(1.0);
        running_min = running_min.min(scaled);
        adjusted[idx] = running_min;
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjusts_and_restores_order() {
        let adjusted = benjamini_hochberg(&[0.04, 0.01, 0.03]);
        // Sorted: 0.01*3/1 = 0.03, 0.03*3/2 = 0.045, 0.04*3/3 = 0.04.
        let expected = [0.04, 0.03, 0.04];
        for (got, want) in adjusted.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn caps_at_one() {
        assert_eq!(benjamini_hochberg(&[0.9, 0.8]), vec![0.9, 0.9]);
        assert_eq!(benjamini_hochberg(&[1.0]), vec![1.0]);
        assert!(benjamini_hochberg(&[]).is_empty());
    }
}
