//! Effect sizes.

use crate::descriptive::{mean, sum_of_squares};
use crate::error::{Result, StatsError};

/// Share of variance explained, recovered from an F statistic.
pub fn eta_squared(f: f64, df_between: usize, df_within: usize) -> f64 {
    let between = f * df_between as f64;
    let denominator = between + df_within as f64;
    if denominator <= 0.0 {
        return 0.0;
    }
    between / denominator
}

/// Cohen's d with a pooled standard deviation.
///
/// Returns 0 when the pooled deviation is zero.
pub fn cohens_d(a: &[f64], b: &[f64]) -> Result<f64> {
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() || total < 3 {
        return Err(StatsError::InsufficientData {
            required: 3,
            available: total,
        });
    }
    let (mean_a, mean_b) = (mean(a), mean(b));
    let pooled_var =
        (sum_of_squares(a, mean_a) + sum_of_squares(b, mean_b)) / (total - 2) as f64;
    let pooled_sd = pooled_var.sqrt();
    if pooled_sd == 0.0 {
        return Ok(0.0);
    }
    Ok((mean_a - mean_b) / pooled_sd)
}
