//! Percentile bootstrap intervals.

use rand::Rng;

use crate::descriptive::percentile;
use crate::error::{Result, StatsError};

/// Percentile bootstrap confidence interval for `statistic` over `data`.
pub fn bootstrap_ci<R, F>(
    data: &[f64],
    statistic: F,
    n_resamples: usize,
    confidence: f64,
    rng: &mut R,
) -> Result<(f64, f64)>
where
    R: Rng + ?Sized,
    F: Fn(&[f64]) -> f64,
{
    if data.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            available: data.len(),
        });
    }
    if n_resamples == 0 {
        return Err(StatsError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    if confidence.is_nan() || confidence <= 0.0 || confidence >= 1.0 {
        return Err(StatsError::Distribution(format!(
            "confidence must lie in (0, 1), got {confidence}"
        )));
    }

    let mut sample = vec![0.0; data.len()];
    let mut estimates = Vec::with_capacity(n_resamples);
    for _ in 0..n_resamples {
        for slot in sample.iter_mut() {
            *slot = data[rng.random_range(0..data.len())];
        }
        estimates.push(statistic(&sample));
    }

    let alpha = 1.0 - confidence;
    Ok((
        percentile(&estimates, 100.0 * alpha / 2.0),
        percentile(&estimates, 100.0 * (1.0 - alpha / 2.0)),
    ))
}
