//! Pearson correlation and Fisher-z confidence intervals.

use crate::descriptive::mean;
use crate::distribution::{normal_quantile, t_two_sided_p};
use crate::error::{Result, StatsError};

/// Critical value used for the fixed 95% interval of [`pearson`].
pub const FISHER_Z_95: f64 = 1.96;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationEstimate {
    pub r: f64,
    pub p_value: f64,
    /// Standard error of `atanh(r)`, `1 / sqrt(n - 3)`.
    pub std_error: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub n: usize,
}

/// Interval for `r` from `atanh(r) ± z_crit / sqrt(n - 3)`.
pub fn fisher_interval(r: f64, n: usize, z_crit: f64) -> (f64, f64) {
    let z = r.atanh();
    let se = 1.0 / (n as f64 - 3.0).sqrt();
    ((z - z_crit * se).tanh(), (z + z_crit * se).tanh())
}

/// Confidence interval for a correlation at any level, e.g. `0.95`.
///
/// Both bounds are `NaN` when `n < 4`.
pub fn pearson_confidence_interval(r: f64, n: usize, confidence: f64) -> (f64, f64) {
    if n < 4 {
        return (f64::NAN, f64::NAN);
    }
    let alpha = 1.0 - confidence;
    fisher_interval(r, n, normal_quantile(1.0 - alpha / 2.0))
}

/// Pearson correlation with a two-sided p-value and a 95% Fisher interval.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<CorrelationEstimate> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 4 {
        return Err(StatsError::InsufficientData {
            required: 4,
            available: n,
        });
    }
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);

    let df = (n - 2) as f64;
    let p_value = if r.abs() == 1.0 {
        0.0
    } else {
        t_two_sided_p(r * (df / (1.0 - r * r)).sqrt(), df)?
    };
    let (ci_lower, ci_upper) = fisher_interval(r, n, FISHER_Z_95);
    Ok(CorrelationEstimate {
        r,
        p_value,
        std_error: 1.0 / (n as f64 - 3.0).sqrt(),
        ci_lower,
        ci_upper,
        n,
    })
}
