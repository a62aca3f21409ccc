//! Ordinary least squares with an intercept.

use nalgebra::{DMatrix, DVector};

use crate::distribution::{t_quantile, t_two_sided_p};
use crate::error::{Result, StatsError};

/// A pivot of the normal equations smaller than this share of the
/// column's own sum of squares marks the design as rank deficient.
const SINGULAR_PIVOT_TOLERANCE: f64 = 1e-10;

/// Estimate and inference for one model term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsTerm {
    pub estimate: f64,
    pub std_error: f64,
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Fitted model. Term 0 is the intercept; term `i + 1` is predictor `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub terms: Vec<OlsTerm>,
    pub r_squared: f64,
    pub n_obs: usize,
    pub df_resid: usize,
}

impl OlsFit {
    pub fn intercept(&self) -> &OlsTerm {
        &self.terms[0]
    }

    /// Term of predictor column `idx`.
    pub fn predictor(&self, idx: usize) -> Option<&OlsTerm> {
        self.terms.get(idx + 1)
    }
}

/// Fits `y ~ 1 + predictors` and reports 95% intervals from the t distribution.
///
/// `predictors` holds one slice per column, each as long as `y`.
pub fn fit_ols(y: &[f64], predictors: &[Vec<f64>]) -> Result<OlsFit> {
    let n = y.len();
    let p = predictors.len() + 1;
    for column in predictors {
        if column.len() != n {
            return Err(StatsError::LengthMismatch {
                left: n,
                right: column.len(),
            });
        }
    }
    if n <= p {
        return Err(StatsError::NoResidualDegreesOfFreedom);
    }

    let x = DMatrix::from_fn(n, p, |row, col| {
        if col == 0 { 1.0 } else { predictors[col - 1][row] }
    });
    let y = DVector::from_column_slice(y);

    let xtx = x.transpose() * &x;
    let cholesky = xtx.clone().cholesky().ok_or(StatsError::SingularDesign)?;
    let l = cholesky.l();
    for idx in 0..p {
        if l[(idx, idx)].powi(2) <= SINGULAR_PIVOT_TOLERANCE * xtx[(idx, idx)] {
            return Err(StatsError::SingularDesign);
        }
    }

    let beta = cholesky.solve(&(x.transpose() * &y));
    let residuals = &y - &x * &beta;
    let ssr = residuals.norm_squared();
    let y_mean = y.mean();
    let sst: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
    if sst == 0.0 {
        return Err(StatsError::ZeroVariance);
    }

    let df_resid = n - p;
    let sigma2 = ssr / df_resid as f64;
    let covariance = cholesky.inverse() * sigma2;
    let t_crit = t_quantile(0.975, df_resid as f64)?;

    let mut terms = Vec::with_capacity(p);
    for idx in 0..p {
        let estimate = beta[idx];
        let std_error = covariance[(idx, idx)].max(0.0).sqrt();
        let p_value = t_two_sided_p(estimate / std_error, df_resid as f64)?;
        terms.push(OlsTerm {
            estimate,
            std_error,
            p_value,
            ci_lower: estimate - t_crit * std_error,
            ci_upper: estimate + t_crit * std_error,
        });
    }

    Ok(OlsFit {
        terms,
        r_squared: 1.0 - ssr / sst,
        n_obs: n,
        df_resid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 + 2.0 * v).collect();
        let fit = fit_ols(&y, &[x]).expect("fit");

        assert!((fit.intercept().estimate - 3.0).abs() < 1e-9);
        let slope = fit.predictor(0).expect("slope");
        assert!((slope.estimate - 2.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(fit.df_resid, 8);
    }

    #[test]
    fn matches_hand_computed_regression() {
        // x = 1..5, y = [2, 4, 5, 4, 5]: slope 0.6, intercept 2.2,
        // SSR 2.4, Sxx 10, so se(slope) = sqrt(0.8 / 10).
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = fit_ols(&y, &[x]).expect("fit");
        let slope = fit.predictor(0).expect("slope");

        assert!((slope.estimate - 0.6).abs() < 1e-12);
        assert!((fit.intercept().estimate - 2.2).abs() < 1e-12);
        assert!((slope.std_error - 0.08_f64.sqrt()).abs() < 1e-12);
        assert!((fit.r_squared - 0.6).abs() < 1e-12);
        assert!(slope.ci_lower < slope.estimate && slope.estimate < slope.ci_upper);
    }

    #[test]
    fn collinear_columns_are_singular() {
        let a: Vec<f64> = (0..12).map(f64::from).collect();
        let b: Vec<f64> = a.iter().map(|v| v * 2.0).collect();
        let y: Vec<f64> = a.iter().map(|v| v.sin()).collect();
        assert_eq!(fit_ols(&y, &[a, b]), Err(StatsError::SingularDesign));
    }

    #[test]
    fn constant_outcome_has_zero_variance() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        assert_eq!(fit_ols(&[1.0; 10], &[x]), Err(StatsError::ZeroVariance));
    }

    #[test]
    fn too_few_rows() {
        assert_eq!(
            fit_ols(&[1.0, 2.0], &[vec![0.0, 1.0]]),
            Err(StatsError::NoResidualDegreesOfFreedom)
        );
    }
}
