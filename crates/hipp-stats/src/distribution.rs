//! Tail probabilities and quantiles from `statrs`.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

use crate::error::{Result, StatsError};

fn students_t(df: f64) -> Result<StudentsT> {
    StudentsT::new(0.0, 1.0, df).map_err(|err| StatsError::Distribution(err.to_string()))
}

/// Two-sided p-value of a t statistic.
pub fn t_two_sided_p(t: f64, df: f64) -> Result<f64> {
    if t.is_nan() {
        return Ok(1.0);
    }
    let dist = students_t(df)?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// Quantile of Student's t distribution.
pub fn t_quantile(p: f64, df: f64) -> Result<f64> {
    Ok(students_t(df)?.inverse_cdf(p))
}

/// Upper tail of the F distribution.
pub fn f_sf(f: f64, df_between: f64, df_within: f64) -> Result<f64> {
    let dist = FisherSnedecor::new(df_between, df_within)
        .map_err(|err| StatsError::Distribution(err.to_string()))?;
    Ok(dist.sf(f).clamp(0.0, 1.0))
}

/// Upper tail of the chi-squared distribution.
pub fn chi_squared_sf(x: f64, df: f64) -> Result<f64> {
    let dist = ChiSquared::new(df).map_err(|err| StatsError::Distribution(err.to_string()))?;
    Ok(dist.sf(x).clamp(0.0, 1.0))
}

/// Quantile of the standard normal distribution.
pub fn normal_quantile(p: f64) -> f64 {
    Normal::standard().inverse_cdf(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_quantile_matches_table() {
        assert!((normal_quantile(0.975) - 1.959_964).abs() < 1e-5);
        assert!(normal_quantile(0.5).abs() < 1e-9);
    }

    #[test]
    fn t_tails_are_symmetric() {
        let p = t_two_sided_p(2.0, 10.0).expect("p");
        assert!((p - t_two_sided_p(-2.0, 10.0).expect("p")).abs() < 1e-12);
        // Reference value for t = 2, df = 10.
        assert!((p - 0.073_388).abs() < 1e-5);
        assert!((t_quantile(0.975, 10.0).expect("q") - 2.228_139).abs() < 1e-5);
    }

    #[test]
    fn invalid_degrees_of_freedom_are_errors() {
        assert!(matches!(
            chi_squared_sf(1.0, 0.0),
            Err(StatsError::Distribution(_))
        ));
        assert!(f_sf(1.0, 0.0, 3.0).is_err());
    }
}
