//! One-way ANOVA and Kruskal-Wallis across groups.

use crate::descriptive::{mean, rank_average, sum_of_squares};
use crate::distribution::{chi_squared_sf, f_sf};
use crate::error::{Result, StatsError};

/// Statistic and p-value of a group comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTest {
    /// F for ANOVA, H for Kruskal-Wallis.
    pub statistic: f64,
    pub p_value: f64,
    pub df_between: usize,
    /// Zero for Kruskal-Wallis.
    pub df_within: usize,
    /// Total observations across groups.
    pub n: usize,
}

fn check_groups(groups: &[Vec<f64>]) -> Result<usize> {
    if groups.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            available: groups.len(),
        });
    }
    if groups.iter().any(Vec::is_empty) {
        return Err(StatsError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    Ok(groups.iter().map(Vec::len).sum())
}

/// One-way ANOVA F test.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<GroupTest> {
    let n = check_groups(groups)?;
    let k = groups.len();
    if n <= k {
        return Err(StatsError::NoResidualDegreesOfFreedom);
    }
    let all: Vec<f64> = groups.iter().flatten().copied().collect();
    let grand = mean(&all);

    let ss_between: f64 = groups
        .iter()
        .map(|group| group.len() as f64 * (mean(group) - grand).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .map(|group| sum_of_squares(group, mean(group)))
        .sum();
    if ss_within == 0.0 {
        return Err(StatsError::ZeroVariance);
    }

    let df_between = k - 1;
    let df_within = n - k;
    let statistic = (ss_between / df_between as f64) / (ss_within / df_within as f64);
    Ok(GroupTest {
        statistic,
        p_value: f_sf(statistic, df_between as f64, df_within as f64)?,
        df_between,
        df_within,
        n,
    })
}

/// Kruskal-Wallis H test with tie correction.
pub fn kruskal_wallis(groups: &[Vec<f64>]) -> Result<GroupTest> {
    let n = check_groups(groups)?;
    let all: Vec<f64> = groups.iter().flatten().copied().collect();
    let (ranks, ties) = rank_average(&all);

    let nf = n as f64;
    let mut offset = 0;
    let mut rank_term = 0.0;
    for group in groups {
        let rank_sum: f64 = ranks[offset..offset + group.len()].iter().sum();
        rank_term += rank_sum * rank_sum / group.len() as f64;
        offset += group.len();
    }
    let h = 12.0 / (nf * (nf + 1.0)) * rank_term - 3.0 * (nf + 1.0);

    let tie_sum: f64 = ties
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum();
    let correction = 1.0 - tie_sum / (nf * nf * nf - nf);
    if correction <= 0.0 {
        return Err(StatsError::IdenticalValues);
    }
    let statistic = h / correction;
    let df_between = groups.len() - 1;
    Ok(GroupTest {
        statistic,
        p_value: chi_squared_sf(statistic, df_between as f64)?,
        df_between,
        df_within: 0,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anova_matches_hand_computation() {
        // Means 2, 5, 8; grand mean 5; SSB = 54, SSW = 6, F = 27 on (2, 6).
        let groups = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]];
        let test = one_way_anova(&groups).expect("anova");
        assert!((test.statistic - 27.0).abs() < 1e-12);
        assert_eq!((test.df_between, test.df_within, test.n), (2, 6, 9));
        // With two numerator df the upper tail is (1 + 2F/6)^-3.
        assert!((test.p_value - 10.0_f64.powi(-3)).abs() < 1e-9);
    }

    #[test]
    fn anova_without_within_group_spread_fails() {
        let groups = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        assert_eq!(one_way_anova(&groups), Err(StatsError::ZeroVariance));
    }

    #[test]
    fn kruskal_wallis_without_ties() {
        // Ranks are the values; R = 6, 15, 24 over n = 9.
        let groups = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]];
        let test = kruskal_wallis(&groups).expect("kruskal");
        let expected = 12.0 / 90.0 * (36.0 + 225.0 + 576.0) / 3.0 - 30.0;
        assert!((test.statistic - expected).abs() < 1e-12);
        assert!((test.p_value - (-expected / 2.0).exp()).abs() < 1e-9);
    }

    #[test]
    fn kruskal_wallis_of_identical_values_fails() {
        let groups = vec![vec![3.0, 3.0], vec![3.0, 3.0, 3.0]];
        assert_eq!(kruskal_wallis(&groups), Err(StatsError::IdenticalValues));
    }

    #[test]
    fn a_single_group_is_rejected() {
        assert!(matches!(
            one_way_anova(&[vec![1.0, 2.0]]),
            Err(StatsError::InsufficientData { .. })
        ));
    }
}
