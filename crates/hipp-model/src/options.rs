//! Tunable knobs for merging sources and running association tests.

use serde::{Deserialize, Serialize};

use crate::columns::{ACCESSION, BIOSAMPLE_DONORS, BIOSAMPLE_PREFIX, RRID};

/// Join keys used when building the analysis frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Donor identifier column in the donor source.
    pub donor_key: String,
    /// Donor identifier column in the trait source.
    pub trait_key: String,
    /// Biosample column that references its donor.
    pub biosample_donor_column: String,
    /// Frame column the biosample reference is matched against.
    pub biosample_target_column: String,
    /// Prefix applied to every biosample column.
    pub biosample_prefix: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            donor_key: RRID.to_string(),
            trait_key: RRID.to_string(),
            biosample_donor_column: BIOSAMPLE_DONORS.to_string(),
            biosample_target_column: ACCESSION.to_string(),
            biosample_prefix: BIOSAMPLE_PREFIX.to_string(),
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_donor_key(mut self, key: impl Into<String>) -> Self {
        self.donor_key = key.into();
        self
    }

    pub fn with_trait_key(mut self, key: impl Into<String>) -> Self {
        self.trait_key = key.into();
        self
    }

    /// Sets the biosample reference column and the frame column it matches.
    pub fn with_biosample_link(
        mut self,
        donor_column: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        self.biosample_donor_column = donor_column.into();
        self.biosample_target_column = target_column.into();
        self
    }
}

/// Minimum-size policy shared by every association test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Rows required after dropping nulls for a pair to be tested.
    pub min_samples: usize,
    /// Members required for a group to enter ANOVA or Kruskal-Wallis.
    pub min_group_size: usize,
    /// Usable groups required by the group-based tests.
    pub min_groups: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_samples: 10,
            min_group_size: 2,
            min_groups: 2,
        }
    }
}
