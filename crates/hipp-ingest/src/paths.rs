//! Source file path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "HIPP_DATA_DIR";
/// Data directory used when neither a flag nor the environment sets one.
pub const DEFAULT_DATA_DIR: &str = "data";

pub const DONOR_FILE: &str = "donor_metadata/pankbase_human_donor.txt";
pub const BIOSAMPLE_FILE: &str = "biosample_metadata/biosamples.txt";
pub const TRAIT_FILE: &str = "functional_data/HIPP_all_traits.csv";

/// Locations of the three source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub donors: PathBuf,
    pub biosamples: PathBuf,
    pub traits: PathBuf,
}

impl DataPaths {
    /// Standard layout below `root`.
    pub fn from_root(root: &Path) -> Self {
        Self {
            donors: root.join(DONOR_FILE),
            biosamples: root.join(BIOSAMPLE_FILE),
            traits: root.join(TRAIT_FILE),
        }
    }

    /// Resolves the data directory.
    ///
    /// Resolution order:
    /// 1. `explicit` (a command-line flag)
    /// 2. `HIPP_DATA_DIR` environment variable
    /// 3. `./data`
    pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
        if let Some(root) = explicit {
            return root.to_path_buf();
        }
        if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
            return PathBuf::from(root);
        }
        PathBuf::from(DEFAULT_DATA_DIR)
    }

    pub fn with_donors(mut self, path: impl Into<PathBuf>) -> Self {
        self.donors = path.into();
        self
    }

    pub fn with_biosamples(mut self, path: impl Into<PathBuf>) -> Self {
        self.biosamples = path.into();
        self
    }

    pub fn with_traits(mut self, path: impl Into<PathBuf>) -> Self {
        self.traits = path.into();
        self
    }
}
