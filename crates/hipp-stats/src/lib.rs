//! Statistical primitives used by the association engine.
//!
//! Every routine works on plain `f64` slices and reports degenerate input
//! through [`StatsError`] instead of returning `NaN`.

pub mod bootstrap;
pub mod correction;
pub mod correlation;
pub mod descriptive;
pub mod distribution;
pub mod effect;
pub mod error;
pub mod group;
pub mod ols;

pub use bootstrap::bootstrap_ci;
pub use correction::benjamini_hochberg;
pub use correlation::{
    CorrelationEstimate, FISHER_Z_95, fisher_interval, pearson, pearson_confidence_interval,
};
pub use descriptive::{mean, percentile, rank_average, sample_variance};
pub use effect::{cohens_d, eta_squared};
pub use error::{Result, StatsError};
pub use group::{GroupTest, kruskal_wallis, one_way_anova};
pub use ols::{OlsFit, OlsTerm, fit_ols};
