//! Association engine.
//!
//! [`run`] tests every (variable, trait) pair of a request against an
//! [`hipp_core::AnalysisFrame`] and reports one [`hipp_model::PairOutcome`]
//! per pair. Each analysis method is a separate [`AssociationTest`] handler.

pub mod engine;
pub mod methods;
pub mod pair;
pub mod report;

mod design;

pub use engine::{run, run_external};
pub use methods::{
    AnovaTest, AssociationTest, CorrelationTest, Estimate, Exclusion, KruskalWallisTest,
    LinearRegressionTest, handler,
};
pub use pair::PairData;
pub use report::AssociationReport;
