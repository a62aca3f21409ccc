//! Analysis frame construction and querying.
//!
//! Sources from a [`hipp_ingest::SourceRegistry`] are merged into a single
//! donor-keyed [`AnalysisFrame`]. Every column is registered once in a
//! [`FieldRegistry`] with its inferred type and origin, and the filter,
//! catalog and external-merge operations resolve names through it.

pub mod catalog;
pub mod error;
pub mod external;
pub mod filter;
pub mod frame;
pub mod handle;
pub mod inference;
pub mod merge;
pub mod registry;

pub use catalog::{
    CATEGORICAL_VALUE_LIMIT, donor_ids, donor_metadata, filter_metadata, trait_description,
    trait_table, variable_catalog,
};
pub use error::{CoreError, Result};
pub use external::{merge_external, validate_external};
pub use filter::{apply, filter_mask};
pub use frame::{AnalysisFrame, SourceCounts};
pub use handle::SharedAnalysisFrame;
pub use inference::{NUMERIC_SHARE_THRESHOLD, infer, infer_column};
pub use merge::build_analysis_frame;
pub use registry::{FieldDescriptor, FieldRegistry, FieldRole};
