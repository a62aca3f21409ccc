pub mod association;
pub mod columns;
pub mod enums;
pub mod error;
pub mod external;
pub mod filter;
pub mod options;
pub mod variable;

pub use association::{
    AssociationRequest, AssociationResult, AssociationSummary, FailureReason, OutputFields,
    PairEvaluation, PairOutcome, SkipReason,
};
pub use enums::{AnalysisMethod, SourceKind, VariableSource, VariableType};
pub use error::{ModelError, Result};
pub use external::{ExternalValidation, ExternalVariableMap, VALIDATION_ID_LIMIT};
pub use filter::{
    FILTER_FIELDS, FilterConversion, FilterCriteria, FilterField, FilterKind, FilterRequest,
    FilterValue, RangeFilter, filter_field,
};
pub use options::{AnalysisOptions, MergeOptions};
pub use variable::{FilterMetadata, NumericBounds, ValueRange, VariableCatalog, VariableDescriptor};
