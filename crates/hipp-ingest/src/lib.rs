//! Source loading for the HIPP analysis engine.
//!
//! The three record collections (donors, biosamples, traits) are read from
//! delimited files, coerced column by column, and exposed through the
//! [`SourceRegistry`] trait that the merge engine consumes.

pub mod error;
pub mod loader;
pub mod paths;
pub mod source;
pub mod table;

pub use error::{IngestError, Result};
pub use loader::{
    ColumnCoercion, load_biosamples, load_donors, load_sources, load_traits, table_to_frame,
};
pub use paths::{
    BIOSAMPLE_FILE, DATA_DIR_ENV_VAR, DEFAULT_DATA_DIR, DONOR_FILE, DataPaths, TRAIT_FILE,
};
pub use source::{SourceRegistry, SourceTables};
pub use table::{DelimitedTable, SourceFormat, read_delimited};
