//! Resolution of command-line inputs into engine values.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use hipp_core::{AnalysisFrame, CoreError, SharedAnalysisFrame};
use hipp_ingest::{DataPaths, IngestError, load_sources};
use hipp_model::{
    AnalysisMethod, AssociationRequest, ExternalVariableMap, FilterCriteria, FilterRequest,
    MergeOptions,
};

/// Exit status when a mandatory source is unavailable (`EX_UNAVAILABLE`).
pub const EXIT_UNAVAILABLE: i32 = 69;

/// Source file locations as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub data_dir: Option<PathBuf>,
    pub donors: Option<PathBuf>,
    pub biosamples: Option<PathBuf>,
    pub traits: Option<PathBuf>,
}

impl SourceOverrides {
    /// Data directory layout with per-file overrides applied.
    pub fn resolve(&self) -> DataPaths {
        let root = DataPaths::resolve_root(self.data_dir.as_deref());
        let mut paths = DataPaths::from_root(&root);
        if let Some(path) = &self.donors {
            paths = paths.with_donors(path);
        }
        if let Some(path) = &self.biosamples {
            paths = paths.with_biosamples(path);
        }
        if let Some(path) = &self.traits {
            paths = paths.with_traits(path);
        }
        paths
    }
}

/// Loads the sources at `paths` and builds the shared analysis frame.
///
/// The loaders and the merge open their own spans.
pub fn load_analysis_frame(paths: &DataPaths) -> Result<Arc<AnalysisFrame>> {
    let start = Instant::now();
    let sources = load_sources(paths).context("load sources")?;
    let shared = SharedAnalysisFrame::from_sources(&sources, MergeOptions::default())
        .context("build analysis frame")?;
    let frame = shared.snapshot();
    info!(
        rows = frame.height(),
        columns = frame.data().width(),
        duration_ms = start.elapsed().as_millis(),
        "analysis frame ready"
    );
    Ok(frame)
}

/// Parses a JSON argument given inline or as `@path`.
pub fn parse_json_arg<T: DeserializeOwned>(raw: &str) -> Result<T> {
    match raw.strip_prefix('@') {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parse JSON in {path}"))
        }
        None => serde_json::from_str(raw).context("parse inline JSON"),
    }
}

/// Filter criteria from an optional boundary filter request.
///
/// Unknown or mistyped fields are dropped with a warning.
pub fn criteria_from_arg(raw: Option<&str>) -> Result<FilterCriteria> {
    let Some(raw) = raw else {
        return Ok(FilterCriteria::new());
    };
    let request: FilterRequest = parse_json_arg(raw).context("filter criteria")?;
    let conversion = request.to_criteria();
    for name in &conversion.ignored {
        warn!(field = %name, "filter field ignored");
    }
    Ok(conversion.criteria)
}

/// External variables from a JSON file mapping donor IDs to named values.
pub fn load_external(path: &Path) -> Result<ExternalVariableMap> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse external data {}", path.display()))
}

/// Association request from repeated flags.
///
/// An unrecognised method name falls back to linear regression.
pub fn association_request(
    variables: &[String],
    controls: &[String],
    traits: &[String],
    method: Option<&str>,
) -> AssociationRequest {
    let method = method.map_or_else(AnalysisMethod::default, |name| {
        name.parse().unwrap_or_else(|_| {
            warn!(method = name, "unknown analysis method; using linear regression");
            AnalysisMethod::LinearRegression
        })
    });
    let mut request = AssociationRequest::new(variables.iter().cloned())
        .with_controls(controls.iter().cloned())
        .with_method(method);
    if !traits.is_empty() {
        request = request.with_traits(traits.iter().cloned());
    }
    request
}

/// True when the error chain contains a missing mandatory source.
pub fn is_source_unavailable(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<CoreError>()
            .is_some_and(CoreError::is_missing_source)
            || matches!(
                cause.downcast_ref::<IngestError>(),
                Some(IngestError::FileNotFound { .. })
            )
    })
}

/// Process exit status for a failed command.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if is_source_unavailable(error) {
        EXIT_UNAVAILABLE
    } else {
        1
    }
}
