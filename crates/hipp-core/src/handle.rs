use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use hipp_ingest::SourceRegistry;
use hipp_model::MergeOptions;

use crate::error::Result;
use crate::frame::AnalysisFrame;
use crate::merge::build_analysis_frame;

/// Shared read-only analysis frame with atomic replacement.
///
/// Readers take a [`snapshot`](Self::snapshot) and keep using it for the
/// whole request; a concurrent [`replace`](Self::replace) or
/// [`reload_from`](Self::reload_from) never changes a snapshot already taken.
#[derive(Debug)]
pub struct SharedAnalysisFrame {
    current: ArcSwap<AnalysisFrame>,
    options: MergeOptions,
}

impl SharedAnalysisFrame {
    pub fn new(frame: AnalysisFrame, options: MergeOptions) -> Self {
        Self {
            current: ArcSwap::from_pointee(frame),
            options,
        }
    }

    /// Builds the initial frame from `sources`.
    pub fn from_sources<S>(sources: &S, options: MergeOptions) -> Result<Self>
    where
        S: SourceRegistry + ?Sized,
    {
        let frame = build_analysis_frame(sources, &options)?;
        Ok(Self::new(frame, options))
    }

    pub fn snapshot(&self) -> Arc<AnalysisFrame> {
        self.current.load_full()
    }

    /// Installs `frame` and returns the previous one.
    pub fn replace(&self, frame: AnalysisFrame) -> Arc<AnalysisFrame> {
        self.current.swap(Arc::new(frame))
    }

    /// Rebuilds the frame from `sources` and swaps it in.
    ///
    /// On failure the current frame stays in place and the error is returned.
    pub fn reload_from<S>(&self, sources: &S) -> Result<Arc<AnalysisFrame>>
    where
        S: SourceRegistry + ?Sized,
    {
        match build_analysis_frame(sources, &self.options) {
            Ok(frame) => {
                let rows = frame.height();
                let frame = Arc::new(frame);
                self.current.store(Arc::clone(&frame));
                info!(rows, "analysis frame reloaded");
                Ok(frame)
            }
            Err(err) => {
                warn!(error = %err, "reload failed; keeping previous analysis frame");
                Err(err)
            }
        }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }
}
