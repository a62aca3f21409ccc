use polars::prelude::DataFrame;

use hipp_model::SourceKind;

/// Read-only access to the three record collections.
///
/// `None` means the source is absent. Donor and trait sources are
/// mandatory for building an analysis frame; biosamples are optional.
pub trait SourceRegistry {
    fn donors(&self) -> Option<&DataFrame>;
    fn biosamples(&self) -> Option<&DataFrame>;
    fn traits(&self) -> Option<&DataFrame>;

    fn source(&self, kind: SourceKind) -> Option<&DataFrame> {
        match kind {
            SourceKind::Donor => self.donors(),
            SourceKind::Biosample => self.biosamples(),
            SourceKind::Trait => self.traits(),
        }
    }
}

/// In-memory source registry.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub donors: Option<DataFrame>,
    pub biosamples: Option<DataFrame>,
    pub traits: Option<DataFrame>,
}

impl SourceTables {
    pub fn new(donors: DataFrame, traits: DataFrame) -> Self {
        Self {
            donors: Some(donors),
            biosamples: None,
            traits: Some(traits),
        }
    }

    pub fn with_biosamples(mut self, biosamples: DataFrame) -> Self {
        self.biosamples = Some(biosamples);
        self
    }
}

impl SourceRegistry for SourceTables {
    fn donors(&self) -> Option<&DataFrame> {
        self.donors.as_ref()
    }

    fn biosamples(&self) -> Option<&DataFrame> {
        self.biosamples.as_ref()
    }

    fn traits(&self) -> Option<&DataFrame> {
        self.traits.as_ref()
    }
}
