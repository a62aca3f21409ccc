//! Column names of the donor, biosample and trait sources.
//!
//! These are the literal headers found in the source files. The merge engine
//! namespaces biosample columns with [`BIOSAMPLE_PREFIX`], so biosample
//! lookups against the analysis frame use the prefixed form.

/// Donor identifier shared by the donor and trait sources.
pub const RRID: &str = "RRID";
/// Donor accession, referenced by biosample records.
pub const ACCESSION: &str = "Accession";
pub const CENTER_DONOR_ID: &str = "Center Donor ID";
pub const HPAP_ID: &str = "HPAP ID";
/// Identifier header used by the trait file before it is renamed to [`RRID`].
pub const TRAIT_DONOR_ID: &str = "Donor ID";
/// Biosample column holding the owning donor's accession.
pub const BIOSAMPLE_DONORS: &str = "Donors";
pub const BIOSAMPLE_ACCESSION: &str = "Accession";
pub const BIOSAMPLE_PREFIX: &str = "biosample_";

pub const AGE: &str = "Age (years)";
pub const BMI: &str = "BMI";
pub const GENDER: &str = "Gender";
pub const DIABETES_STATUS: &str = "Description of diabetes status";
pub const COLLECTIONS: &str = "Collections";

pub const DONOR_IDENTIFIER_COLUMNS: &[&str] = &[ACCESSION, CENTER_DONOR_ID, RRID];
pub const BIOSAMPLE_IDENTIFIER_COLUMNS: &[&str] = &[BIOSAMPLE_ACCESSION, BIOSAMPLE_DONORS];
pub const TRAIT_IDENTIFIER_COLUMNS: &[&str] = &[RRID, HPAP_ID];

pub const DONOR_NUMERIC_COLUMNS: &[&str] = &[
    AGE,
    BMI,
    "C-Peptide (ng/ml)",
    "Diabetes Duration (years)",
    "HbA1C (percentage)",
    "AAB GADA value (unit/ml)",
    "AAB IA2 value (unit/ml)",
    "AAB IAA value (unit/ml)",
    "AAB ZNT8 value (unit/ml)",
    "Number AAB",
    "Hospital Stay (hours)",
];

pub const DONOR_BOOLEAN_COLUMNS: &[&str] = &[
    "AAB GADA POSITIVE",
    "AAB IA2 POSITIVE",
    "AAB IAA POSITIVE",
    "AAB ZNT8 POSITIVE",
    "Multi AAB",
    "Only AAB GADA",
    "Only AAB IA2",
    "Only AAB IAA",
    "Only AAB ZNT8",
    "Family History of Diabetes",
];

pub const BIOSAMPLE_NUMERIC_COLUMNS: &[&str] = &[
    "Cold Ischaemia Time (hours)",
    "Warm Ischaemia Duration / Down Time (hours)",
    "Digest Time (hours)",
    "IEQ/Pancreas Weight (grams)",
    "Islet Yield (IEQ)",
    "Percentage Trapped (percentage)",
    "Pre-Shipment Culture Time (hours)",
    "Prep Viability (percentage)",
    "Purity (Percentage)",
];

pub const BIOSAMPLE_BOOLEAN_COLUMNS: &[&str] = &[
    "Islet Function Available",
    "Islet Histology",
    "Islet Morphology",
];

/// Returns the namespaced name a biosample column carries in the analysis frame.
pub fn biosample_column(name: &str) -> String {
    format!("{BIOSAMPLE_PREFIX}{name}")
}
