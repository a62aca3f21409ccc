//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use hipp_cli::config::SourceOverrides;

#[derive(Parser)]
#[command(
    name = "hipp",
    version,
    about = "Explore associations between donor metadata and islet function traits",
    long_about = "Merge donor, biosample and functional trait tables into one analysis frame,\n\
                  filter donors, and test variables against traits with linear regression,\n\
                  correlation, ANOVA or Kruskal-Wallis."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow donor identifiers in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List analysable variables grouped by source.
    Variables(CatalogArgs),

    /// List filter options and donor counts.
    Filters(CatalogArgs),

    /// List the analysis methods and when to use each.
    Methods(MethodsArgs),

    /// Apply filter criteria and list the matching donors.
    Filter(FilterArgs),

    /// Test variables against traits.
    Associate(AssociateArgs),

    /// Test externally supplied per-donor variables against traits.
    External(ExternalArgs),
}

#[derive(Args, Clone, Default)]
pub struct DataArgs {
    /// Directory holding the standard source layout (default: $HIPP_DATA_DIR or ./data).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Donor metadata file (TSV).
    #[arg(long = "donors", value_name = "PATH")]
    pub donors: Option<PathBuf>,

    /// Biosample metadata file (TSV).
    #[arg(long = "biosamples", value_name = "PATH")]
    pub biosamples: Option<PathBuf>,

    /// Functional trait file (CSV).
    #[arg(long = "traits", value_name = "PATH")]
    pub traits: Option<PathBuf>,
}

impl DataArgs {
    pub fn overrides(&self) -> SourceOverrides {
        SourceOverrides {
            data_dir: self.data_dir.clone(),
            donors: self.donors.clone(),
            biosamples: self.biosamples.clone(),
            traits: self.traits.clone(),
        }
    }
}

#[derive(Args)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct MethodsArgs {
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Filter request as JSON, or `@file.json`.
    ///
    /// Example: '{"gender": ["female"], "age_range": {"min": 18, "max": 65}}'
    #[arg(long = "criteria", value_name = "JSON")]
    pub criteria: Option<String>,

    /// Which projection of the filtered donors to print.
    #[arg(long = "view", value_enum, default_value = "ids")]
    pub view: FilterViewArg,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct AssociateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Filter request as JSON, or `@file.json`.
    #[arg(long = "criteria", value_name = "JSON")]
    pub criteria: Option<String>,

    /// Variable of interest (repeatable).
    #[arg(long = "variable", value_name = "COLUMN", required = true)]
    pub variables: Vec<String>,

    /// Control variable for regression (repeatable).
    #[arg(long = "control", value_name = "COLUMN")]
    pub controls: Vec<String>,

    /// Trait to test (repeatable; default: every trait column).
    #[arg(long = "trait", value_name = "COLUMN")]
    pub traits: Vec<String>,

    /// linear_regression, correlation, anova or kruskal_wallis (see `hipp methods`).
    #[arg(long = "method", value_name = "METHOD")]
    pub method: Option<String>,

    /// Minimum complete rows per pair.
    #[arg(long = "min-samples", value_name = "N")]
    pub min_samples: Option<usize>,

    /// Add Benjamini-Hochberg adjusted p-values to the output.
    #[arg(long = "fdr")]
    pub fdr: bool,

    /// Also list skipped and failed pairs.
    #[arg(long = "show-skipped")]
    pub show_skipped: bool,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct ExternalArgs {
    #[command(flatten)]
    pub associate: AssociateArgs,

    /// JSON file mapping donor IDs to named numeric values.
    #[arg(long = "external", value_name = "PATH")]
    pub external: PathBuf,

    /// Only check the external data against the loaded donors.
    #[arg(long = "validate-only")]
    pub validate_only: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterViewArg {
    Ids,
    Donors,
    Traits,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
