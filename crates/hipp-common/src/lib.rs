//! Shared utilities for HIPP crates.
//!
//! This crate provides the value-level helpers every other crate uses when it
//! reads a cell out of a Polars frame: string rendering, numeric and boolean
//! coercion, and the single definition of what counts as a missing cell.

pub mod polars;

pub use polars::{
    any_is_missing, any_to_bool, any_to_f64, any_to_string, any_to_string_non_empty,
    format_numeric, is_missing_token, parse_bool, parse_f64,
};
