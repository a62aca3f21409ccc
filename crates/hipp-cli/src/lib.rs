//! Library side of the `hipp` binary: configuration, logging and rendering.

pub mod config;
pub mod logging;
pub mod summary;
