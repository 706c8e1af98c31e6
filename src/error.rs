//! Domain errors
//!
//! Failures the tools report to the user. I/O and parse plumbing goes
//! through `anyhow` with context instead.

use thiserror::Error;

/// Errors raised by the generator, the analysis and the charts
#[derive(Error, Debug)]
pub enum TestkitError {
    #[error("Column '{column}' not found in {file}")]
    MissingColumn { column: String, file: String },

    #[error("At least 2 distinct stop names are required, found {0}")]
    NotEnoughStops(usize),

    #[error("No valid response times to display: {0}")]
    NoResponseTimes(String),

    #[error("No pass/fail outcomes recorded for {0}")]
    NoOutcomes(String),

    #[error("Invalid range for {field}: min {min} is greater than max {max}")]
    InvalidRange { field: String, min: u32, max: u32 },

    #[error("Invalid base date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
