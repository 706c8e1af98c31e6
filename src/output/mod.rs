//! Output formatting module
//!
//! Renders analysis and validation summaries for the terminal.

mod formatter;

pub use formatter::{OutputFormat, ReportFormatter};
