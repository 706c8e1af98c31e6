//! Load test result analysis
//!
//! Response time histograms, quartiles and pass/fail totals computed from
//! Postman run exports.

mod histogram;
mod outcomes;
mod response_times;
mod stats;

pub use outcomes::PassFail;
pub use response_times::{ComparisonAnalysis, Curve, SingleRunAnalysis};
pub use stats::ResponseTimeStats;
