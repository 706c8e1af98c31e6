//! Data models
//!
//! Generated search request rows and the Postman run exports the charts
//! are drawn from.

mod postman;
mod search_request;

pub use postman::{PostmanRun, TestCounts};
pub use search_request::{SearchRequest, CSV_HEADER};

#[cfg(test)]
pub(crate) use postman::SAMPLE_EXPORT;
#[cfg(test)]
pub(crate) use search_request::sample_request;
