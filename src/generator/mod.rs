//! Test data generation
//!
//! Builds random connection search requests from the stop names of a
//! GTFS feed for loading the router, and checks request files against
//! the values the router accepts.

mod requests;
mod stops;
mod validate;

pub use requests::{rng_from_seed, write_requests, RequestGenerator};
pub use stops::load_stop_names;
pub use validate::{validate_requests, ValidationReport};

#[cfg(test)]
pub(crate) use validate::RowProblem;
