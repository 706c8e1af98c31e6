//! Random connection search generation

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::QuoteStyle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::{debug, info};

use crate::config::{GeneratorConfig, ValueRange};
use crate::error::TestkitError;
use crate::models::{SearchRequest, CSV_HEADER};

/// Build the generator RNG, seeded when reproducible output is wanted
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Produces random search requests between known stops
pub struct RequestGenerator<'a> {
    config: &'a GeneratorConfig,
    base_date: NaiveDate,
}

impl<'a> RequestGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Result<Self, TestkitError> {
        config.validate()?;
        let base_date = NaiveDate::parse_from_str(&config.base_date, "%Y-%m-%d")
            .map_err(|_| TestkitError::InvalidDate(config.base_date.clone()))?;
        Ok(Self { config, base_date })
    }

    /// Generate `config.rows` requests between distinct stops
    pub fn generate<R: Rng + ?Sized>(
        &self,
        stop_names: &[String],
        rng: &mut R,
    ) -> Result<Vec<SearchRequest>, TestkitError> {
        if stop_names.len() < 2 {
            return Err(TestkitError::NotEnoughStops(stop_names.len()));
        }

        let requests: Vec<_> = (0..self.config.rows)
            .map(|_| self.request(stop_names, rng))
            .collect();

        if let Some(first) = requests.first() {
            debug!("First generated request: {first}");
        }
        Ok(requests)
    }

    fn request<R: Rng + ?Sized>(&self, stop_names: &[String], rng: &mut R) -> SearchRequest {
        let pair = rand::seq::index::sample(rng, stop_names.len(), 2);
        let c = self.config;

        SearchRequest {
            src_stop_name: stop_names[pair.index(0)].clone(),
            dest_stop_name: stop_names[pair.index(1)].clone(),
            date_time: self.departure(rng),
            forward: rng.random_bool(0.5),
            walking_pace: pick(rng, c.walking_pace),
            cycling_pace: pick(rng, c.cycling_pace),
            bike_unlock_time: pick(rng, c.bike_unlock_time),
            bike_lock_time: pick(rng, c.bike_lock_time),
            use_shared_bikes: rng.random_bool(0.5),
            bike_max_15_min: rng.random_bool(0.5),
            transfer_buffer: pick(rng, c.transfer_buffer),
            comfort_balance: pick(rng, c.comfort_balance),
            transfer_length: pick(rng, c.transfer_length),
            bike_trip_buffer: pick(rng, c.bike_trip_buffer),
        }
    }

    fn departure<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let hour = rng.random_range(0..=23);
        let minute = rng.random_range(0..=59);
        let second = rng.random_range(0..=59);
        let time = self
            .base_date
            .and_hms_opt(hour, minute, second)
            .unwrap_or_default();

        if self.config.include_date {
            time.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, range: ValueRange) -> u32 {
    rng.random_range(range.min..=range.max)
}

/// Write requests as CSV with a header row; text fields are quoted.
///
/// The header is written even when there are no requests. Booleans come
/// out as quoted lowercase `"true"`/`"false"` rather than the unquoted
/// `True`/`False` of pandas-written files; the router and
/// [`read_requests`] accept both.
pub fn write_requests(path: impl AsRef<Path>, requests: &[SearchRequest]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    writer
        .write_record(CSV_HEADER)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;

    for request in requests {
        writer
            .serialize(request)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer.flush()?;

    info!("Generated file saved as {}", path.display());
    Ok(())
}

/// Read a request CSV back, keeping per-row parse failures
pub fn read_requests(path: impl AsRef<Path>) -> Result<Vec<Result<SearchRequest, String>>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open request file: {}", path.display()))?;

    Ok(reader
        .deserialize::<SearchRequest>()
        .map(|row| row.map_err(|e| e.to_string()))
        .collect())
}
