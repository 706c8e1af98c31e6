//! Configuration module
//!
//! Handles loading and layering configuration: defaults, config file,
//! environment, then command-line flags.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::ConfigFile;

use serde::{Deserialize, Serialize};

use crate::error::TestkitError;

/// Inclusive integer range used for random request values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Check `min <= max`
    pub fn validate(&self, field: &str) -> Result<(), TestkitError> {
        if self.min > self.max {
            return Err(TestkitError::InvalidRange {
                field: field.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Application configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Request generator settings
    pub generator: GeneratorConfig,

    /// Response time histogram settings
    pub histogram: HistogramConfig,

    /// Pass/fail pie chart settings
    pub pie: PieConfig,

    /// Summary output format (text, json, json-pretty, markdown)
    pub output_format: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), TestkitError> {
        self.generator.validate()?;
        self.histogram.validate()?;
        self.pie.validate()
    }
}

/// Settings for the random search request generator
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of requests to generate
    pub rows: usize,

    /// Maximum number of stop rows read from the input file
    pub max_input_rows: usize,

    /// Day the random departure times fall on (YYYY-MM-DD)
    pub base_date: String,

    /// Write the full date and time instead of only HH:MM:SS
    pub include_date: bool,

    /// Fixed RNG seed for reproducible output
    pub seed: Option<u64>,

    pub walking_pace: ValueRange,
    pub cycling_pace: ValueRange,
    pub bike_unlock_time: ValueRange,
    pub bike_lock_time: ValueRange,
    pub transfer_buffer: ValueRange,
    pub comfort_balance: ValueRange,
    pub transfer_length: ValueRange,
    pub bike_trip_buffer: ValueRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 1000,
            max_input_rows: 16844,
            base_date: "2025-01-04".to_string(),
            include_date: false,
            seed: None,
            walking_pace: ValueRange::new(8, 20),
            cycling_pace: ValueRange::new(3, 15),
            bike_unlock_time: ValueRange::new(0, 59),
            bike_lock_time: ValueRange::new(0, 59),
            transfer_buffer: ValueRange::new(0, 3),
            comfort_balance: ValueRange::new(0, 3),
            transfer_length: ValueRange::new(0, 2),
            bike_trip_buffer: ValueRange::new(0, 3),
        }
    }
}

impl GeneratorConfig {
    /// Named value ranges, in output column order
    pub fn ranges(&self) -> [(&'static str, ValueRange); 8] {
        [
            ("walking_pace", self.walking_pace),
            ("cycling_pace", self.cycling_pace),
            ("bike_unlock_time", self.bike_unlock_time),
            ("bike_lock_time", self.bike_lock_time),
            ("transfer_buffer", self.transfer_buffer),
            ("comfort_balance", self.comfort_balance),
            ("transfer_length", self.transfer_length),
            ("bike_trip_buffer", self.bike_trip_buffer),
        ]
    }

    pub fn validate(&self) -> Result<(), TestkitError> {
        for (field, range) in self.ranges() {
            range.validate(field)?;
        }
        chrono::NaiveDate::parse_from_str(&self.base_date, "%Y-%m-%d")
            .map_err(|_| TestkitError::InvalidDate(self.base_date.clone()))?;
        Ok(())
    }
}

/// Settings for the response time histogram
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Histogram bin width in milliseconds
    pub bin_width_ms: u64,

    /// Response times below this are discarded in single-run mode
    pub min_response_ms: u64,

    /// Moving average window applied to the percentages
    pub smoothing_window: usize,

    /// X axis label spacing for single-run charts
    pub tick_step_ms: u64,

    /// X axis label spacing for comparison charts
    pub compare_tick_step_ms: u64,

    pub width: u32,
    pub height: u32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_width_ms: 10,
            min_response_ms: 5,
            smoothing_window: 3,
            tick_step_ms: 100,
            compare_tick_step_ms: 50,
            width: 1000,
            height: 600,
        }
    }
}

impl HistogramConfig {
    pub fn validate(&self) -> Result<(), TestkitError> {
        if self.bin_width_ms == 0 {
            return Err(TestkitError::InvalidConfig(
                "histogram.bin_width_ms must be positive".to_string(),
            ));
        }
        if self.smoothing_window == 0 {
            return Err(TestkitError::InvalidConfig(
                "histogram.smoothing_window must be positive".to_string(),
            ));
        }
        if self.tick_step_ms == 0 || self.compare_tick_step_ms == 0 {
            return Err(TestkitError::InvalidConfig(
                "histogram tick steps must be positive".to_string(),
            ));
        }
        validate_size("histogram", self.width, self.height)
    }
}

/// Settings for the pass/fail pie charts
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PieConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
        }
    }
}

impl PieConfig {
    pub fn validate(&self) -> Result<(), TestkitError> {
        validate_size("pie", self.width, self.height)
    }
}

fn validate_size(section: &str, width: u32, height: u32) -> Result<(), TestkitError> {
    if width < 200 || height < 200 {
        return Err(TestkitError::InvalidConfig(format!(
            "{section} chart must be at least 200x200 pixels, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.generator.rows, 1000);
        assert_eq!(config.generator.max_input_rows, 16844);
        assert_eq!(config.histogram.bin_width_ms, 10);
        assert_eq!(config.histogram.min_response_ms, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_value_range() {
        let range = ValueRange::new(8, 20);
        assert!(range.contains(8));
        assert!(range.contains(20));
        assert!(!range.contains(21));
        assert!(range.validate("walking_pace").is_ok());
        assert!(ValueRange::new(5, 4).validate("walking_pace").is_err());
    }

    #[test]
    fn test_invalid_generator_config() {
        let mut config = GeneratorConfig::default();
        config.cycling_pace = ValueRange::new(15, 3);
        assert!(matches!(
            config.validate(),
            Err(TestkitError::InvalidRange { .. })
        ));

        let mut config = GeneratorConfig::default();
        config.base_date = "04/01/2025".to_string();
        assert!(matches!(config.validate(), Err(TestkitError::InvalidDate(_))));
    }

    #[test]
    fn test_invalid_histogram_config() {
        let config = HistogramConfig {
            bin_width_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = HistogramConfig {
            width: 50,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
