//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{GeneratorConfig, HistogramConfig};

/// Test data and report tooling for the RAPTOR trip planner
#[derive(Parser, Debug)]
#[command(name = "raptor-testkit")]
#[command(version = "0.1.0")]
#[command(about = "Generate router load-test requests and chart Postman run results")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate random connection search requests from GTFS stops
    Generate(GenerateArgs),

    /// Plot a response time histogram from Postman run exports
    Histogram(HistogramArgs),

    /// Plot connection found / not found pie charts
    Pie(PieArgs),

    /// Check a request file against the values the router accepts
    Validate(ValidateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// GTFS stops file with a stop_name column
    #[arg(short, long, default_value = "stops.txt")]
    pub input_file: PathBuf,

    /// Output CSV file
    #[arg(short, long, default_value = "generated_random_stops.csv")]
    pub output_file: PathBuf,

    /// Number of requests to generate
    #[arg(long)]
    pub rows: Option<usize>,

    /// Maximum number of stop rows to read
    #[arg(long)]
    pub max_input_rows: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the full date in dateTime instead of the time only
    #[arg(long)]
    pub include_date: bool,
}

/// Arguments for histogram command
#[derive(Parser, Debug)]
pub struct HistogramArgs {
    /// Postman run export
    #[arg(short, long, default_value = "postman1.json")]
    pub input_file: PathBuf,

    /// Compare a weekend run with a normal day run
    #[arg(long)]
    pub compare: bool,

    /// Weekend run export (with --compare)
    #[arg(short, long)]
    pub weekend: Option<PathBuf>,

    /// Normal day run export (with --compare)
    #[arg(short, long)]
    pub normal_day: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, default_value = "response_times.svg")]
    pub output: PathBuf,

    /// Histogram bin width in milliseconds
    #[arg(long)]
    pub bin_width: Option<u64>,

    /// Discard single-run response times below this many milliseconds
    #[arg(long)]
    pub min_time: Option<u64>,

    /// Summary format (text, json, json-pretty, markdown)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for pie command
#[derive(Parser, Debug)]
pub struct PieArgs {
    /// Weekend run export
    #[arg(short, long)]
    pub weekend: PathBuf,

    /// Normal day run export
    #[arg(short, long)]
    pub normal_day: PathBuf,

    /// Output SVG file
    #[arg(short, long, default_value = "pass_fail.svg")]
    pub output: PathBuf,

    /// Summary format (text, json, json-pretty, markdown)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Request CSV to check
    #[arg(short, long, default_value = "generated_random_stops.csv")]
    pub input_file: PathBuf,

    /// Report format (text, json, json-pretty, markdown)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init {
        /// Output file path
        #[arg(short, long, default_value = "raptor-testkit.yaml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// List environment variables instead
        #[arg(long)]
        env: bool,
    },
}

impl GenerateArgs {
    /// Override config values with the flags that were given
    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(max_input_rows) = self.max_input_rows {
            config.max_input_rows = max_input_rows;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.include_date {
            config.include_date = true;
        }
    }
}

impl HistogramArgs {
    /// Override config values with the flags that were given
    pub fn apply(&self, config: &mut HistogramConfig) {
        if let Some(bin_width) = self.bin_width {
            config.bin_width_ms = bin_width;
        }
        if let Some(min_time) = self.min_time {
            config.min_response_ms = min_time;
        }
    }

    /// The weekend and normal day files when running in compare mode
    pub fn comparison_inputs(&self) -> anyhow::Result<Option<(&PathBuf, &PathBuf)>> {
        if !self.compare {
            return Ok(None);
        }
        match (&self.weekend, &self.normal_day) {
            (Some(weekend), Some(normal_day)) => Ok(Some((weekend, normal_day))),
            _ => anyhow::bail!("--compare requires both --weekend and --normal-day to be specified."),
        }
    }
}
