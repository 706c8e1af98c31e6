//! raptor-testkit - test data and result charts for the RAPTOR trip planner
//!
//! Generates random connection search requests for load testing the router
//! and turns Postman collection runner exports into charts.
//!
//! ## Usage
//!
//! ```bash
//! # Generate 1000 random searches from a GTFS feed
//! raptor-testkit generate -i gtfs/stops.txt -o searches.csv
//!
//! # Response time histogram of one run
//! raptor-testkit histogram -i postman1.json
//!
//! # Weekend vs. normal day
//! raptor-testkit histogram --compare -w weekend.json -n workday.json
//!
//! # Connection found / not found pies
//! raptor-testkit pie -w weekend.json -n workday.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, info};

mod analysis;
mod charts;
mod cli;
mod config;
mod error;
mod generator;
mod models;
mod output;
mod utils;

use analysis::{ComparisonAnalysis, PassFail, SingleRunAnalysis};
use cli::Args;
use config::{AppConfig, ConfigFile, EnvConfig};
use generator::RequestGenerator;
use models::PostmanRun;
use output::{OutputFormat, ReportFormatter};
use utils::logger::{init_logger, LogLevel};

fn main() -> Result<()> {
    let args = Args::parse();

    let env_config = EnvConfig::load();
    let config_path = args
        .config
        .clone()
        .or_else(|| env_config.config_file.as_ref().map(PathBuf::from));
    let mut config_file = ConfigFile::resolve(config_path.as_deref())?;
    env_config.apply(&mut config_file.app);

    let level = LogLevel::resolve(
        args.verbose,
        &[
            args.log_level.as_deref(),
            config_file.app.log_level.as_deref(),
        ],
    );
    init_logger(level);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        cli::Command::Generate(generate_args) => {
            run_generate(generate_args, config_file.app)?;
        }
        cli::Command::Histogram(histogram_args) => {
            run_histogram(histogram_args, config_file.app, &mut out)?;
        }
        cli::Command::Pie(pie_args) => {
            run_pie(pie_args, &config_file.app, &mut out)?;
        }
        cli::Command::Validate(validate_args) => {
            run_validate(validate_args, &config_file.app, &mut out)?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, &config_file, &env_config)?;
        }
    }

    Ok(())
}

fn run_generate(args: cli::GenerateArgs, mut config: AppConfig) -> Result<()> {
    args.apply(&mut config.generator);
    let generator_config = &config.generator;
    let generator = RequestGenerator::new(generator_config)?;

    info!("Starting parsing");
    let stop_names = generator::load_stop_names(&args.input_file, generator_config.max_input_rows)?;
    debug!(
        "Read {} distinct stop names from {}",
        stop_names.len(),
        args.input_file.display()
    );

    info!("Starting generation");
    let mut rng = generator::rng_from_seed(generator_config.seed);
    let requests = generator.generate(&stop_names, &mut rng)?;

    generator::write_requests(&args.output_file, &requests)?;
    Ok(())
}

fn run_histogram(args: cli::HistogramArgs, mut config: AppConfig, out: &mut impl Write) -> Result<()> {
    let format = output_format(args.format.as_deref(), &config)?;
    args.apply(&mut config.histogram);
    config.histogram.validate()?;

    let formatter = formatter(format);

    match args.comparison_inputs()? {
        Some((weekend_path, normal_day_path)) => {
            let weekend = PostmanRun::load(weekend_path)?;
            let normal_day = PostmanRun::load(normal_day_path)?;

            let analysis = ComparisonAnalysis::analyze(&weekend, &normal_day, &config.histogram)?;
            debug!("Combined: {}", analysis.combined.format_summary());

            charts::draw_comparison(&args.output, &analysis, &config.histogram)?;
            writeln!(out, "{}", formatter.format_comparison(&analysis))?;
        }
        None => {
            let run = PostmanRun::load(&args.input_file)?;

            let analysis = SingleRunAnalysis::analyze(&run, &config.histogram)?;
            debug!("All data: {}", analysis.stats.format_summary());

            charts::draw_single_run(&args.output, &analysis, &config.histogram)?;
            writeln!(out, "{}", formatter.format_single(&analysis))?;
        }
    }

    Ok(())
}

fn run_pie(args: cli::PieArgs, config: &AppConfig, out: &mut impl Write) -> Result<()> {
    let format = output_format(args.format.as_deref(), config)?;

    let weekend = PassFail::from_run(&PostmanRun::load(&args.weekend)?);
    let workday = PassFail::from_run(&PostmanRun::load(&args.normal_day)?);
    let panels = [("Weekend", weekend), ("Workday", workday)];

    writeln!(out, "{}", formatter(format).format_pass_fail(&panels))?;
    charts::draw_pass_fail(&args.output, &panels, &config.pie)?;
    Ok(())
}

fn run_validate(args: cli::ValidateArgs, config: &AppConfig, out: &mut impl Write) -> Result<()> {
    let format = output_format(args.format.as_deref(), config)?;

    let report = generator::validate_requests(&args.input_file)?;
    writeln!(out, "{}", formatter(format).format_validation(&report))?;

    if !report.is_valid() {
        anyhow::bail!(
            "{} of {} rows in {} would be rejected by the router",
            report.invalid.len(),
            report.rows,
            report.file
        );
    }
    Ok(())
}

fn manage_config(
    args: cli::ConfigArgs,
    effective: &ConfigFile,
    env_config: &EnvConfig,
) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {}. Use --force to overwrite.",
                    path.display()
                );
            }

            ConfigFile::default().save(&path)?;
            println!("✓ Configuration file created: {}", path.display());
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show { env } => {
            if env {
                config::print_env_help();
                if !env_config.has_any() {
                    println!("\nNo RAPTOR_TESTKIT variables are currently set.");
                }
            } else {
                if let Some(path) = ConfigFile::find() {
                    debug!("Config file found at {}", path.display());
                }
                println!("{}", effective.to_yaml()?);
            }
        }
    }

    Ok(())
}

/// CLI flag, then config/environment, then plain text
fn output_format(flag: Option<&str>, config: &AppConfig) -> Result<OutputFormat> {
    let name = flag.or(config.output_format.as_deref()).unwrap_or("text");
    OutputFormat::from_str(name)
        .with_context(|| format!("Unknown output format: {name} (text, json, json-pretty, markdown)"))
}

fn formatter(format: OutputFormat) -> ReportFormatter {
    let formatter = ReportFormatter::new(format);
    if std::io::stdout().is_terminal() {
        formatter
    } else {
        formatter.no_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_request, SearchRequest};
    use std::path::Path;
    use tempfile::tempdir;

    const STOPS: &str = "stop_id,stop_name,stop_lat,stop_lon\n\
U1,Anděl,50.07,14.40\n\
U2,Florenc,50.09,14.44\n\
U3,Můstek,50.08,14.42\n";

    fn write_run(dir: &Path, name: &str, times: &[u64]) -> PathBuf {
        let path = dir.join(name);
        let json = serde_json::json!({
            "results": [{
                "times": times,
                "testPassFailCounts": { "Connection found": { "pass": 2, "fail": 1 } }
            }]
        });
        std::fs::write(&path, json.to_string()).unwrap();
        path
    }

    fn histogram_args(input: PathBuf, output: PathBuf, format: &str) -> cli::HistogramArgs {
        cli::HistogramArgs {
            input_file: input,
            compare: false,
            weekend: None,
            normal_day: None,
            output,
            bin_width: None,
            min_time: None,
            format: Some(format.to_string()),
        }
    }

    #[test]
    fn test_output_format_precedence() {
        let mut config = AppConfig::default();
        assert_eq!(output_format(None, &config).unwrap(), OutputFormat::Table);

        config.output_format = Some("markdown".to_string());
        assert_eq!(output_format(None, &config).unwrap(), OutputFormat::Markdown);
        assert_eq!(output_format(Some("json"), &config).unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_unknown_output_format() {
        let err = output_format(Some("xml"), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown output format: xml"));
    }

    #[test]
    fn test_generate_uses_flags_over_config() {
        let dir = tempdir().unwrap();
        let stops = dir.path().join("stops.txt");
        std::fs::write(&stops, STOPS).unwrap();
        let output = dir.path().join("out.csv");

        let mut config = AppConfig::default();
        config.generator.rows = 50;
        let args = cli::GenerateArgs {
            input_file: stops,
            output_file: output.clone(),
            rows: Some(4),
            max_input_rows: None,
            seed: Some(42),
            include_date: true,
        };
        run_generate(args, config).unwrap();

        let rows = generator::validate_requests(&output).unwrap();
        assert_eq!(rows.rows, 4);
        assert!(rows.is_valid());
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"2025-01-04T"));
    }

    #[test]
    fn test_generate_zero_rows_writes_header() {
        let dir = tempdir().unwrap();
        let stops = dir.path().join("stops.txt");
        std::fs::write(&stops, STOPS).unwrap();
        let output = dir.path().join("zero.csv");

        let args = cli::GenerateArgs {
            input_file: stops,
            output_file: output.clone(),
            rows: Some(0),
            max_input_rows: None,
            seed: Some(1),
            include_date: false,
        };
        run_generate(args, AppConfig::default()).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("\"srcStopName\""));
    }

    #[test]
    fn test_histogram_json_report_is_the_only_output() {
        let dir = tempdir().unwrap();
        let input = write_run(dir.path(), "run.json", &[2, 14, 37, 55, 120]);
        let chart = dir.path().join("chart.svg");

        let mut out = Vec::new();
        run_histogram(histogram_args(input, chart.clone(), "json"), AppConfig::default(), &mut out)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["stats"]["count"], 4);
        assert_eq!(value["stats"]["discarded"], 1);
        assert!(chart.exists());
    }

    #[test]
    fn test_histogram_min_time_flag() {
        let dir = tempdir().unwrap();
        let input = write_run(dir.path(), "run.json", &[2, 14, 37, 55, 120]);
        let mut args = histogram_args(input, dir.path().join("chart.svg"), "json");
        args.min_time = Some(40);

        let mut out = Vec::new();
        run_histogram(args, AppConfig::default(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["stats"]["count"], 2);
        assert_eq!(value["stats"]["discarded"], 3);
    }

    #[test]
    fn test_pie_report() {
        let dir = tempdir().unwrap();
        let weekend = write_run(dir.path(), "weekend.json", &[10]);
        let workday = write_run(dir.path(), "workday.json", &[20]);
        let args = cli::PieArgs {
            weekend,
            normal_day: workday,
            output: dir.path().join("pie.svg"),
            format: Some("json".to_string()),
        };

        let mut out = Vec::new();
        run_pie(args, &AppConfig::default(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "Weekend");
        assert_eq!(value[1]["found"], 2);
        assert_eq!(value[1]["not_found"], 1);
    }

    #[test]
    fn test_validate_accepts_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.csv");
        generator::write_requests(&path, &[sample_request()]).unwrap();

        let args = cli::ValidateArgs {
            input_file: path,
            format: Some("text".to_string()),
        };
        let mut out = Vec::new();
        run_validate(args, &AppConfig::default(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("1/1 rows accepted"));
    }

    #[test]
    fn test_validate_fails_on_invalid_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.csv");
        let same_stop = SearchRequest {
            dest_stop_name: "Anděl".to_string(),
            ..sample_request()
        };
        generator::write_requests(&path, &[sample_request(), same_stop]).unwrap();

        let args = cli::ValidateArgs {
            input_file: path,
            format: Some("json".to_string()),
        };
        let mut out = Vec::new();
        let err = run_validate(args, &AppConfig::default(), &mut out).unwrap_err();
        assert!(err.to_string().contains("1 of 2 rows"));

        // the report is still written before failing
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["invalid"][0]["row"], 2);
    }
}
