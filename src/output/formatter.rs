//! Output formatters for analysis summaries
//!
//! Provides table, JSON, and markdown output formats.

use serde::Serialize;

use crate::analysis::{ComparisonAnalysis, PassFail, ResponseTimeStats, SingleRunAnalysis};
use crate::generator::ValidationReport;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Summary formatter
pub struct ReportFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    fn json<T: Serialize>(&self, value: &T) -> String {
        if self.format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }

    /// Format the statistics of a single run
    pub fn format_single(&self, analysis: &SingleRunAnalysis) -> String {
        match self.format {
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!("\n{:=^62}\n", " Response Times "));
                output.push_str(&stats_table(&analysis.stats));
                output.push_str(&format!(
                    "  Discarded:        {:>10}  (below threshold)\n",
                    analysis.stats.discarded
                ));
                output.push_str(&format!(
                    "  Bins:             {:>10} x {}ms\n",
                    analysis.curve.points.len(),
                    analysis.bin_width
                ));
                output.push_str(&format!("{:=^62}\n", ""));
                output
            }
            OutputFormat::Json | OutputFormat::JsonPretty => self.json(analysis),
            OutputFormat::Markdown => {
                let mut output = String::from("# Response Times\n\n");
                output.push_str(&stats_markdown(&[("All Data", &analysis.stats)]));
                output.push_str(&format!(
                    "\n{} response times below the threshold were discarded.\n",
                    analysis.stats.discarded
                ));
                output
            }
        }
    }

    /// Format weekend vs. workday statistics
    pub fn format_comparison(&self, analysis: &ComparisonAnalysis) -> String {
        let columns = [
            ("Weekend", &analysis.weekend),
            ("Normal Day", &analysis.normal_day),
            ("Combined", &analysis.combined),
        ];

        match self.format {
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(
                    "\n┌──────────────┬────────┬────────┬──────────┬────────┬────────┬──────────┐\n",
                );
                output.push_str(
                    "│ Series       │ Count  │ Min    │ Q1       │ Median │ Q3     │ Max      │\n",
                );
                output.push_str(
                    "├──────────────┼────────┼────────┼──────────┼────────┼────────┼──────────┤\n",
                );
                for (name, stats) in columns {
                    output.push_str(&format!(
                        "│ {:12} │ {:>6} │ {:>6} │ {:>8.1} │ {:>6.1} │ {:>6.1} │ {:>8} │\n",
                        name,
                        stats.count,
                        stats.min,
                        stats.quartiles.q1,
                        stats.quartiles.median,
                        stats.quartiles.q3,
                        stats.max
                    ));
                }
                output.push_str(
                    "└──────────────┴────────┴────────┴──────────┴────────┴────────┴──────────┘\n",
                );
                output
            }
            OutputFormat::Json | OutputFormat::JsonPretty => self.json(analysis),
            OutputFormat::Markdown => {
                let mut output = String::from("# Weekend vs. Normal Day Response Times\n\n");
                output.push_str(&stats_markdown(&columns));
                output
            }
        }
    }

    /// Format connection found / not found counts
    pub fn format_pass_fail(&self, panels: &[(&str, PassFail)]) -> String {
        match self.format {
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!(
                    "\n{:12} {:>10} {:>10} {:>10}\n",
                    "", "Found", "Not found", "Rate"
                ));
                for (name, counts) in panels {
                    let rate = format!("{:5.1}%", counts.found_rate() * 100.0);
                    let rate = if self.colorize {
                        colorize_rate(&rate, counts.found_rate())
                    } else {
                        rate
                    };
                    output.push_str(&format!(
                        "{:12} {:>10} {:>10} {:>10}\n",
                        name, counts.pass, counts.fail, rate
                    ));
                }
                output
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                #[derive(Serialize)]
                struct PanelJson<'a> {
                    name: &'a str,
                    found: u64,
                    not_found: u64,
                    found_rate: f64,
                }

                let json: Vec<_> = panels
                    .iter()
                    .map(|(name, counts)| PanelJson {
                        name,
                        found: counts.pass,
                        not_found: counts.fail,
                        found_rate: counts.found_rate(),
                    })
                    .collect();
                self.json(&json)
            }
            OutputFormat::Markdown => {
                let mut output = String::from("# Connection Status\n\n");
                output.push_str("| Run | Found | Not found | Rate |\n");
                output.push_str("|-----|-------|-----------|------|\n");
                for (name, counts) in panels {
                    output.push_str(&format!(
                        "| {} | {} | {} | {:.1}% |\n",
                        name,
                        counts.pass,
                        counts.fail,
                        counts.found_rate() * 100.0
                    ));
                }
                output
            }
        }
    }

    /// Format a request file validation report
    pub fn format_validation(&self, report: &ValidationReport) -> String {
        match self.format {
            OutputFormat::Table => {
                let mut output = String::new();
                let status = match (report.is_valid(), self.colorize) {
                    (true, true) => "\x1b[32m✓ VALID\x1b[0m",
                    (true, false) => "✓ VALID",
                    (false, true) => "\x1b[31m✗ INVALID\x1b[0m",
                    (false, false) => "✗ INVALID",
                };
                output.push_str(&format!(
                    "\n{} {} ({}/{} rows accepted)\n",
                    status,
                    report.file,
                    report.valid_rows(),
                    report.rows
                ));
                for row in report.invalid.iter().take(20) {
                    output.push_str(&format!("  row {:>5}: {}\n", row.row, row.problems.join("; ")));
                }
                if report.invalid.len() > 20 {
                    output.push_str(&format!(
                        "  ... and {} more invalid rows\n",
                        report.invalid.len() - 20
                    ));
                }
                output
            }
            OutputFormat::Json | OutputFormat::JsonPretty => self.json(report),
            OutputFormat::Markdown => {
                let mut output = format!(
                    "# Validation of `{}`\n\n{} of {} rows accepted.\n",
                    report.file,
                    report.valid_rows(),
                    report.rows
                );
                if !report.is_valid() {
                    output.push_str("\n| Row | Problems |\n|-----|----------|\n");
                    for row in &report.invalid {
                        output.push_str(&format!("| {} | {} |\n", row.row, row.problems.join("; ")));
                    }
                }
                output
            }
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

fn stats_table(stats: &ResponseTimeStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("  Samples:          {:>10}\n", stats.count));
    output.push_str(&format!("  Min:              {:>10} ms\n", stats.min));
    output.push_str(&format!("  1st Quartile:     {:>10.1} ms\n", stats.quartiles.q1));
    output.push_str(&format!("  Median:           {:>10.1} ms\n", stats.quartiles.median));
    output.push_str(&format!("  3rd Quartile:     {:>10.1} ms\n", stats.quartiles.q3));
    output.push_str(&format!("  Max:              {:>10} ms\n", stats.max));
    output.push_str(&format!("  IQR:              {:>10.1} ms\n", stats.quartiles.iqr()));
    output.push_str(&format!("  Mean:             {:>10.2} ms\n", stats.mean));
    output
}

fn stats_markdown(columns: &[(&str, &ResponseTimeStats)]) -> String {
    let mut output = String::from("| Series | Count | Min | Q1 | Median | Q3 | Max | Mean |\n");
    output.push_str("|--------|-------|-----|----|--------|----|-----|------|\n");
    for (name, stats) in columns {
        output.push_str(&format!(
            "| {} | {} | {} | {:.1} | {:.1} | {:.1} | {} | {:.2} |\n",
            name,
            stats.count,
            stats.min,
            stats.quartiles.q1,
            stats.quartiles.median,
            stats.quartiles.q3,
            stats.max,
            stats.mean
        ));
    }
    output
}

fn colorize_rate(text: &str, rate: f64) -> String {
    if rate >= 0.9 {
        format!("\x1b[32m{text}\x1b[0m")
    } else if rate >= 0.5 {
        format!("\x1b[33m{text}\x1b[0m")
    } else {
        format!("\x1b[31m{text}\x1b[0m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistogramConfig;
    use crate::models::{PostmanRun, SAMPLE_EXPORT};

    fn single() -> SingleRunAnalysis {
        let run = PostmanRun::from_json(SAMPLE_EXPORT).unwrap();
        SingleRunAnalysis::analyze(&run, &HistogramConfig::default()).unwrap()
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TEXT"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_formatter_creation() {
        let formatter = ReportFormatter::new(OutputFormat::Json).no_color();
        assert_eq!(formatter.format, OutputFormat::Json);
        assert!(!formatter.colorize);
    }

    #[test]
    fn test_format_single_table() {
        let output = ReportFormatter::default().no_color().format_single(&single());
        assert!(output.contains("Median:"));
        assert!(output.contains("46.0 ms"));
        assert!(output.contains("x 10ms"));
    }

    #[test]
    fn test_format_single_json() {
        let output = ReportFormatter::new(OutputFormat::Json).format_single(&single());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["stats"]["count"], 4);
        assert_eq!(value["stats"]["discarded"], 2);
        assert_eq!(value["stats"]["quartiles"]["median"], 46.0);
    }

    #[test]
    fn test_format_pass_fail() {
        let panels = [
            ("Weekend", PassFail { pass: 3, fail: 1 }),
            ("Workday", PassFail { pass: 1, fail: 0 }),
        ];
        let table = ReportFormatter::default().no_color().format_pass_fail(&panels);
        assert!(table.contains("75.0%"));
        assert!(table.contains("100.0%"));

        let md = ReportFormatter::new(OutputFormat::Markdown).format_pass_fail(&panels);
        assert!(md.contains("| Weekend | 3 | 1 | 75.0% |"));
    }

    #[test]
    fn test_format_validation() {
        let report = ValidationReport {
            file: "requests.csv".to_string(),
            rows: 3,
            invalid: vec![crate::generator::RowProblem {
                row: 2,
                problems: vec!["walkingPace 90 is outside 2..=60".to_string()],
            }],
        };
        let output = ReportFormatter::default().no_color().format_validation(&report);
        assert!(output.contains("✗ INVALID requests.csv (2/3 rows accepted)"));
        assert!(output.contains("row     2: walkingPace 90"));
    }
}
