//! Logging utilities
//!
//! Provides logging configuration and helpers.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// First recognised level among the candidates, most specific first
    pub fn resolve(verbose: bool, candidates: &[Option<&str>]) -> Self {
        if verbose {
            return LogLevel::Debug;
        }
        candidates
            .iter()
            .flatten()
            .find_map(|s| Self::from_str(s))
            .unwrap_or(LogLevel::Info)
    }
}

/// Initialize the logger with specified level.
///
/// Log lines go to stderr; stdout carries only command reports.
pub fn init_logger(level: LogLevel) {
    let filter = EnvFilter::new(format!("raptor_testkit={}", level.to_tracing_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
