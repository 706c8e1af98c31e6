//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

use super::AppConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "RAPTOR_TESTKIT";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Config file from RAPTOR_TESTKIT_CONFIG
    pub config_file: Option<String>,
    /// Log level from RAPTOR_TESTKIT_LOG
    pub log_level: Option<String>,
    /// Generator seed from RAPTOR_TESTKIT_SEED
    pub seed: Option<u64>,
    /// Generated row count from RAPTOR_TESTKIT_ROWS
    pub rows: Option<usize>,
    /// Output format from RAPTOR_TESTKIT_FORMAT
    pub format: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            config_file: get_env("CONFIG"),
            log_level: get_env("LOG"),
            seed: get_env_parse("SEED"),
            rows: get_env_parse("ROWS"),
            format: get_env("FORMAT"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.config_file.is_some()
            || self.log_level.is_some()
            || self.seed.is_some()
            || self.rows.is_some()
            || self.format.is_some()
    }

    /// Overlay the set variables onto a loaded config
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
        if let Some(seed) = self.seed {
            config.generator.seed = Some(seed);
        }
        if let Some(rows) = self.rows {
            config.generator.rows = rows;
        }
        if let Some(format) = &self.format {
            config.output_format = Some(format.clone());
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.trim().parse().ok())
}

/// Print all RAPTOR_TESTKIT environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_CONFIG   Path to configuration file");
    println!("  {ENV_PREFIX}_LOG      Log level (trace, debug, info, warn, error)");
    println!("  {ENV_PREFIX}_SEED     Fixed seed for the request generator");
    println!("  {ENV_PREFIX}_ROWS     Number of requests to generate");
    println!("  {ENV_PREFIX}_FORMAT   Summary format (text, json, json-pretty, markdown)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_SEED=42");
    println!("  raptor-testkit generate -i stops.txt");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.seed.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_load_and_apply() {
        let keys = [
            format!("{ENV_PREFIX}_SEED"),
            format!("{ENV_PREFIX}_ROWS"),
            format!("{ENV_PREFIX}_FORMAT"),
        ];
        env::set_var(&keys[0], "42");
        env::set_var(&keys[1], "25");
        env::set_var(&keys[2], "json");

        let env_config = EnvConfig::load();
        for key in &keys {
            env::remove_var(key);
        }

        assert_eq!(env_config.seed, Some(42));
        assert_eq!(env_config.rows, Some(25));
        assert!(env_config.has_any());

        let mut config = AppConfig::default();
        env_config.apply(&mut config);
        assert_eq!(config.generator.seed, Some(42));
        assert_eq!(config.generator.rows, 25);
        assert_eq!(config.output_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_apply_keeps_unset_values() {
        let mut config = AppConfig::default();
        EnvConfig {
            log_level: Some("debug".to_string()),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.generator.rows, 1000);
        assert!(config.generator.seed.is_none());
    }
}
