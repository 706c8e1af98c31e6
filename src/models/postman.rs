//! Postman collection run export
//!
//! Only the fields the charts read are modelled; everything else in the
//! export is ignored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// A collection run as exported by the Postman runner
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PostmanRun {
    /// One entry per request in the collection
    pub results: Vec<RequestResult>,
}

/// Timings and test outcomes of a single request across all iterations
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RequestResult {
    #[serde(default)]
    pub name: Option<String>,

    /// Response times in milliseconds, one per iteration
    #[serde(default)]
    pub times: Vec<u64>,

    /// Pass/fail totals keyed by test name
    #[serde(default, rename = "testPassFailCounts")]
    pub test_pass_fail_counts: BTreeMap<String, TestCounts>,
}

/// Pass/fail totals for one test script assertion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    #[serde(default)]
    pub pass: u64,
    #[serde(default)]
    pub fail: u64,
}

impl PostmanRun {
    /// Load an export from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open Postman export: {}", path.display()))?;
        let run: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse Postman export: {}", path.display()))?;

        debug!(
            "Loaded {} request results from {}",
            run.results.len(),
            path.display()
        );
        Ok(run)
    }

    /// Parse an export from a JSON string
    #[cfg(test)]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse Postman export")
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_EXPORT: &str = r#"{
    "id": "3a1f",
    "name": "Random searches",
    "timestamp": "2025-01-03T10:00:00.000Z",
    "results": [
        {
            "id": "a1",
            "name": "adv-connection",
            "url": "http://localhost:5000/adv-connection",
            "time": 120,
            "responseCode": { "code": 200, "name": "OK" },
            "tests": { "Connection found": true },
            "testPassFailCounts": {
                "Connection found": { "pass": 3, "fail": 1 },
                "Status code is 200": { "pass": 4, "fail": 0 }
            },
            "times": [2, 14, 120, 37],
            "allTests": []
        },
        {
            "id": "a2",
            "name": "connection",
            "times": [55, 3],
            "testPassFailCounts": {
                "Connection found": { "pass": 1 }
            }
        }
    ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_sample_export() {
        let run = PostmanRun::from_json(SAMPLE_EXPORT).unwrap();
        assert_eq!(run.results.len(), 2);
        assert_eq!(run.results[0].times, vec![2, 14, 120, 37]);
        assert_eq!(run.results[0].name.as_deref(), Some("adv-connection"));
        assert_eq!(
            run.results[1].test_pass_fail_counts["Connection found"],
            TestCounts { pass: 1, fail: 0 }
        );
    }

    #[test]
    fn test_missing_optional_fields() {
        let run = PostmanRun::from_json(r#"{"results": [{}]}"#).unwrap();
        assert!(run.results[0].times.is_empty());
        assert!(run.results[0].test_pass_fail_counts.is_empty());
    }

    #[test]
    fn test_missing_results_is_error() {
        assert!(PostmanRun::from_json(r#"{"name": "empty"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("postman1.json");
        std::fs::write(&path, SAMPLE_EXPORT).unwrap();

        let run = PostmanRun::load(&path).unwrap();
        assert_eq!(run.results.len(), 2);

        assert!(PostmanRun::load(dir.path().join("missing.json")).is_err());
    }
}
