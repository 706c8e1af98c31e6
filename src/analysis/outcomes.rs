//! Connection found / not found totals

use serde::{Deserialize, Serialize};

use crate::models::{PostmanRun, TestCounts};

/// Passed and failed test assertions of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFail {
    pub pass: u64,
    pub fail: u64,
}

impl PassFail {
    /// Sum the pass/fail counts of every test of every request
    pub fn from_run(run: &PostmanRun) -> Self {
        run.results
            .iter()
            .flat_map(|result| result.test_pass_fail_counts.values())
            .fold(Self::default(), |acc, counts| acc.add(counts))
    }

    fn add(self, counts: &TestCounts) -> Self {
        Self {
            pass: self.pass + counts.pass,
            fail: self.fail + counts.fail,
        }
    }

    pub fn total(&self) -> u64 {
        self.pass + self.fail
    }

    /// Share of passed assertions (0.0 - 1.0)
    pub fn found_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.pass as f64 / self.total() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SAMPLE_EXPORT;

    #[test]
    fn test_from_run() {
        let run = PostmanRun::from_json(SAMPLE_EXPORT).unwrap();
        let counts = PassFail::from_run(&run);
        assert_eq!(counts, PassFail { pass: 8, fail: 1 });
        assert_eq!(counts.total(), 9);
        assert!((counts.found_rate() - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_run() {
        let run = PostmanRun::from_json(r#"{"results": [{"times": [10]}]}"#).unwrap();
        let counts = PassFail::from_run(&run);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.found_rate(), 0.0);
    }
}
