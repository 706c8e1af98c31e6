//! Request file validation

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use super::requests::read_requests;

/// A row the router would reject
#[derive(Clone, Debug, Serialize)]
pub struct RowProblem {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub problems: Vec<String>,
}

/// Outcome of checking a request file
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    pub file: String,
    pub rows: usize,
    pub invalid: Vec<RowProblem>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn valid_rows(&self) -> usize {
        self.rows - self.invalid.len()
    }
}

/// Check every row of a request CSV against the router's accepted values
pub fn validate_requests(path: impl AsRef<Path>) -> Result<ValidationReport> {
    let path = path.as_ref();
    let rows = read_requests(path)?;

    let invalid: Vec<RowProblem> = rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let problems = match row {
                Ok(request) => request.problems(),
                Err(e) => vec![format!("unreadable row: {e}")],
            };
            (!problems.is_empty()).then(|| RowProblem {
                row: idx + 1,
                problems,
            })
        })
        .collect();

    debug!(
        "Validated {} rows in {}, {} invalid",
        rows.len(),
        path.display(),
        invalid.len()
    );

    Ok(ValidationReport {
        file: path.display().to_string(),
        rows: rows.len(),
        invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::write_requests;
    use crate::models::{sample_request, SearchRequest};
    use tempfile::tempdir;

    #[test]
    fn test_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.csv");
        write_requests(&path, &[sample_request(), sample_request()]).unwrap();

        let report = validate_requests(&path).unwrap();
        assert_eq!(report.rows, 2);
        assert!(report.is_valid());
        assert_eq!(report.valid_rows(), 2);
    }

    #[test]
    fn test_invalid_rows_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.csv");
        let bad = SearchRequest {
            walking_pace: 90,
            ..sample_request()
        };
        write_requests(&path, &[sample_request(), bad]).unwrap();

        let report = validate_requests(&path).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].row, 2);
        assert!(report.invalid[0].problems[0].contains("walkingPace"));
    }

    #[test]
    fn test_unreadable_row_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.csv");
        std::fs::write(
            &path,
            "srcStopName,destStopName,dateTime,forward,walkingPace,cyclingPace,\
bikeUnlockTime,bikeLockTime,useSharedBikes,bikeMax15Min,transferBuffer,comfortBalance,\
transferLength,bikeTripBuffer\n\
A,B,10:00:00,maybe,12,5,30,15,true,true,2,2,1,2\n",
        )
        .unwrap();

        let report = validate_requests(&path).unwrap();
        assert_eq!(report.invalid.len(), 1);
        assert!(report.invalid[0].problems[0].starts_with("unreadable row"));
    }
}
