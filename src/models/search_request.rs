//! Connection search request rows
//!
//! One row of the generated test data: a source/destination stop pair, a
//! departure time and the router search settings to send with it.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::config::ValueRange;

const WALKING_PACE: ValueRange = ValueRange::new(2, 60);
const CYCLING_PACE: ValueRange = ValueRange::new(1, 60);
const BIKE_LOCK_TIME: ValueRange = ValueRange::new(0, 120);

/// Column order of a request CSV
pub const CSV_HEADER: [&str; 14] = [
    "srcStopName",
    "destStopName",
    "dateTime",
    "forward",
    "walkingPace",
    "cyclingPace",
    "bikeUnlockTime",
    "bikeLockTime",
    "useSharedBikes",
    "bikeMax15Min",
    "transferBuffer",
    "comfortBalance",
    "transferLength",
    "bikeTripBuffer",
];

/// A single random connection search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub src_stop_name: String,
    pub dest_stop_name: String,
    /// `HH:MM:SS`, or `YYYY-MM-DDTHH:MM:SS` when the date is included
    pub date_time: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub forward: bool,
    /// Minutes per kilometre
    pub walking_pace: u32,
    /// Minutes per kilometre
    pub cycling_pace: u32,
    /// Seconds
    pub bike_unlock_time: u32,
    /// Seconds
    pub bike_lock_time: u32,
    #[serde(deserialize_with = "flexible_bool")]
    pub use_shared_bikes: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub bike_max_15_min: bool,
    pub transfer_buffer: u32,
    pub comfort_balance: u32,
    pub transfer_length: u32,
    pub bike_trip_buffer: u32,
}

/// Accepts `true`/`false` in any case as well as `1`/`0`
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean '{other}'"
        ))),
    }
}

impl SearchRequest {
    /// Check the row against the values the router accepts.
    ///
    /// Returns one message per problem; an empty list means the router
    /// would take the request.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.src_stop_name.trim().is_empty() || self.dest_stop_name.trim().is_empty() {
            problems.push("stop name is empty".to_string());
        } else if self.src_stop_name == self.dest_stop_name {
            problems.push(format!(
                "source and destination are the same stop '{}'",
                self.src_stop_name
            ));
        }

        if !is_valid_date_time(&self.date_time) {
            problems.push(format!("dateTime '{}' is not a valid time", self.date_time));
        }

        check_bounds(&mut problems, "walkingPace", self.walking_pace, WALKING_PACE);
        check_bounds(&mut problems, "cyclingPace", self.cycling_pace, CYCLING_PACE);
        check_bounds(&mut problems, "bikeUnlockTime", self.bike_unlock_time, BIKE_LOCK_TIME);
        check_bounds(&mut problems, "bikeLockTime", self.bike_lock_time, BIKE_LOCK_TIME);

        if TransferBuffer::from_code(self.transfer_buffer).is_none() {
            problems.push(format!("transferBuffer {} is undefined", self.transfer_buffer));
        }
        if ComfortBalance::from_code(self.comfort_balance).is_none() {
            problems.push(format!("comfortBalance {} is undefined", self.comfort_balance));
        }
        if WalkingPreference::from_code(self.transfer_length).is_none() {
            problems.push(format!("transferLength {} is undefined", self.transfer_length));
        }
        if BikeTripBuffer::from_code(self.bike_trip_buffer).is_none() {
            problems.push(format!("bikeTripBuffer {} is undefined", self.bike_trip_buffer));
        }

        problems
    }
}

fn check_bounds(problems: &mut Vec<String>, field: &str, value: u32, range: ValueRange) {
    if !range.contains(value) {
        problems.push(format!(
            "{field} {value} is outside {}..={}",
            range.min, range.max
        ));
    }
}

fn is_valid_date_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
}

/// How much buffer is added to transfers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferBuffer {
    None,
    Short,
    Normal,
    Long,
}

impl TransferBuffer {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Short),
            2 => Some(Self::Normal),
            3 => Some(Self::Long),
            _ => None,
        }
    }
}

/// Trade-off between travel time and number of transfers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComfortBalance {
    ShortestTimeAbsolute,
    ShortestTime,
    Balanced,
    LeastTransfers,
}

impl ComfortBalance {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::ShortestTimeAbsolute),
            1 => Some(Self::ShortestTime),
            2 => Some(Self::Balanced),
            3 => Some(Self::LeastTransfers),
            _ => None,
        }
    }
}

/// How far transfers may walk, sent as `transferLength`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkingPreference {
    High,
    Normal,
    Low,
}

impl WalkingPreference {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::High),
            1 => Some(Self::Normal),
            2 => Some(Self::Low),
            _ => None,
        }
    }
}

/// Time buffer added to shared bike trips
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BikeTripBuffer {
    None,
    Short,
    Medium,
    Long,
}

impl BikeTripBuffer {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Short),
            2 => Some(Self::Medium),
            3 => Some(Self::Long),
            _ => None,
        }
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} at {}{}",
            self.src_stop_name,
            self.dest_stop_name,
            self.date_time,
            if self.forward { "" } else { " (arrive by)" }
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_request() -> SearchRequest {
    SearchRequest {
        src_stop_name: "Anděl".to_string(),
        dest_stop_name: "Florenc".to_string(),
        date_time: "08:15:00".to_string(),
        forward: true,
        walking_pace: 12,
        cycling_pace: 5,
        bike_unlock_time: 30,
        bike_lock_time: 15,
        use_shared_bikes: false,
        bike_max_15_min: true,
        transfer_buffer: 2,
        comfort_balance: 2,
        transfer_length: 1,
        bike_trip_buffer: 2,
    }
}
