//! Timestamp utilities.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Wall-clock time of a run, in the host's local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Local>);

impl Timestamp {
    /// Create a new timestamp from the current time.
    pub fn now() -> Self {
        Timestamp(Local::now())
    }

    pub fn from_datetime(dt: DateTime<Local>) -> Self {
        Timestamp(dt)
    }

    /// Format as `YYYY-MM-DD HH:MM:SS`, the layout used in reports.
    pub fn to_report_format(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_report_format())
    }
}
