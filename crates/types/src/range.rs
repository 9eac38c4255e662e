use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Recency window selected on the dashboard header.
///
/// Serialized as the day count string (`"30"`, `"60"`, `"90"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[default]
    #[serde(rename = "30")]
    Last30Days,
    #[serde(rename = "60")]
    Last60Days,
    #[serde(rename = "90")]
    Last90Days,
}

impl DateRange {
    /// The widest window; selections are proportioned against it.
    pub const FULL_WINDOW_DAYS: u32 = 90;

    pub const ALL: [DateRange; 3] = [
        DateRange::Last30Days,
        DateRange::Last60Days,
        DateRange::Last90Days,
    ];

    pub fn days(self) -> u32 {
        match self {
            Self::Last30Days => 30,
            Self::Last60Days => 60,
            Self::Last90Days => 90,
        }
    }

    /// Header select label, e.g. "Last 30 Days".
    pub fn label(self) -> String {
        format!("Last {} Days", self.days())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

impl FromStr for DateRange {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "30" => Ok(Self::Last30Days),
            "60" => Ok(Self::Last60Days),
            "90" => Ok(Self::Last90Days),
            other => Err(TypesError::InvalidDateRange(other.to_owned())),
        }
    }
}
