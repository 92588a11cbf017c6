use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use super::slot_utils::parse_time_of_day;

/// Duration used when a record carries none.
pub const DEFAULT_DURATION_MINUTES: i32 = 30;

/// Naive wall-clock time of day, serialized as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, LayoutError> {
        if hour > 23 || minute > 59 {
            return Err(LayoutError::InvalidTimeFormat(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self { hour: hour as u8, minute: minute as u8 })
    }

    /// Rejects values that bypassed `new` through the public fields.
    pub fn validate(&self) -> Result<(), LayoutError> {
        Self::new(self.hour as u32, self.minute as u32).map(|_| ())
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_of_day(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// Front-desk appointment status. Display only, never used by the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    #[serde(rename = "Checked-In")]
    CheckedIn,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
    #[serde(rename = "No-Show")]
    NoShow,
    Rescheduled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 7] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::CheckedIn,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
        AppointmentStatus::Rescheduled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::CheckedIn => "Checked-In",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No-Show",
            AppointmentStatus::Rescheduled => "Rescheduled",
        }
    }

    /// Cancelled and no-show blocks are drawn faded.
    pub fn is_dimmed(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| wanted.to_string())
    }
}

/// One appointment record as handed to the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "time")]
    pub start: TimeOfDay,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub visit_reason: Option<String>,
}

fn default_duration() -> i32 {
    DEFAULT_DURATION_MINUTES
}

impl Appointment {
    /// Checks the time and duration before any layout work.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.start.validate()?;
        if self.duration_minutes < 0 {
            return Err(LayoutError::InvalidDuration {
                id: self.id.clone(),
                minutes: self.duration_minutes,
            });
        }
        Ok(())
    }
}

/// Vertical placement of a block on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub top_offset: f64,
    pub block_height: f64,
}

/// Horizontal slot of a block within its overlap cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSlot {
    pub column: usize,
    pub total_columns: usize,
}

/// Column assignment keyed by appointment id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAssignment {
    pub id: String,
    pub column: usize,
    pub total_columns: usize,
}

/// Final layout of a single appointment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub id: String,
    pub top_offset: f64,
    pub block_height: f64,
    pub column: usize,
    pub total_columns: usize,
}

impl LayoutResult {
    pub fn slot(&self) -> ColumnSlot {
        ColumnSlot { column: self.column, total_columns: self.total_columns }
    }
}

/// Percent-based horizontal bounds, before the pixel gap is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalBounds {
    pub left_percent: f64,
    pub width_percent: f64,
}

/// How much text a block has room for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockDetail {
    NameOnly,
    WithTime,
    WithReason,
}

/// One labelled hour row of the timeline grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    pub hour: u8,
    pub label: String,
    pub top_offset: f64,
}
