use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::area::Area;

/// Color used for tasks whose project has no color to inherit
pub const DEFAULT_TASK_COLOR: &str = "#3B82F6";

/// Longest block a single task can occupy, in hours
pub const MAX_TASK_HOURS: f64 = 24.0;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Single-character marker used in compact listings
    pub fn marker(self) -> char {
        match self {
            Priority::Low => '·',
            Priority::Medium => '!',
            Priority::High => '‼',
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "invalid priority: {} (expected low, medium, high)",
                other
            )),
        }
    }
}

/// A schedulable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning project
    pub project_id: String,
    /// Optional list within the owning project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    pub start_time: NaiveDateTime,
    /// Duration in hours (fractional allowed)
    pub duration: f64,
    pub priority: Priority,
    pub completed: bool,
    /// `#RRGGBB` display color, usually the project's
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    // --- Denormalized copies for display ---
    /// Area of the owning project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Area>,
    /// Name of the owning project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Task {
    /// The calendar day this task starts on
    pub fn day(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// End of the scheduled block.
    ///
    /// The duration is clamped to `0..=MAX_TASK_HOURS`; a NaN duration ends
    /// the block where it starts.
    pub fn end_time(&self) -> NaiveDateTime {
        let hours = if self.duration.is_nan() {
            0.0
        } else {
            self.duration.clamp(0.0, MAX_TASK_HOURS)
        };
        TimeDelta::try_minutes((hours * 60.0).round() as i64)
            .and_then(|block| self.start_time.checked_add_signed(block))
            .unwrap_or(self.start_time)
    }
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub project_id: String,
    pub list_id: Option<String>,
    pub start_time: NaiveDateTime,
    pub duration: f64,
    pub priority: Priority,
    /// Explicit color; the project's color is used when absent
    pub color: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// A one-hour, medium-priority task with no list
    pub fn new(title: impl Into<String>, project_id: impl Into<String>, start_time: NaiveDateTime) -> Self {
        NewTask {
            title: title.into(),
            description: None,
            project_id: project_id.into(),
            list_id: None,
            start_time,
            duration: 1.0,
            priority: Priority::default(),
            color: None,
            due_date: None,
        }
    }
}

/// A partial update to a task. `None` leaves a field untouched; the nested
/// options on clearable fields use `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub project_id: Option<String>,
    pub list_id: Option<Option<String>>,
    pub start_time: Option<NaiveDateTime>,
    pub duration: Option<f64>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub color: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}
