use serde::{Deserialize, Serialize};

/// Sound played when no other is chosen
pub const DEFAULT_ALARM_SOUND: &str = "birds";

/// A time-of-day alarm, independent of the project hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    /// Time of day as `HH:MM`
    pub time: String,
    pub enabled: bool,
    /// Sound identifier
    pub sound: String,
    pub label: String,
    /// Fires every day when set, otherwise once
    pub recurring: bool,
}

/// Fields supplied when adding an alarm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlarm {
    pub time: String,
    pub sound: String,
    pub label: String,
    pub recurring: bool,
}

impl NewAlarm {
    pub fn new(time: impl Into<String>, label: impl Into<String>) -> Self {
        NewAlarm {
            time: time.into(),
            sound: DEFAULT_ALARM_SOUND.to_string(),
            label: label.into(),
            recurring: true,
        }
    }
}

/// Partial update to an alarm
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmPatch {
    pub time: Option<String>,
    pub sound: Option<String>,
    pub label: Option<String>,
    pub recurring: Option<bool>,
}
