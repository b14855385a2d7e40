use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A top-level life domain. The set is fixed; areas are never created or
/// removed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    Development,
    Wellness,
    Chores,
    Education,
    Community,
    Leisure,
    Finance,
    Mindfulness,
}

impl Area {
    /// Every area, in dashboard order
    pub const ALL: [Area; 8] = [
        Area::Development,
        Area::Wellness,
        Area::Chores,
        Area::Education,
        Area::Community,
        Area::Leisure,
        Area::Finance,
        Area::Mindfulness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Area::Development => "Development",
            Area::Wellness => "Wellness",
            Area::Chores => "Chores",
            Area::Education => "Education",
            Area::Community => "Community",
            Area::Leisure => "Leisure",
            Area::Finance => "Finance",
            Area::Mindfulness => "Mindfulness",
        }
    }

    /// Display color as a `#RRGGBB` hex string
    pub fn color(self) -> &'static str {
        match self {
            Area::Development => "#3B82F6",
            Area::Wellness => "#EF4444",
            Area::Chores => "#6B7280",
            Area::Education => "#10B981",
            Area::Community => "#8B5CF6",
            Area::Leisure => "#F59E0B",
            Area::Finance => "#059669",
            Area::Mindfulness => "#7C3AED",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Area::Development => "Coding, programming, and technical skills",
            Area::Wellness => "Health, fitness, and mental wellbeing",
            Area::Chores => "Household tasks and maintenance",
            Area::Education => "Learning and skill development",
            Area::Community => "Social activities and volunteering",
            Area::Leisure => "Entertainment and hobbies",
            Area::Finance => "Money management and investments",
            Area::Mindfulness => "Meditation and self-reflection",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown area: {0}")]
pub struct UnknownArea(pub String);

impl FromStr for Area {
    type Err = UnknownArea;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownArea(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("wellness".parse::<Area>().unwrap(), Area::Wellness);
        assert_eq!(" FINANCE ".parse::<Area>().unwrap(), Area::Finance);
    }

    #[test]
    fn parse_unknown_area_fails() {
        let err = "Gardening".parse::<Area>().unwrap_err();
        assert_eq!(err.to_string(), "unknown area: Gardening");
    }

    #[test]
    fn names_round_trip_through_display() {
        for area in Area::ALL {
            assert_eq!(area.to_string().parse::<Area>().unwrap(), area);
        }
    }
}
