use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Which main view the planner opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Calendar,
    Areas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// IANA timezone name shown in settings
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Dark mode when no preference has been saved yet
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub default_view: ViewMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            timezone: default_timezone(),
            dark_mode: false,
            default_view: ViewMode::default(),
        }
    }
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

/// How new entity identifiers are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Increasing integers, continuing after the highest numeric id in use
    #[default]
    Sequential,
    /// Wall-clock milliseconds, bumped past any collision
    Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive, e.g. `warn` or `lifegrid=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
