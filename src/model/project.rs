use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::area::Area;

/// Color given to projects created without an explicit choice
pub const DEFAULT_PROJECT_COLOR: &str = "#3B82F6";

/// What kind of commitment a project is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Hobby,
    Work,
    #[default]
    Personal,
}

impl ProjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectKind::Hobby => "hobby",
            ProjectKind::Work => "work",
            ProjectKind::Personal => "personal",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hobby" => Ok(ProjectKind::Hobby),
            "work" => Ok(ProjectKind::Work),
            "personal" => Ok(ProjectKind::Personal),
            other => Err(format!(
                "invalid project kind: {} (expected hobby, work, personal)",
                other
            )),
        }
    }
}

/// A named, colored unit of work belonging to one area (a.k.a. category)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// `#RRGGBB` display color, inherited by new tasks
    pub color: String,
    pub kind: ProjectKind,
    pub area: Area,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Number of tasks referencing this project (derived)
    pub tasks_count: usize,
    /// Number of completed tasks referencing this project (derived)
    pub completed_tasks: usize,
}

/// Fields supplied when creating a project
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub color: String,
    pub kind: ProjectKind,
    pub area: Area,
    pub due_date: Option<NaiveDate>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, area: Area) -> Self {
        NewProject {
            name: name.into(),
            color: DEFAULT_PROJECT_COLOR.to_string(),
            kind: ProjectKind::default(),
            area,
            due_date: None,
        }
    }
}

impl Default for NewProject {
    fn default() -> Self {
        NewProject::new(String::new(), Area::Development)
    }
}
