use serde::{Deserialize, Serialize};

/// A board-column-like grouping of tasks inside one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub title: String,
    /// Owning project
    pub project_id: String,
}

/// Fields supplied when creating a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    pub title: String,
    pub project_id: String,
}
