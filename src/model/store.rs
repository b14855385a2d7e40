use serde::Serialize;

use super::alarm::Alarm;
use super::list::List;
use super::project::Project;
use super::task::Task;
use crate::ops::stats::project_counters;

/// One immutable snapshot of all planning state.
///
/// The store only offers read access and whole-collection replacement. Every
/// mutation in `ops` takes a snapshot by reference and builds a new one, so two
/// snapshots can be compared with `==` to detect a change. Replacing projects or
/// tasks recomputes each project's task counters, which keeps them consistent
/// with the task sequence at all times.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Store {
    projects: Vec<Project>,
    lists: Vec<List>,
    tasks: Vec<Task>,
    alarms: Vec<Alarm>,
}

impl Store {
    pub fn new(projects: Vec<Project>, lists: Vec<List>, tasks: Vec<Task>, alarms: Vec<Alarm>) -> Self {
        let projects = project_counters(&projects, &tasks);
        Store {
            projects,
            lists,
            tasks,
            alarms,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn list(&self, id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn alarm(&self, id: &str) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id == id)
    }

    /// Replace the project sequence. Counters are recomputed.
    pub fn with_projects(&self, projects: Vec<Project>) -> Store {
        Store {
            projects: project_counters(&projects, &self.tasks),
            lists: self.lists.clone(),
            tasks: self.tasks.clone(),
            alarms: self.alarms.clone(),
        }
    }

    pub fn with_lists(&self, lists: Vec<List>) -> Store {
        Store {
            lists,
            ..self.clone()
        }
    }

    /// Replace the task sequence. Counters are recomputed.
    pub fn with_tasks(&self, tasks: Vec<Task>) -> Store {
        Store {
            projects: project_counters(&self.projects, &tasks),
            lists: self.lists.clone(),
            tasks,
            alarms: self.alarms.clone(),
        }
    }

    pub fn with_alarms(&self, alarms: Vec<Alarm>) -> Store {
        Store {
            alarms,
            ..self.clone()
        }
    }
}
