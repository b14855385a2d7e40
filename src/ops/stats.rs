use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::model::area::Area;
use crate::model::project::Project;
use crate::model::store::Store;
use crate::model::task::Task;

/// Completion rate above which an area counts as on track
pub const ON_TRACK_THRESHOLD: f64 = 70.0;

/// Per-area dashboard numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Incomplete tasks scheduled to start today
    pub active_today: usize,
    /// Percentage in `0.0..=100.0`; zero when the area has no tasks
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaStatus {
    OnTrack,
    InProgress,
}

/// Totals across every area
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub active_today: usize,
    pub areas: usize,
}

/// Summary of one calendar day
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySummary {
    pub scheduled: usize,
    pub completed: usize,
    /// Sum of task durations, in hours
    pub planned_hours: f64,
    /// First incomplete task starting at or after `now`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_task_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// Copy of `projects` with each project's task counters recomputed from `tasks`.
pub fn project_counters(projects: &[Project], tasks: &[Task]) -> Vec<Project> {
    projects
        .iter()
        .map(|p| {
            let mut p = p.clone();
            p.tasks_count = tasks.iter().filter(|t| t.project_id == p.id).count();
            p.completed_tasks = tasks
                .iter()
                .filter(|t| t.project_id == p.id && t.completed)
                .count();
            p
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Area dashboard
// ---------------------------------------------------------------------------

/// Aggregate the tasks of every project in `area`.
pub fn area_stats(area: Area, tasks: &[Task], projects: &[Project], today: NaiveDate) -> AreaStats {
    let project_ids: HashSet<&str> = projects
        .iter()
        .filter(|p| p.area == area)
        .map(|p| p.id.as_str())
        .collect();

    let mut stats = AreaStats::default();
    for task in tasks.iter().filter(|t| project_ids.contains(t.project_id.as_str())) {
        stats.total_tasks += 1;
        if task.completed {
            stats.completed_tasks += 1;
        } else if task.day() == today {
            stats.active_today += 1;
        }
    }
    stats.completion_rate = completion_rate(stats.completed_tasks, stats.total_tasks);
    stats
}

/// `completed / total * 100`, or zero when there is nothing to complete.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

pub fn area_status(rate: f64) -> AreaStatus {
    if rate > ON_TRACK_THRESHOLD {
        AreaStatus::OnTrack
    } else {
        AreaStatus::InProgress
    }
}

/// Sum the per-area numbers over all areas.
pub fn overview(store: &Store, today: NaiveDate) -> Overview {
    let mut out = Overview {
        areas: Area::ALL.len(),
        ..Default::default()
    };
    for area in Area::ALL {
        let stats = area_stats(area, store.tasks(), store.projects(), today);
        out.total_tasks += stats.total_tasks;
        out.completed_tasks += stats.completed_tasks;
        out.active_today += stats.active_today;
    }
    out
}

/// Projects offered when adding a task from an area card.
pub fn projects_in_area(projects: &[Project], area: Area) -> Vec<&Project> {
    projects.iter().filter(|p| p.area == area).collect()
}

// ---------------------------------------------------------------------------
// Task views
// ---------------------------------------------------------------------------

/// Tasks of a project, in sequence order.
pub fn tasks_for_project<'a>(project_id: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.project_id == project_id).collect()
}

/// Tasks in a list, in sequence order.
pub fn tasks_for_list<'a>(list_id: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.list_id.as_deref() == Some(list_id))
        .collect()
}

/// Tasks starting on `day`, by start time. Equal start times keep sequence order.
pub fn tasks_on_day(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks.iter().filter(|t| t.day() == day).collect();
    out.sort_by_key(|t| t.start_time);
    out
}

pub fn day_summary(tasks: &[Task], day: NaiveDate, now: NaiveDateTime) -> DaySummary {
    let on_day = tasks_on_day(tasks, day);
    DaySummary {
        scheduled: on_day.len(),
        completed: on_day.iter().filter(|t| t.completed).count(),
        planned_hours: on_day.iter().map(|t| t.duration).sum(),
        next_task_id: on_day
            .iter()
            .find(|t| !t.completed && t.start_time >= now)
            .map(|t| t.id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::ProjectKind;
    use crate::model::sample::sample_store;
    use crate::model::task::Priority;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn project(id: &str, area: Area) -> Project {
        Project {
            id: id.into(),
            name: format!("Project {}", id),
            color: "#EF4444".into(),
            kind: ProjectKind::Personal,
            area,
            due_date: None,
            tasks_count: 0,
            completed_tasks: 0,
        }
    }

    fn task(id: &str, project_id: &str, completed: bool, day: NaiveDate) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {}", id),
            description: None,
            project_id: project_id.into(),
            list_id: None,
            start_time: day.and_hms_opt(9, 0, 0).unwrap(),
            duration: 1.0,
            priority: Priority::Medium,
            completed,
            color: "#EF4444".into(),
            due_date: None,
            area: None,
            category: None,
        }
    }

    #[test]
    fn counters_match_tasks() {
        let projects = vec![project("a", Area::Wellness), project("b", Area::Wellness)];
        let tasks = vec![
            task("1", "a", true, today()),
            task("2", "a", false, today()),
            task("3", "a", true, today()),
        ];
        let counted = project_counters(&projects, &tasks);
        assert_eq!((counted[0].tasks_count, counted[0].completed_tasks), (3, 2));
        assert_eq!((counted[1].tasks_count, counted[1].completed_tasks), (0, 0));
    }

    #[test]
    fn area_stats_half_complete() {
        let projects = vec![project("a", Area::Wellness), project("b", Area::Wellness)];
        let tasks = vec![
            task("1", "a", true, today()),
            task("2", "a", true, today()),
            task("3", "a", false, today()),
            task("4", "a", false, NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()),
        ];
        let stats = area_stats(Area::Wellness, &tasks, &projects, today());
        assert_eq!(stats.total_tasks, 4);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.active_today, 1);
        assert_eq!(stats.completion_rate, 50.0);
        assert_eq!(area_status(stats.completion_rate), AreaStatus::InProgress);
    }

    #[test]
    fn area_stats_empty_area_has_zero_rate() {
        let stats = area_stats(Area::Finance, &[], &[project("a", Area::Finance)], today());
        assert_eq!(stats.completion_rate, 0.0);
        assert!(!stats.completion_rate.is_nan());
    }

    #[test]
    fn area_status_threshold_is_exclusive() {
        assert_eq!(area_status(70.0), AreaStatus::InProgress);
        assert_eq!(area_status(70.5), AreaStatus::OnTrack);
    }

    #[test]
    fn overview_sums_areas() {
        let store = sample_store(today());
        let out = overview(&store, today());
        assert_eq!(out.areas, 8);
        assert_eq!(out.total_tasks, 6);
        assert_eq!(out.completed_tasks, 1);
        // Workout, stretch and vocabulary are scheduled today
        assert_eq!(out.active_today, 3);
    }

    #[test]
    fn filters_preserve_sequence_order() {
        let store = sample_store(today());
        let ids: Vec<_> = tasks_for_project("1", store.tasks()).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        let ids: Vec<_> = tasks_for_list("3", store.tasks()).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn day_view_sorted_by_start() {
        let store = sample_store(today());
        let ids: Vec<_> = tasks_on_day(store.tasks(), today()).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);

        let summary = day_summary(store.tasks(), today(), today().and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(summary.scheduled, 3);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.planned_hours, 2.5);
        assert_eq!(summary.next_task_id.as_deref(), Some("1"));
    }

    #[test]
    fn projects_in_area_filters() {
        let store = sample_store(today());
        let names: Vec<_> = projects_in_area(store.projects(), Area::Wellness)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Fitness Journey"]);
    }
}
