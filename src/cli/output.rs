use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::model::alarm::Alarm;
use crate::model::area::Area;
use crate::model::config::ViewMode;
use crate::model::list::List;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::ops::check::CheckError;
use crate::ops::search::MatchField;
use crate::ops::stats::{AreaStats, AreaStatus, DaySummary, Overview};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodayJson<'a> {
    pub date: NaiveDate,
    pub summary: DaySummary,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct AreaCardJson {
    pub area: Area,
    pub color: &'static str,
    pub description: &'static str,
    pub projects: usize,
    #[serde(flatten)]
    pub stats: AreaStats,
    pub status: AreaStatus,
}

#[derive(Serialize)]
pub struct AreasJson {
    pub overview: Overview,
    pub areas: Vec<AreaCardJson>,
}

#[derive(Serialize)]
pub struct ListJson<'a> {
    #[serde(flatten)]
    pub list: &'a List,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct SearchHitJson<'a> {
    pub task_id: &'a str,
    pub title: &'a str,
    pub fields: Vec<MatchField>,
}

#[derive(Serialize)]
pub struct NextAlarmJson<'a> {
    pub id: &'a str,
    pub fires_at: NaiveDateTime,
}

#[derive(Serialize)]
pub struct AlarmsJson<'a> {
    pub alarms: &'a [Alarm],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextAlarmJson<'a>>,
}

#[derive(Serialize)]
pub struct SettingsJson {
    pub dark_mode: bool,
    pub timezone: String,
    pub default_view: ViewMode,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn check_char(task: &Task) -> char {
    if task.completed { 'x' } else { ' ' }
}

fn time_range(task: &Task) -> String {
    format!(
        "{}-{}",
        task.start_time.format("%H:%M"),
        task.end_time().format("%H:%M")
    )
}

fn category_suffix(task: &Task) -> String {
    task.category
        .as_ref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default()
}

/// Format a task as a one-line summary, including its day
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {} {} {} {} {}{}",
        check_char(task),
        task.id,
        task.start_time.format("%Y-%m-%d"),
        time_range(task),
        task.priority.marker(),
        task.title,
        category_suffix(task)
    )
}

/// Like `format_task_line` but without the day, for single-day schedules
pub fn format_schedule_line(task: &Task) -> String {
    format!(
        "[{}] {} {} {} {}{}",
        check_char(task),
        task.id,
        time_range(task),
        task.priority.marker(),
        task.title,
        category_suffix(task)
    )
}

pub fn format_day_header(day: NaiveDate) -> String {
    format!("== {} ==", day.format("%A, %B %-d, %Y"))
}

pub fn format_day_summary(summary: &DaySummary, next: Option<&Task>) -> Vec<String> {
    let mut lines = vec![format!(
        "{} scheduled, {} done, {}h planned",
        summary.scheduled,
        summary.completed,
        format_hours(summary.planned_hours)
    )];
    if let Some(task) = next {
        lines.push(format!(
            "next: {} {} at {}",
            task.id,
            task.title,
            task.start_time.format("%H:%M")
        ));
    }
    lines
}

/// Hours without a trailing `.0` for whole numbers
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{:.1}", hours)
    }
}

pub fn format_overview(overview: &Overview) -> String {
    format!(
        "{} tasks, {} done, {} active today across {} areas",
        overview.total_tasks, overview.completed_tasks, overview.active_today, overview.areas
    )
}

fn status_label(status: AreaStatus) -> &'static str {
    match status {
        AreaStatus::OnTrack => "on track",
        AreaStatus::InProgress => "in progress",
    }
}

/// Format one area card of the dashboard
pub fn format_area_card(area: Area, stats: &AreaStats, status: AreaStatus) -> Vec<String> {
    vec![
        format!("{} {}  {}", area.name(), area.color(), area.description()),
        format!(
            "  {:.0}% complete  {}/{} tasks  {} today  [{}]",
            stats.completion_rate,
            stats.completed_tasks,
            stats.total_tasks,
            stats.active_today,
            status_label(status)
        ),
    ]
}

pub fn format_project_line(project: &Project) -> String {
    let due = project
        .due_date
        .map(|d| format!(" due {}", d))
        .unwrap_or_default();
    format!(
        "{} {} [{}, {}] {}/{}{}",
        project.id,
        project.name,
        project.area,
        project.kind,
        project.completed_tasks,
        project.tasks_count,
        due
    )
}

/// Header line for a list section
pub fn format_list_header(list: &List) -> String {
    format!("== {} ({}) ==", list.title, list.id)
}

pub fn format_alarm_line(alarm: &Alarm) -> String {
    format!(
        "{} {} [{}] {} ({}, {})",
        alarm.id,
        alarm.time,
        if alarm.enabled { "on" } else { "off" },
        alarm.label,
        alarm.sound,
        if alarm.recurring { "daily" } else { "once" }
    )
}

pub fn format_check_error(err: &CheckError) -> String {
    match err {
        CheckError::DuplicateId { kind, id } => format!("duplicate {} id: {}", kind, id),
        CheckError::DanglingProject {
            task_id,
            project_id,
        } => format!("task {} has dangling project: {}", task_id, project_id),
        CheckError::DanglingList { task_id, list_id } => {
            format!("task {} has dangling list: {}", task_id, list_id)
        }
        CheckError::ListProjectMismatch {
            task_id,
            list_id,
            task_project_id,
            list_project_id,
        } => format!(
            "task {} is in project {} but its list {} belongs to project {}",
            task_id, task_project_id, list_id, list_project_id
        ),
        CheckError::OrphanList {
            list_id,
            project_id,
        } => format!("list {} has dangling project: {}", list_id, project_id),
    }
}

pub fn format_settings(settings: &SettingsJson) -> Vec<String> {
    vec![
        format!("dark mode: {}", if settings.dark_mode { "on" } else { "off" }),
        format!("timezone: {}", settings.timezone),
        format!(
            "default view: {}",
            match settings.default_view {
                ViewMode::Calendar => "calendar",
                ViewMode::Areas => "areas",
            }
        ),
    ]
}
