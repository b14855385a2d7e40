use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::model::area::Area;
use crate::model::project::ProjectKind;
use crate::model::task::{MAX_TASK_HOURS, Priority};
use crate::ops::alarm_ops::parse_alarm_time;

#[derive(Parser)]
#[command(name = "lg", about = concat!("lifegrid v", env!("CARGO_PKG_VERSION"), " - plan your days by life area"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Treat this day as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    View(ViewCommand),
    /// Show or change preferences
    Settings(SettingsArgs),
    /// Start an interactive planning session (one command per line on stdin)
    Shell,
}

/// Read-only views, available both as subcommands and inside `lg shell`
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ViewCommand {
    /// Show the day's schedule and summary
    Today,
    /// Show the life areas dashboard
    Areas,
    /// List projects
    Projects(ProjectsArgs),
    /// List lists with their tasks
    Lists(ListsArgs),
    /// List tasks
    Tasks(TasksArgs),
    /// Search task titles, descriptions and project names by regex
    Search(SearchArgs),
    /// Validate referential integrity
    Check,
    /// List alarms and the next one to ring
    Alarms,
}

// ---------------------------------------------------------------------------
// View args
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ProjectsArgs {
    /// Only projects in this area
    #[arg(long)]
    pub area: Option<Area>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ListsArgs {
    /// Only lists of this project
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq)]
#[command(group(ArgGroup::new("scope").args(["project", "list", "unlisted"])))]
pub struct TasksArgs {
    /// Only tasks of this project
    #[arg(long)]
    pub project: Option<String>,
    /// Only tasks in this list
    #[arg(long)]
    pub list: Option<String>,
    /// Only tasks of this project that are in no list
    #[arg(long, value_name = "PROJECT")]
    pub unlisted: Option<String>,
    /// Only tasks starting on this day
    #[arg(long)]
    pub day: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SearchArgs {
    /// Regex pattern (case-insensitive unless it contains uppercase)
    pub pattern: String,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Turn dark mode on or off
    #[arg(long, value_name = "on|off", value_parser = parse_on_off)]
    pub dark_mode: Option<bool>,
}

// ---------------------------------------------------------------------------
// Shell session
// ---------------------------------------------------------------------------

/// One line typed into `lg shell`
#[derive(Parser, Debug)]
#[command(name = "lg", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    View(ViewCommand),
    /// Create a project
    NewProject(NewProjectArgs),
    /// Create a list inside a project
    NewList(NewListArgs),
    /// Create a task
    Add(AddArgs),
    /// Change fields of a task
    Edit(EditArgs),
    /// Rename a project
    RenameProject(RenameArgs),
    /// Rename a list
    RenameList(RenameArgs),
    /// Delete a project with all its lists and tasks
    DeleteProject(IdArg),
    /// Delete a list; its tasks stay in the project
    DeleteList(IdArg),
    /// Delete a task
    Delete(IdArg),
    /// Toggle a task's completed flag
    Toggle(IdArg),
    /// Move a task into a list (or out of all lists)
    Move(MoveArgs),
    /// Place a task before another within a project, list or unlisted bucket
    Reorder(ReorderArgs),
    /// Place a project before another
    ReorderProject(ReorderProjectArgs),
    /// Place a list before another list of the same project
    ReorderList(ReorderListArgs),
    /// Move a task to another start time
    Reschedule(RescheduleArgs),
    /// Set or clear a project's due date
    Due(DueArgs),
    /// Add an alarm
    AlarmAdd(AlarmAddArgs),
    /// Change an alarm's time, label, sound or repetition
    AlarmEdit(AlarmEditArgs),
    /// Enable or disable an alarm
    AlarmToggle(IdArg),
    /// Delete an alarm
    AlarmDelete(IdArg),
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug)]
pub struct IdArg {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct NewProjectArgs {
    pub name: String,
    #[arg(long, default_value = "Development")]
    pub area: Area,
    #[arg(long, default_value = "personal")]
    pub kind: ProjectKind,
    #[arg(long, default_value = crate::model::project::DEFAULT_PROJECT_COLOR)]
    pub color: String,
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct NewListArgs {
    pub title: String,
    #[arg(long)]
    pub project: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub title: String,
    #[arg(long)]
    pub project: String,
    #[arg(long)]
    pub list: Option<String>,
    /// Start time (HH:MM)
    #[arg(long, default_value = "09:00", value_parser = parse_clock)]
    pub at: NaiveTime,
    /// Start day (default: today)
    #[arg(long)]
    pub day: Option<NaiveDate>,
    /// Duration in hours (more than 0, at most 24)
    #[arg(long, default_value = "1", value_parser = parse_duration)]
    pub duration: f64,
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long, conflicts_with = "no_list")]
    pub list: Option<String>,
    /// Take the task out of its list
    #[arg(long)]
    pub no_list: bool,
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Duration in hours (more than 0, at most 24)
    #[arg(long, value_parser = parse_duration)]
    pub duration: Option<f64>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<NaiveDate>,
    /// Clear the due date
    #[arg(long)]
    pub no_due: bool,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    pub id: String,
    pub name: String,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    pub id: String,
    /// Destination list
    #[arg(long)]
    pub list: Option<String>,
    /// Move out of all lists, staying in the task's project
    #[arg(long, conflicts_with = "list", required_unless_present = "list")]
    pub unlisted: bool,
    /// Place the task before this one in the destination
    #[arg(long)]
    pub before: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("scope").required(true).args(["project", "list", "unlisted"])))]
pub struct ReorderArgs {
    pub id: String,
    #[arg(long)]
    pub before: String,
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long)]
    pub list: Option<String>,
    #[arg(long, value_name = "PROJECT")]
    pub unlisted: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReorderProjectArgs {
    pub id: String,
    #[arg(long)]
    pub before: String,
    /// Reorder among this area's projects only
    #[arg(long)]
    pub area: Option<Area>,
}

#[derive(Args, Debug)]
pub struct ReorderListArgs {
    pub id: String,
    #[arg(long)]
    pub before: String,
}

#[derive(Args, Debug)]
pub struct RescheduleArgs {
    pub id: String,
    #[arg(long, value_parser = parse_clock)]
    pub at: NaiveTime,
    /// New day (default: the task's current day)
    #[arg(long)]
    pub day: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct DueArgs {
    pub project: String,
    /// Omit to clear
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct AlarmAddArgs {
    /// Time of day (HH:MM)
    pub time: String,
    pub label: String,
    #[arg(long, default_value = crate::model::alarm::DEFAULT_ALARM_SOUND)]
    pub sound: String,
    /// Ring once instead of every day
    #[arg(long)]
    pub once: bool,
}

#[derive(Args, Debug)]
pub struct AlarmEditArgs {
    pub id: String,
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub sound: Option<String>,
    /// Ring every day (on) or once (off)
    #[arg(long, value_name = "on|off", value_parser = parse_on_off)]
    pub recurring: Option<bool>,
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

fn parse_clock(s: &str) -> Result<NaiveTime, String> {
    parse_alarm_time(s).map_err(|e| e.to_string())
}

fn parse_duration(s: &str) -> Result<f64, String> {
    let hours: f64 = s.parse().map_err(|_| format!("invalid duration: {}", s))?;
    if hours.is_finite() && hours > 0.0 && hours <= MAX_TASK_HOURS {
        Ok(hours)
    } else {
        Err(format!("duration must be more than 0 and at most {} hours, got {}", MAX_TASK_HOURS, s))
    }
}

fn parse_on_off(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("expected on or off, got {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(line: &str) -> Result<ShellCommand, clap::Error> {
        let words = shell_words::split(line).unwrap();
        ShellLine::try_parse_from(words).map(|l| l.command)
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
        ShellLine::command().debug_assert();
    }

    #[test]
    fn parses_add_with_defaults() {
        let ShellCommand::Add(args) = shell(r#"add "Read chapter 3" --project 1"#).unwrap() else {
            panic!("expected add");
        };
        assert_eq!(args.title, "Read chapter 3");
        assert_eq!(args.at, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(args.duration, 1.0);
        assert_eq!(args.priority, Priority::Medium);
    }

    #[test]
    fn parses_view_inside_shell() {
        let cmd = shell("projects --area wellness").unwrap();
        assert!(matches!(
            cmd,
            ShellCommand::View(ViewCommand::Projects(ProjectsArgs {
                area: Some(Area::Wellness)
            }))
        ));
    }

    #[test]
    fn reorder_requires_a_scope() {
        assert!(shell("reorder 3 --before 1").is_err());
        assert!(shell("reorder 3 --before 1 --project 1").is_ok());
        assert!(shell("reorder 3 --before 1 --project 1 --list 2").is_err());
    }

    #[test]
    fn move_requires_list_or_unlisted() {
        assert!(shell("move 1").is_err());
        assert!(shell("move 1 --unlisted").is_ok());
        assert!(shell("move 1 --list 2 --unlisted").is_err());
    }

    #[test]
    fn bad_clock_is_rejected() {
        assert!(shell("reschedule 1 --at 9pm").is_err());
    }

    #[test]
    fn duration_must_be_a_sane_number_of_hours() {
        for bad in ["inf", "NaN", "1e12", "-3", "0", "25", "soon"] {
            assert!(shell(&format!("add Nap --project 1 --duration {}", bad)).is_err(), "{}", bad);
            assert!(shell(&format!("edit 1 --duration {}", bad)).is_err(), "{}", bad);
        }
        let ShellCommand::Edit(args) = shell("edit 1 --duration 0.25").unwrap() else {
            panic!("expected edit");
        };
        assert_eq!(args.duration, Some(0.25));
        assert!(shell("add Nap --project 1 --duration 24").is_ok());
    }

    #[test]
    fn exit_alias() {
        assert!(matches!(shell("exit").unwrap(), ShellCommand::Quit));
    }
}
