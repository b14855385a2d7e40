use std::io::{BufRead, Write};

use clap::Parser;
use clap::error::ErrorKind;

use super::{Context, show_view};
use crate::cli::commands::*;
use crate::cli::output::{format_alarm_line, format_task_line};
use crate::model::alarm::{AlarmPatch, NewAlarm};
use crate::model::list::NewList;
use crate::model::project::NewProject;
use crate::model::store::Store;
use crate::model::task::{NewTask, TaskPatch};
use crate::ops::ids::{IdGenerator, generator_for};
use crate::ops::task_ops::TaskScope;
use crate::ops::{alarm_ops, list_ops, project_ops, task_ops};

/// Whether the session keeps reading after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An in-memory planning session. Every line replaces the snapshot; nothing
/// is written to disk.
pub struct Session {
    store: Store,
    ids: Box<dyn IdGenerator>,
    ctx: Context,
}

impl Session {
    pub fn new(store: Store, ctx: Context) -> Self {
        let ids = generator_for(ctx.config.ids.strategy, &store);
        Session { store, ids, ctx }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Read lines until `quit` or end of input. A failing line is reported
    /// and the session carries on.
    pub fn run(&mut self, input: impl BufRead, prompt: bool) -> Result<(), Box<dyn std::error::Error>> {
        let mut lines = input.lines();
        loop {
            if prompt {
                print!("lg> ");
                std::io::stdout().flush()?;
            }
            let Some(line) = lines.next() else { break };
            match self.execute_line(&line?) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => eprintln!("error: {}", e),
            }
        }
        Ok(())
    }

    /// Tokenize, parse and apply one line. Blank lines and `#` comments are
    /// skipped.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, Box<dyn std::error::Error>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        let words = shell_words::split(line)?;
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                print!("{}", e.render());
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(clap_message(&e).into()),
        };
        self.apply(parsed.command)
    }

    fn apply(&mut self, command: ShellCommand) -> Result<Flow, Box<dyn std::error::Error>> {
        match command {
            ShellCommand::View(view) => show_view(&self.store, &view, &self.ctx)?,
            ShellCommand::Quit => return Ok(Flow::Quit),

            // Projects
            ShellCommand::NewProject(args) => {
                let data = NewProject {
                    name: args.name,
                    color: args.color,
                    kind: args.kind,
                    area: args.area,
                    due_date: args.due,
                };
                let (store, project) = project_ops::create_project(&self.store, self.ids.as_mut(), data);
                self.store = store;
                println!("created project {} {}", project.id, project.name);
            }
            ShellCommand::RenameProject(args) => {
                if self.store.project(&args.id).is_none() {
                    return Ok(missing("project", &args.id));
                }
                self.store = project_ops::rename_project(&self.store, &args.id, &args.name);
                println!("renamed project {}", args.id);
            }
            ShellCommand::DeleteProject(args) => {
                if self.store.project(&args.id).is_none() {
                    return Ok(missing("project", &args.id));
                }
                let tasks = self.store.tasks().iter().filter(|t| t.project_id == args.id).count();
                let lists = self.store.lists().iter().filter(|l| l.project_id == args.id).count();
                self.store = project_ops::delete_project(&self.store, &args.id);
                println!("deleted project {} ({} tasks, {} lists)", args.id, tasks, lists);
            }
            ShellCommand::ReorderProject(args) => {
                for id in [&args.id, &args.before] {
                    if self.store.project(id).is_none() {
                        return Ok(missing("project", id));
                    }
                }
                self.store = project_ops::reorder_projects(&self.store, args.area, &args.id, &args.before);
                let order = self
                    .store
                    .projects()
                    .iter()
                    .filter(|p| args.area.is_none_or(|a| p.area == a))
                    .map(|p| p.id.as_str());
                print_order(order);
            }
            ShellCommand::Due(args) => {
                if self.store.project(&args.project).is_none() {
                    return Ok(missing("project", &args.project));
                }
                self.store = project_ops::set_project_due_date(&self.store, &args.project, args.date);
                match args.date {
                    Some(date) => println!("project {} due {}", args.project, date),
                    None => println!("project {} has no due date", args.project),
                }
            }

            // Lists
            ShellCommand::NewList(args) => {
                let data = NewList {
                    title: args.title,
                    project_id: args.project,
                };
                let (store, list) = list_ops::create_list(&self.store, self.ids.as_mut(), data)?;
                self.store = store;
                println!("created list {} {}", list.id, list.title);
            }
            ShellCommand::RenameList(args) => {
                if self.store.list(&args.id).is_none() {
                    return Ok(missing("list", &args.id));
                }
                self.store = list_ops::rename_list(&self.store, &args.id, &args.name);
                println!("renamed list {}", args.id);
            }
            ShellCommand::DeleteList(args) => {
                if self.store.list(&args.id).is_none() {
                    return Ok(missing("list", &args.id));
                }
                self.store = list_ops::delete_list(&self.store, &args.id);
                println!("deleted list {}", args.id);
            }
            ShellCommand::ReorderList(args) => {
                let Some(project_id) = self.store.list(&args.id).map(|l| l.project_id.clone()) else {
                    return Ok(missing("list", &args.id));
                };
                if self.store.list(&args.before).is_none() {
                    return Ok(missing("list", &args.before));
                }
                self.store = list_ops::reorder_lists(&self.store, &project_id, &args.id, &args.before);
                let order = self
                    .store
                    .lists()
                    .iter()
                    .filter(|l| l.project_id == project_id)
                    .map(|l| l.id.as_str());
                print_order(order);
            }

            // Tasks
            ShellCommand::Add(args) => {
                let day = args.day.unwrap_or_else(|| self.ctx.today());
                let mut data = NewTask::new(args.title, args.project, day.and_time(args.at));
                data.list_id = args.list;
                data.duration = args.duration;
                data.priority = args.priority;
                data.description = args.description;
                data.color = args.color;
                data.due_date = args.due;
                let (store, task) = task_ops::create_task(&self.store, self.ids.as_mut(), data)?;
                self.store = store;
                println!("created {}", format_task_line(&task));
            }
            ShellCommand::Edit(args) => {
                let patch = TaskPatch {
                    title: args.title,
                    description: args.description.map(Some),
                    project_id: args.project,
                    list_id: if args.no_list { Some(None) } else { args.list.map(Some) },
                    priority: args.priority,
                    duration: args.duration,
                    color: args.color,
                    due_date: if args.no_due { Some(None) } else { args.due.map(Some) },
                    ..Default::default()
                };
                if patch.is_empty() {
                    return Err("nothing to change".into());
                }
                self.store = task_ops::update_task(&self.store, &args.id, patch)?;
                self.report_task(&args.id);
            }
            ShellCommand::Delete(args) => {
                if self.store.task(&args.id).is_none() {
                    return Ok(missing("task", &args.id));
                }
                self.store = task_ops::delete_task(&self.store, &args.id);
                println!("deleted task {}", args.id);
            }
            ShellCommand::Toggle(args) => {
                self.store = task_ops::toggle_task_completed(&self.store, &args.id);
                self.report_task(&args.id);
            }
            ShellCommand::Move(args) => {
                let to_list = if args.unlisted { None } else { args.list.as_deref() };
                self.store = task_ops::move_task_to_list(&self.store, &args.id, to_list, args.before.as_deref())?;
                self.report_task(&args.id);
            }
            ShellCommand::Reorder(args) => {
                let scope = if let Some(id) = args.project {
                    TaskScope::Project(id)
                } else if let Some(id) = args.list {
                    TaskScope::List(id)
                } else if let Some(id) = args.unlisted {
                    TaskScope::Unlisted(id)
                } else {
                    return Err("reorder needs --project, --list or --unlisted".into());
                };
                for id in [&args.id, &args.before] {
                    if self.store.task(id).is_none() {
                        return Ok(missing("task", id));
                    }
                }
                self.store = task_ops::reorder_tasks(&self.store, &scope, &args.id, &args.before);
                let order = self
                    .store
                    .tasks()
                    .iter()
                    .filter(|t| scope.contains(t))
                    .map(|t| t.id.as_str());
                print_order(order);
            }
            ShellCommand::Reschedule(args) => {
                let Some(current_day) = self.store.task(&args.id).map(|t| t.day()) else {
                    return Ok(missing("task", &args.id));
                };
                let day = args.day.unwrap_or(current_day);
                self.store = task_ops::reschedule_task(&self.store, &args.id, day.and_time(args.at));
                self.report_task(&args.id);
            }

            // Alarms
            ShellCommand::AlarmAdd(args) => {
                let data = NewAlarm {
                    time: args.time,
                    sound: args.sound,
                    label: args.label,
                    recurring: !args.once,
                };
                let (store, alarm) = alarm_ops::add_alarm(&self.store, self.ids.as_mut(), data)?;
                self.store = store;
                println!("created alarm {} {} {}", alarm.id, alarm.time, alarm.label);
            }
            ShellCommand::AlarmEdit(args) => {
                if self.store.alarm(&args.id).is_none() {
                    return Ok(missing("alarm", &args.id));
                }
                let patch = AlarmPatch {
                    time: args.time,
                    sound: args.sound,
                    label: args.label,
                    recurring: args.recurring,
                };
                if patch == AlarmPatch::default() {
                    return Err("nothing to change".into());
                }
                self.store = alarm_ops::update_alarm(&self.store, &args.id, patch)?;
                if let Some(alarm) = self.store.alarm(&args.id) {
                    println!("{}", format_alarm_line(alarm));
                }
            }
            ShellCommand::AlarmToggle(args) => {
                self.store = alarm_ops::toggle_alarm(&self.store, &args.id);
                match self.store.alarm(&args.id) {
                    Some(alarm) => println!(
                        "alarm {} {}",
                        alarm.id,
                        if alarm.enabled { "on" } else { "off" }
                    ),
                    None => return Ok(missing("alarm", &args.id)),
                }
            }
            ShellCommand::AlarmDelete(args) => {
                if self.store.alarm(&args.id).is_none() {
                    return Ok(missing("alarm", &args.id));
                }
                self.store = alarm_ops::delete_alarm(&self.store, &args.id);
                println!("deleted alarm {}", args.id);
            }
        }
        Ok(Flow::Continue)
    }

    fn report_task(&self, task_id: &str) {
        match self.store.task(task_id) {
            Some(task) => println!("{}", format_task_line(task)),
            None => {
                missing("task", task_id);
            }
        }
    }
}

/// Ids of the reordered subset, in their new order
fn print_order<'a>(ids: impl Iterator<Item = &'a str>) {
    println!("order: {}", ids.collect::<Vec<_>>().join(" "));
}

/// Unknown ids leave the planner untouched; say so and keep going.
fn missing(kind: &str, id: &str) -> Flow {
    println!("no {} {}", kind, id);
    Flow::Continue
}

/// Clap renders its own `error: ` prefix; drop it so the session adds one.
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    rendered
        .trim_start_matches("error: ")
        .trim_end()
        .to_string()
}
