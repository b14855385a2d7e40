mod session;
pub use session::{Flow, Session};

use std::io::{self, IsTerminal};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::preferences::{self, Preferences};
use crate::model::area::Area;
use crate::model::config::{PlannerConfig, ViewMode};
use crate::model::sample::sample_store;
use crate::model::store::Store;
use crate::ops::task_ops::{ReferenceError, TaskScope};
use crate::ops::{alarm_ops, check, search, stats};

/// Per-invocation settings shared by every handler
#[derive(Debug, Clone)]
pub struct Context {
    pub config: PlannerConfig,
    /// Reference instant for "today" and "next" projections
    pub now: NaiveDateTime,
    pub json: bool,
}

impl Context {
    /// With `date`, the clock is pinned to the start of that day.
    pub fn new(config: PlannerConfig, date: Option<NaiveDate>, json: bool) -> Self {
        let now = match date {
            Some(day) => day.and_time(NaiveTime::default()),
            None => Local::now().naive_local(),
        };
        Context { config, now, json }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.clone().unwrap_or_else(config_io::default_config_path);
    let config = config_io::read_config(&config_path)?;
    crate::util::logging::init(&config.log.level);
    tracing::debug!(path = %config_path.display(), "loaded config");

    let ctx = Context::new(config, cli.date, cli.json);
    let store = sample_store(ctx.today());

    match cli.command {
        None => {
            let view = match ctx.config.ui.default_view {
                ViewMode::Calendar => ViewCommand::Today,
                ViewMode::Areas => ViewCommand::Areas,
            };
            show_view(&store, &view, &ctx)
        }
        Some(Commands::View(view)) => show_view(&store, &view, &ctx),
        Some(Commands::Settings(args)) => cmd_settings(args, &ctx),
        Some(Commands::Shell) => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            Session::new(store, ctx).run(stdin.lock(), prompt)
        }
    }
}

/// Render a read-only view of `store`.
pub fn show_view(
    store: &Store,
    view: &ViewCommand,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    match view {
        ViewCommand::Today => cmd_today(store, ctx),
        ViewCommand::Areas => cmd_areas(store, ctx),
        ViewCommand::Projects(args) => cmd_projects(store, args, ctx),
        ViewCommand::Lists(args) => cmd_lists(store, args, ctx),
        ViewCommand::Tasks(args) => cmd_tasks(store, args, ctx),
        ViewCommand::Search(args) => cmd_search(store, args, ctx),
        ViewCommand::Check => cmd_check(store, ctx),
        ViewCommand::Alarms => cmd_alarms(store, ctx),
    }
}

// ---------------------------------------------------------------------------
// Read views
// ---------------------------------------------------------------------------

fn cmd_today(store: &Store, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let day = ctx.today();
    let summary = stats::day_summary(store.tasks(), day, ctx.now);
    let tasks = stats::tasks_on_day(store.tasks(), day);

    if ctx.json {
        let out = TodayJson {
            date: day,
            summary,
            tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", format_day_header(day));
    if tasks.is_empty() {
        println!("(nothing scheduled)");
    }
    for task in &tasks {
        println!("{}", format_schedule_line(task));
    }
    println!();
    let next = summary.next_task_id.as_deref().and_then(|id| store.task(id));
    for line in format_day_summary(&summary, next) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_areas(store: &Store, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let today = ctx.today();
    let overview = stats::overview(store, today);
    let cards: Vec<AreaCardJson> = Area::ALL
        .into_iter()
        .map(|area| {
            let area_stats = stats::area_stats(area, store.tasks(), store.projects(), today);
            AreaCardJson {
                area,
                color: area.color(),
                description: area.description(),
                projects: stats::projects_in_area(store.projects(), area).len(),
                status: stats::area_status(area_stats.completion_rate),
                stats: area_stats,
            }
        })
        .collect();

    if ctx.json {
        let out = AreasJson {
            overview,
            areas: cards,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", format_overview(&overview));
    for card in &cards {
        println!();
        for line in format_area_card(card.area, &card.stats, card.status) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_projects(
    store: &Store,
    args: &ProjectsArgs,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    let projects: Vec<_> = match args.area {
        Some(area) => stats::projects_in_area(store.projects(), area),
        None => store.projects().iter().collect(),
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else {
        for project in projects {
            println!("{}", format_project_line(project));
        }
    }
    Ok(())
}

fn cmd_lists(
    store: &Store,
    args: &ListsArgs,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(project_id) = &args.project
        && store.project(project_id).is_none()
    {
        return Err(ReferenceError::UnknownProject(project_id.clone()).into());
    }

    let lists: Vec<ListJson> = store
        .lists()
        .iter()
        .filter(|l| args.project.as_ref().is_none_or(|p| &l.project_id == p))
        .map(|list| ListJson {
            list,
            tasks: stats::tasks_for_list(&list.id, store.tasks()),
        })
        .collect();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&lists)?);
        return Ok(());
    }

    for (i, entry) in lists.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format_list_header(entry.list));
        for task in &entry.tasks {
            println!("{}", format_task_line(task));
        }
    }

    // Tasks that sit directly in the project
    if let Some(project_id) = &args.project {
        let scope = TaskScope::Unlisted(project_id.clone());
        let unlisted: Vec<_> = store.tasks().iter().filter(|t| scope.contains(t)).collect();
        if !unlisted.is_empty() {
            if !lists.is_empty() {
                println!();
            }
            println!("== (no list) ==");
            for task in unlisted {
                println!("{}", format_task_line(task));
            }
        }
    }
    Ok(())
}

fn cmd_tasks(
    store: &Store,
    args: &TasksArgs,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    let scope = if let Some(id) = &args.project {
        Some(TaskScope::Project(id.clone()))
    } else if let Some(id) = &args.list {
        Some(TaskScope::List(id.clone()))
    } else {
        args.unlisted.as_ref().map(|id| TaskScope::Unlisted(id.clone()))
    };

    let tasks: Vec<_> = store
        .tasks()
        .iter()
        .filter(|t| scope.as_ref().is_none_or(|s| s.contains(t)))
        .filter(|t| args.day.is_none_or(|d| t.day() == d))
        .collect();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        for task in tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_search(
    store: &Store,
    args: &SearchArgs,
    ctx: &Context,
) -> Result<(), Box<dyn std::error::Error>> {
    let re = search::compile_query(&args.pattern)?;
    let hits = search::search_tasks(store, &re);

    // Hits arrive grouped by task; fold each task's fields together
    let mut grouped: Vec<SearchHitJson> = Vec::new();
    for hit in &hits {
        let Some(task) = store.task(&hit.task_id) else {
            continue;
        };
        match grouped.last_mut() {
            Some(last) if last.task_id == hit.task_id => last.fields.push(hit.field),
            _ => grouped.push(SearchHitJson {
                task_id: &task.id,
                title: &task.title,
                fields: vec![hit.field],
            }),
        }
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&grouped)?);
        return Ok(());
    }

    for entry in &grouped {
        if let Some(task) = store.task(entry.task_id) {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_check(store: &Store, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let result = check::check_store(store);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.errors.is_empty() {
        println!("Errors:");
        for err in &result.errors {
            println!("  {}", format_check_error(err));
        }
    }
    if result.valid {
        println!("✓ planner is consistent");
    } else {
        println!("✗ planner has errors");
    }
    Ok(())
}

fn cmd_alarms(store: &Store, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let next = alarm_ops::next_alarm(store.alarms(), ctx.now);

    if ctx.json {
        let out = AlarmsJson {
            alarms: store.alarms(),
            next: next.map(|(alarm, fires_at)| NextAlarmJson {
                id: &alarm.id,
                fires_at,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if store.alarms().is_empty() {
        println!("(no alarms)");
    }
    for alarm in store.alarms() {
        println!("{}", format_alarm_line(alarm));
    }
    if let Some((alarm, fires_at)) = next {
        println!();
        println!(
            "next: {} at {}",
            alarm.label,
            fires_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

fn cmd_settings(args: SettingsArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let path = preferences::default_preferences_path(&config_io::config_dir());
    let mut prefs = Preferences::open(path)?;

    if let Some(on) = args.dark_mode {
        prefs.set_dark_mode(on)?;
        tracing::info!(dark_mode = on, "saved preference");
    }

    let settings = SettingsJson {
        dark_mode: prefs.dark_mode_or(ctx.config.ui.dark_mode),
        timezone: ctx.config.ui.timezone.clone(),
        default_view: ctx.config.ui.default_view,
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        for line in format_settings(&settings) {
            println!("{}", line);
        }
    }
    Ok(())
}
