use chrono::{Days, NaiveDate, NaiveDateTime};

use super::alarm::Alarm;
use super::area::Area;
use super::list::List;
use super::project::{Project, ProjectKind};
use super::store::Store;
use super::task::{Priority, Task};

/// Seed data loaded at the start of every run. Nothing survives a restart,
/// so tasks are scheduled relative to `today`.
pub fn sample_store(today: NaiveDate) -> Store {
    let projects = vec![
        project("1", "Learning Spanish", "#10B981", ProjectKind::Hobby, Area::Education),
        project("2", "Fitness Journey", "#F59E0B", ProjectKind::Personal, Area::Wellness),
        project("3", "React Development", "#3B82F6", ProjectKind::Work, Area::Development),
    ];

    let lists = vec![
        list("1", "Vocabulary", "1"),
        list("2", "Grammar", "1"),
        list("3", "Strength", "2"),
    ];

    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);

    let mut tasks = vec![
        task("1", "Spanish Vocabulary", &projects[0], Some("1"), at(today, 9, 0), 1.0, Priority::Medium),
        task("2", "Morning Workout", &projects[1], Some("3"), at(today, 7, 0), 1.0, Priority::High),
        task("3", "Evening stretch", &projects[1], None, at(today, 21, 0), 0.5, Priority::Low),
        task("4", "Past tense drills", &projects[0], Some("2"), at(tomorrow, 18, 0), 0.5, Priority::Low),
        task("5", "Set up Vite project", &projects[2], None, at(tomorrow, 10, 0), 2.0, Priority::Medium),
        task("6", "Review hooks chapter", &projects[2], None, at(yesterday, 14, 0), 1.5, Priority::Low),
    ];
    tasks[4].description = Some("Scaffold the app with TypeScript and Tailwind".into());
    tasks[5].completed = true;

    let alarms = vec![Alarm {
        id: "1".into(),
        time: "06:30".into(),
        enabled: true,
        sound: "birds".into(),
        label: "Morning Wake-up".into(),
        recurring: true,
    }];

    Store::new(projects, lists, tasks, alarms)
}

fn project(id: &str, name: &str, color: &str, kind: ProjectKind, area: Area) -> Project {
    Project {
        id: id.into(),
        name: name.into(),
        color: color.into(),
        kind,
        area,
        due_date: None,
        tasks_count: 0,
        completed_tasks: 0,
    }
}

fn list(id: &str, title: &str, project_id: &str) -> List {
    List {
        id: id.into(),
        title: title.into(),
        project_id: project_id.into(),
    }
}

fn task(
    id: &str,
    title: &str,
    project: &Project,
    list_id: Option<&str>,
    start_time: NaiveDateTime,
    duration: f64,
    priority: Priority,
) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: None,
        project_id: project.id.clone(),
        list_id: list_id.map(String::from),
        start_time,
        duration,
        priority,
        completed: false,
        color: project.color.clone(),
        due_date: None,
        area: Some(project.area),
        category: Some(project.name.clone()),
    }
}

fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap_or_else(|| day.and_time(Default::default()))
}
