use chrono::NaiveDate;

use crate::model::area::Area;
use crate::model::project::{NewProject, Project};
use crate::model::store::Store;
use crate::ops::ids::IdGenerator;
use crate::ops::reorder::reorder_within_subset;

/// Append a new project with zeroed counters. Tasks are untouched.
pub fn create_project(store: &Store, ids: &mut dyn IdGenerator, data: NewProject) -> (Store, Project) {
    let id = ids.next_id(&|candidate| store.project(candidate).is_some());
    let project = Project {
        id,
        name: data.name,
        color: data.color,
        kind: data.kind,
        area: data.area,
        due_date: data.due_date,
        tasks_count: 0,
        completed_tasks: 0,
    };
    tracing::info!(project_id = %project.id, area = %project.area, "created project '{}'", project.name);

    let mut projects = store.projects().to_vec();
    projects.push(project.clone());
    (store.with_projects(projects), project)
}

/// Rename a project. Its tasks' category copies follow. Unknown ids are a no-op.
pub fn rename_project(store: &Store, project_id: &str, name: &str) -> Store {
    if store.project(project_id).is_none() {
        tracing::debug!(project_id, "rename: project not found");
        return store.clone();
    }
    let projects = store
        .projects()
        .iter()
        .map(|p| {
            let mut p = p.clone();
            if p.id == project_id {
                p.name = name.to_string();
            }
            p
        })
        .collect();
    let tasks = store
        .tasks()
        .iter()
        .map(|t| {
            let mut t = t.clone();
            if t.project_id == project_id {
                t.category = Some(name.to_string());
            }
            t
        })
        .collect();
    store.with_projects(projects).with_tasks(tasks)
}

/// Set or clear a project's due date. Unknown ids are a no-op.
pub fn set_project_due_date(store: &Store, project_id: &str, due_date: Option<NaiveDate>) -> Store {
    if store.project(project_id).is_none() {
        tracing::debug!(project_id, "due date: project not found");
        return store.clone();
    }
    let projects = store
        .projects()
        .iter()
        .map(|p| {
            let mut p = p.clone();
            if p.id == project_id {
                p.due_date = due_date;
            }
            p
        })
        .collect();
    store.with_projects(projects)
}

/// Remove a project together with every list and task that references it.
/// Unknown ids are a no-op.
pub fn delete_project(store: &Store, project_id: &str) -> Store {
    if store.project(project_id).is_none() {
        tracing::debug!(project_id, "delete: project not found");
        return store.clone();
    }

    let tasks: Vec<_> = store
        .tasks()
        .iter()
        .filter(|t| t.project_id != project_id)
        .cloned()
        .collect();
    let lists: Vec<_> = store
        .lists()
        .iter()
        .filter(|l| l.project_id != project_id)
        .cloned()
        .collect();
    let projects: Vec<_> = store
        .projects()
        .iter()
        .filter(|p| p.id != project_id)
        .cloned()
        .collect();

    tracing::info!(
        project_id,
        tasks_removed = store.tasks().len() - tasks.len(),
        lists_removed = store.lists().len() - lists.len(),
        "deleted project"
    );
    store.with_tasks(tasks).with_lists(lists).with_projects(projects)
}

/// Place `source_id` immediately before `target_id` among the projects of
/// `area`, or among all projects when `area` is `None`.
pub fn reorder_projects(store: &Store, area: Option<Area>, source_id: &str, target_id: &str) -> Store {
    let projects = reorder_within_subset(
        store.projects(),
        |p| area.is_none_or(|a| p.area == a),
        source_id,
        target_id,
    );
    store.with_projects(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample::sample_store;
    use crate::ops::ids::SequentialIds;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn project_ids(store: &Store) -> Vec<&str> {
        store.projects().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn create_project_appends_with_zero_counters() {
        let store = sample_store(today());
        let mut ids = SequentialIds::after(&store);
        let (next, project) = create_project(&store, &mut ids, NewProject::new("Meditation", Area::Mindfulness));
        assert_eq!(project.tasks_count, 0);
        assert_eq!(project.completed_tasks, 0);
        assert_eq!(next.projects().last().unwrap(), &project);
        assert_eq!(next.tasks(), store.tasks());
    }

    #[test]
    fn create_project_ids_are_unique() {
        let store = sample_store(today());
        // Generator that would collide with sample ids
        let mut ids = SequentialIds::new(1);
        let (next, a) = create_project(&store, &mut ids, NewProject::new("A", Area::Leisure));
        let (next, b) = create_project(&next, &mut ids, NewProject::new("B", Area::Leisure));
        assert_eq!(a.id, "4");
        assert_eq!(b.id, "5");
        assert_eq!(next.projects().len(), 5);
    }

    #[test]
    fn rename_project_updates_task_category() {
        let store = sample_store(today());
        let next = rename_project(&store, "1", "Spanish B1");
        assert_eq!(next.project("1").unwrap().name, "Spanish B1");
        assert!(
            next.tasks()
                .iter()
                .filter(|t| t.project_id == "1")
                .all(|t| t.category.as_deref() == Some("Spanish B1"))
        );
        assert_eq!(rename_project(&store, "404", "x"), store);
    }

    #[test]
    fn set_due_date() {
        let store = sample_store(today());
        let due = NaiveDate::from_ymd_opt(2025, 6, 1);
        let next = set_project_due_date(&store, "3", due);
        assert_eq!(next.project("3").unwrap().due_date, due);
        let cleared = set_project_due_date(&next, "3", None);
        assert_eq!(cleared, store);
    }

    #[test]
    fn delete_project_cascades() {
        let store = sample_store(today());
        let next = delete_project(&store, "1");
        assert!(next.project("1").is_none());
        assert!(next.tasks().iter().all(|t| t.project_id != "1"));
        assert!(next.lists().iter().all(|l| l.project_id != "1"));
        assert_eq!(next.tasks().len(), 4);
        assert_eq!(next.lists().len(), 1);
    }

    #[test]
    fn delete_project_is_idempotent() {
        let store = sample_store(today());
        let once = delete_project(&store, "2");
        let twice = delete_project(&once, "2");
        assert_eq!(once, twice);
    }

    #[test]
    fn reorder_projects_globally_and_by_area() {
        let store = sample_store(today());
        let next = reorder_projects(&store, None, "3", "1");
        assert_eq!(project_ids(&next), vec!["3", "1", "2"]);

        // Projects 1 and 3 are in different areas: no-op inside Education
        let same = reorder_projects(&store, Some(Area::Education), "3", "1");
        assert_eq!(same, store);
    }
}
