//! End-to-end properties of planner snapshots, exercised through the public
//! `ops` API.

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;

use lifegrid::model::{Area, List, NewList, NewProject, NewTask, Project, Store, Task};
use lifegrid::ops::check::check_store;
use lifegrid::ops::ids::{IdGenerator, SequentialIds, TimestampIds};
use lifegrid::ops::task_ops::{ReferenceError, TaskScope};
use lifegrid::ops::{list_ops, project_ops, stats, task_ops};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn at(hour: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, 0, 0).unwrap()
}

fn task_ids(store: &Store) -> Vec<&str> {
    store.tasks().iter().map(|t| t.id.as_str()).collect()
}

fn ids_in(store: &Store, scope: &TaskScope) -> Vec<String> {
    store
        .tasks()
        .iter()
        .filter(|t| scope.contains(t))
        .map(|t| t.id.clone())
        .collect()
}

/// An empty store grown through the ops layer only
struct Builder {
    store: Store,
    ids: SequentialIds,
}

impl Builder {
    fn new() -> Self {
        Builder {
            store: Store::default(),
            ids: SequentialIds::default(),
        }
    }

    fn project(&mut self, name: &str, area: Area) -> Project {
        let (store, project) =
            project_ops::create_project(&self.store, &mut self.ids, NewProject::new(name, area));
        self.store = store;
        project
    }

    fn list(&mut self, title: &str, project_id: &str) -> List {
        let data = NewList {
            title: title.into(),
            project_id: project_id.into(),
        };
        let (store, list) = list_ops::create_list(&self.store, &mut self.ids, data).unwrap();
        self.store = store;
        list
    }

    fn task(&mut self, title: &str, project_id: &str, list_id: Option<&str>, hour: u32) -> Task {
        let mut data = NewTask::new(title, project_id, at(hour));
        data.list_id = list_id.map(String::from);
        let (store, task) = task_ops::create_task(&self.store, &mut self.ids, data).unwrap();
        self.store = store;
        task
    }
}

#[test]
fn reorder_places_source_before_target_in_project_subset() {
    let mut b = Builder::new();
    let p1 = b.project("Fitness", Area::Wellness);
    let t1 = b.task("T1", &p1.id, None, 7);
    let t2 = b.task("T2", &p1.id, None, 8);
    let t3 = b.task("T3", &p1.id, None, 9);

    let scope = TaskScope::Project(p1.id.clone());
    let next = task_ops::reorder_tasks(&b.store, &scope, &t3.id, &t1.id);
    assert_eq!(ids_in(&next, &scope), vec![t3.id.clone(), t1.id.clone(), t2.id.clone()]);

    // Self-target leaves the order alone
    let same = task_ops::reorder_tasks(&next, &scope, &t2.id, &t2.id);
    assert_eq!(same, next);
}

#[test]
fn reorder_is_a_permutation() {
    let mut b = Builder::new();
    let p1 = b.project("A", Area::Chores);
    let p2 = b.project("B", Area::Chores);
    let a = b.task("a", &p1.id, None, 7);
    b.task("b", &p2.id, None, 8);
    let c = b.task("c", &p1.id, None, 9);
    b.task("d", &p2.id, None, 10);

    let next = task_ops::reorder_tasks(&b.store, &TaskScope::Project(p1.id.clone()), &c.id, &a.id);
    let mut before: Vec<_> = task_ids(&b.store);
    let mut after: Vec<_> = task_ids(&next);
    before.sort();
    after.sort();
    assert_eq!(before, after);
    assert_eq!(next.tasks().len(), b.store.tasks().len());
}

#[test]
fn unknown_project_is_rejected_and_tasks_unchanged() {
    let mut b = Builder::new();
    let p1 = b.project("Home", Area::Chores);
    b.task("Vacuum", &p1.id, None, 10);
    let before = b.store.clone();

    let result = task_ops::create_task(&b.store, &mut b.ids, NewTask::new("Ghost", "999", at(11)));
    assert_eq!(result.unwrap_err(), ReferenceError::UnknownProject("999".into()));
    assert_eq!(b.store, before);
}

#[test]
fn list_from_another_project_is_rejected() {
    let mut b = Builder::new();
    let p1 = b.project("One", Area::Leisure);
    let p2 = b.project("Two", Area::Leisure);
    let l2 = b.list("Elsewhere", &p2.id);

    let mut data = NewTask::new("Mismatch", &p1.id, at(12));
    data.list_id = Some(l2.id.clone());
    let err = task_ops::create_task(&b.store, &mut b.ids, data).unwrap_err();
    assert_eq!(
        err,
        ReferenceError::ListNotInProject {
            list_id: l2.id,
            project_id: p1.id,
        }
    );
}

#[test]
fn deleting_a_list_keeps_its_tasks() {
    let mut b = Builder::new();
    let p1 = b.project("Spanish", Area::Education);
    let l1 = b.list("Vocabulary", &p1.id);
    let t1 = b.task("T1", &p1.id, Some(&l1.id), 9);
    let t2 = b.task("T2", &p1.id, Some(&l1.id), 10);

    let next = list_ops::delete_list(&b.store, &l1.id);
    assert!(next.list(&l1.id).is_none());
    for id in [&t1.id, &t2.id] {
        let task = next.task(id).unwrap();
        assert_eq!(task.list_id, None);
        assert_eq!(task.project_id, p1.id);
    }
    assert!(check_store(&next).valid);
}

#[test]
fn deleting_a_project_cascades() {
    let mut b = Builder::new();
    let p1 = b.project("Doomed", Area::Finance);
    let p2 = b.project("Kept", Area::Finance);
    let l1 = b.list("Bills", &p1.id);
    b.task("Pay rent", &p1.id, Some(&l1.id), 9);
    b.task("Budget", &p1.id, None, 10);
    let kept = b.task("Invest", &p2.id, None, 11);

    let next = project_ops::delete_project(&b.store, &p1.id);
    assert!(next.project(&p1.id).is_none());
    assert!(next.lists().is_empty());
    assert_eq!(task_ids(&next), vec![kept.id.as_str()]);
    assert!(check_store(&next).valid);
}

#[test]
fn area_stats_cover_every_project_in_the_area() {
    let mut b = Builder::new();
    let busy = b.project("Gym", Area::Wellness);
    b.project("Someday", Area::Wellness);
    let mut done = Vec::new();
    for hour in 6..10 {
        done.push(b.task("Set", &busy.id, None, hour));
    }
    for task in &done[..2] {
        b.store = task_ops::toggle_task_completed(&b.store, &task.id);
    }

    let wellness = stats::area_stats(Area::Wellness, b.store.tasks(), b.store.projects(), day());
    assert_eq!(wellness.total_tasks, 4);
    assert_eq!(wellness.completed_tasks, 2);
    assert_eq!(wellness.completion_rate, 50.0);
    assert_eq!(wellness.active_today, 2);

    let empty = stats::area_stats(Area::Mindfulness, b.store.tasks(), b.store.projects(), day());
    assert_eq!(empty.total_tasks, 0);
    assert_eq!(empty.completion_rate, 0.0);
}

#[test]
fn counters_follow_every_mutation() {
    let mut b = Builder::new();
    let p1 = b.project("Code", Area::Development);
    let p2 = b.project("Docs", Area::Development);
    let l2 = b.list("Guides", &p2.id);
    let t1 = b.task("Build", &p1.id, None, 9);
    let t2 = b.task("Ship", &p1.id, None, 10);

    let mut store = task_ops::toggle_task_completed(&b.store, &t1.id);
    store = task_ops::move_task_to_list(&store, &t2.id, Some(&l2.id), None).unwrap();
    store = task_ops::delete_task(&store, &t1.id);

    for project in store.projects() {
        let tasks = stats::tasks_for_project(&project.id, store.tasks());
        assert_eq!(project.tasks_count, tasks.len(), "project {}", project.id);
        assert_eq!(
            project.completed_tasks,
            tasks.iter().filter(|t| t.completed).count()
        );
    }
    assert!(check_store(&store).valid);
}

#[test]
fn cross_project_move_reassigns_the_task() {
    let mut b = Builder::new();
    let p1 = b.project("Old", Area::Community);
    let p2 = b.project("New", Area::Leisure);
    let l2 = b.list("Weekend", &p2.id);
    let t1 = b.task("Picnic", &p1.id, None, 12);

    let next = task_ops::move_task_to_list(&b.store, &t1.id, Some(&l2.id), None).unwrap();
    let moved = next.task(&t1.id).unwrap();
    assert_eq!(moved.project_id, p2.id);
    assert_eq!(moved.list_id.as_deref(), Some(l2.id.as_str()));
    assert_eq!(moved.area, Some(Area::Leisure));
    assert_eq!(moved.category.as_deref(), Some("New"));
    assert_eq!(next.project(&p1.id).unwrap().tasks_count, 0);
    assert_eq!(next.project(&p2.id).unwrap().tasks_count, 1);
}

#[test]
fn id_generators_never_collide() {
    let taken = |id: &str| id == "1" || id == "3";
    let mut seq = SequentialIds::default();
    let seq_ids: Vec<String> = (0..3).map(|_| seq.next_id(&taken)).collect();
    assert_eq!(seq_ids, vec!["2", "4", "5"]);

    let mut ts = TimestampIds::new();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        assert!(seen.insert(ts.next_id(&|_| false)));
    }
}
