use std::collections::HashMap;

use serde::Serialize;

use crate::model::store::Store;

/// Structured result from `lg check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
}

/// A broken invariant in a store snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// Two entities of the same kind share an id
    #[serde(rename = "duplicate_id")]
    DuplicateId { kind: &'static str, id: String },
    /// A task points at a project that does not exist
    #[serde(rename = "dangling_project")]
    DanglingProject { task_id: String, project_id: String },
    /// A task points at a list that does not exist
    #[serde(rename = "dangling_list")]
    DanglingList { task_id: String, list_id: String },
    /// A task's list belongs to a different project than the task
    #[serde(rename = "list_project_mismatch")]
    ListProjectMismatch {
        task_id: String,
        list_id: String,
        task_project_id: String,
        list_project_id: String,
    },
    /// A list points at a project that does not exist
    #[serde(rename = "orphan_list")]
    OrphanList { list_id: String, project_id: String },
}

/// Validate referential integrity.
///
/// Read-only: the snapshot is never modified. Project counters are not
/// checked because `Store` recomputes them on every replacement.
pub fn check_store(store: &Store) -> CheckResult {
    let mut result = CheckResult::default();

    duplicates("project", store.projects().iter().map(|p| p.id.as_str()), &mut result);
    duplicates("list", store.lists().iter().map(|l| l.id.as_str()), &mut result);
    duplicates("task", store.tasks().iter().map(|t| t.id.as_str()), &mut result);
    duplicates("alarm", store.alarms().iter().map(|a| a.id.as_str()), &mut result);

    for list in store.lists() {
        if store.project(&list.project_id).is_none() {
            result.errors.push(CheckError::OrphanList {
                list_id: list.id.clone(),
                project_id: list.project_id.clone(),
            });
        }
    }

    for task in store.tasks() {
        if store.project(&task.project_id).is_none() {
            result.errors.push(CheckError::DanglingProject {
                task_id: task.id.clone(),
                project_id: task.project_id.clone(),
            });
        }
        let Some(list_id) = &task.list_id else { continue };
        match store.list(list_id) {
            None => result.errors.push(CheckError::DanglingList {
                task_id: task.id.clone(),
                list_id: list_id.clone(),
            }),
            Some(list) if list.project_id != task.project_id => {
                result.errors.push(CheckError::ListProjectMismatch {
                    task_id: task.id.clone(),
                    list_id: list_id.clone(),
                    task_project_id: task.project_id.clone(),
                    list_project_id: list.project_id.clone(),
                })
            }
            Some(_) => {}
        }
    }

    result.valid = result.errors.is_empty();
    result
}

fn duplicates<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>, result: &mut CheckResult) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for id in ids {
        let count = seen.entry(id).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(id);
        }
    }
    for id in order {
        result.errors.push(CheckError::DuplicateId {
            kind,
            id: id.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::list::List;
    use crate::model::sample::sample_store;
    use chrono::NaiveDate;

    fn store() -> Store {
        sample_store(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    #[test]
    fn sample_store_is_valid() {
        let result = check_store(&store());
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn detects_dangling_and_mismatched_references() {
        let base = store();
        let mut tasks = base.tasks().to_vec();
        tasks[0].project_id = "999".into();
        tasks[1].list_id = Some("1".into()); // list 1 belongs to project 1, task 2 to project 2
        tasks[2].list_id = Some("42".into());
        let broken = base.with_tasks(tasks);

        let result = check_store(&broken);
        assert!(!result.valid);
        assert!(result.errors.contains(&CheckError::DanglingProject {
            task_id: "1".into(),
            project_id: "999".into(),
        }));
        assert!(
            result
                .errors
                .iter()
                .any(|e| matches!(e, CheckError::ListProjectMismatch { task_id, .. } if task_id == "2"))
        );
        assert!(result.errors.contains(&CheckError::DanglingList {
            task_id: "3".into(),
            list_id: "42".into(),
        }));
    }

    #[test]
    fn detects_duplicates_and_orphan_lists() {
        let base = store();
        let mut lists = base.lists().to_vec();
        lists.push(List {
            id: "1".into(),
            title: "Copy".into(),
            project_id: "77".into(),
        });
        let result = check_store(&base.with_lists(lists));
        assert!(result.errors.contains(&CheckError::DuplicateId {
            kind: "list",
            id: "1".into(),
        }));
        assert!(result.errors.contains(&CheckError::OrphanList {
            list_id: "1".into(),
            project_id: "77".into(),
        }));
    }

    #[test]
    fn hand_set_counters_are_recomputed_before_checking() {
        let base = store();
        let mut projects = base.projects().to_vec();
        projects[0].tasks_count = 99;
        projects[0].completed_tasks = 42;
        let replaced = base.with_projects(projects);

        assert_eq!(replaced.projects()[0].tasks_count, base.projects()[0].tasks_count);
        assert_eq!(replaced.projects()[0].completed_tasks, base.projects()[0].completed_tasks);
        assert!(check_store(&replaced).valid);
    }

    #[test]
    fn json_shape_is_tagged() {
        let err = CheckError::OrphanList {
            list_id: "4".into(),
            project_id: "3".into(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"orphan_list","list_id":"4","project_id":"3"}"#);
    }
}
