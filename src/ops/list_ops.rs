use crate::model::list::{List, NewList};
use crate::model::store::Store;
use crate::ops::ids::IdGenerator;
use crate::ops::reorder::reorder_within_subset;
use crate::ops::task_ops::ReferenceError;

/// Append a new list to an existing project.
pub fn create_list(store: &Store, ids: &mut dyn IdGenerator, data: NewList) -> Result<(Store, List), ReferenceError> {
    if store.project(&data.project_id).is_none() {
        return Err(ReferenceError::UnknownProject(data.project_id));
    }
    let id = ids.next_id(&|candidate| store.list(candidate).is_some());
    let list = List {
        id,
        title: data.title,
        project_id: data.project_id,
    };
    tracing::info!(list_id = %list.id, project_id = %list.project_id, "created list '{}'", list.title);

    let mut lists = store.lists().to_vec();
    lists.push(list.clone());
    Ok((store.with_lists(lists), list))
}

/// Rename a list. Unknown ids are a no-op.
pub fn rename_list(store: &Store, list_id: &str, title: &str) -> Store {
    if store.list(list_id).is_none() {
        tracing::debug!(list_id, "rename: list not found");
        return store.clone();
    }
    let lists = store
        .lists()
        .iter()
        .map(|l| {
            let mut l = l.clone();
            if l.id == list_id {
                l.title = title.to_string();
            }
            l
        })
        .collect();
    store.with_lists(lists)
}

/// Remove a list. Its tasks stay in the project with no list.
/// Unknown ids are a no-op.
pub fn delete_list(store: &Store, list_id: &str) -> Store {
    if store.list(list_id).is_none() {
        tracing::debug!(list_id, "delete: list not found");
        return store.clone();
    }
    let lists = store
        .lists()
        .iter()
        .filter(|l| l.id != list_id)
        .cloned()
        .collect();
    let tasks = store
        .tasks()
        .iter()
        .map(|t| {
            let mut t = t.clone();
            if t.list_id.as_deref() == Some(list_id) {
                t.list_id = None;
            }
            t
        })
        .collect();
    tracing::info!(list_id, "deleted list");
    store.with_lists(lists).with_tasks(tasks)
}

/// Place `source_id` immediately before `target_id` among a project's lists.
pub fn reorder_lists(store: &Store, project_id: &str, source_id: &str, target_id: &str) -> Store {
    let lists = reorder_within_subset(store.lists(), |l| l.project_id == project_id, source_id, target_id);
    store.with_lists(lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample::sample_store;
    use crate::ops::ids::SequentialIds;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn create_list_requires_project() {
        let store = sample_store(today());
        let mut ids = SequentialIds::after(&store);
        let (next, list) = create_list(
            &store,
            &mut ids,
            NewList {
                title: "Cardio".into(),
                project_id: "2".into(),
            },
        )
        .unwrap();
        assert_eq!(next.list(&list.id).unwrap().title, "Cardio");

        let err = create_list(
            &store,
            &mut ids,
            NewList {
                title: "Nowhere".into(),
                project_id: "999".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err, ReferenceError::UnknownProject("999".into()));
    }

    #[test]
    fn delete_list_keeps_tasks() {
        let store = sample_store(today());
        let next = delete_list(&store, "1");
        assert!(next.list("1").is_none());
        assert_eq!(next.tasks().len(), store.tasks().len());
        assert_eq!(next.task("1").unwrap().list_id, None);
        // Other lists untouched
        assert_eq!(next.task("4").unwrap().list_id.as_deref(), Some("2"));
    }

    #[test]
    fn delete_unknown_list_is_noop() {
        let store = sample_store(today());
        assert_eq!(delete_list(&store, "404"), store);
    }

    #[test]
    fn rename_list() {
        let store = sample_store(today());
        let next = super::rename_list(&store, "2", "Verbs");
        assert_eq!(next.list("2").unwrap().title, "Verbs");
        assert_eq!(super::rename_list(&store, "404", "x"), store);
    }

    #[test]
    fn reorder_lists_within_project() {
        let store = sample_store(today());
        let next = reorder_lists(&store, "1", "2", "1");
        let titles: Vec<_> = next
            .lists()
            .iter()
            .filter(|l| l.project_id == "1")
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Grammar", "Vocabulary"]);
    }
}
