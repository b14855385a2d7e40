use chrono::NaiveDateTime;

use crate::model::project::Project;
use crate::model::store::Store;
use crate::model::task::{DEFAULT_TASK_COLOR, NewTask, Task, TaskPatch};
use crate::ops::ids::IdGenerator;
use crate::ops::reorder::reorder_within_subset;

/// A create/update/move pointed at an entity that does not exist, or at a list
/// belonging to another project.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("project not found: {0}")]
    UnknownProject(String),
    #[error("list not found: {0}")]
    UnknownList(String),
    #[error("list {list_id} does not belong to project {project_id}")]
    ListNotInProject { list_id: String, project_id: String },
}

/// Which filtered slice of the task sequence a reorder applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskScope {
    /// All tasks of a project
    Project(String),
    /// Tasks in a list
    List(String),
    /// Tasks of a project that sit in no list
    Unlisted(String),
}

impl TaskScope {
    pub fn contains(&self, task: &Task) -> bool {
        match self {
            TaskScope::Project(pid) => task.project_id == *pid,
            TaskScope::List(lid) => task.list_id.as_deref() == Some(lid.as_str()),
            TaskScope::Unlisted(pid) => task.project_id == *pid && task.list_id.is_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Task CRUD
// ---------------------------------------------------------------------------

/// Append a new task. The project must exist and a given list must belong to
/// it; on failure the store is left as it was.
pub fn create_task(
    store: &Store,
    ids: &mut dyn IdGenerator,
    data: NewTask,
) -> Result<(Store, Task), ReferenceError> {
    let project = store
        .project(&data.project_id)
        .ok_or_else(|| ReferenceError::UnknownProject(data.project_id.clone()))?;
    if let Some(list_id) = &data.list_id {
        check_list_owner(store, list_id, &project.id)?;
    }

    let id = ids.next_id(&|candidate| store.task(candidate).is_some());
    let task = Task {
        id,
        title: data.title,
        description: data.description,
        project_id: project.id.clone(),
        list_id: data.list_id,
        start_time: data.start_time,
        duration: data.duration,
        priority: data.priority,
        completed: false,
        color: data.color.unwrap_or_else(|| inherited_color(project)),
        due_date: data.due_date,
        area: Some(project.area),
        category: Some(project.name.clone()),
    };
    tracing::info!(task_id = %task.id, project_id = %task.project_id, "created task '{}'", task.title);

    let mut tasks = store.tasks().to_vec();
    tasks.push(task.clone());
    Ok((store.with_tasks(tasks), task))
}

/// Merge `patch` into a task. Unknown task ids are a no-op.
///
/// When the project changes and the patch does not name a list, the task
/// leaves its old list. The area and category copies follow the project.
pub fn update_task(store: &Store, task_id: &str, patch: TaskPatch) -> Result<Store, ReferenceError> {
    let Some(current) = store.task(task_id) else {
        tracing::debug!(task_id, "update: task not found");
        return Ok(store.clone());
    };

    let project_id = patch.project_id.clone().unwrap_or_else(|| current.project_id.clone());
    let project = store
        .project(&project_id)
        .ok_or_else(|| ReferenceError::UnknownProject(project_id.clone()))?;
    let project_changed = project_id != current.project_id;

    let list_id = match patch.list_id {
        Some(list) => list,
        None if project_changed => None,
        None => current.list_id.clone(),
    };
    if let Some(lid) = &list_id {
        check_list_owner(store, lid, &project_id)?;
    }

    let mut updated = current.clone();
    if let Some(title) = patch.title {
        updated.title = title;
    }
    if let Some(description) = patch.description {
        updated.description = description;
    }
    if let Some(start_time) = patch.start_time {
        updated.start_time = start_time;
    }
    if let Some(duration) = patch.duration {
        updated.duration = duration;
    }
    if let Some(priority) = patch.priority {
        updated.priority = priority;
    }
    if let Some(completed) = patch.completed {
        updated.completed = completed;
    }
    if let Some(color) = patch.color {
        updated.color = color;
    }
    if let Some(due_date) = patch.due_date {
        updated.due_date = due_date;
    }
    updated.list_id = list_id;
    if project_changed {
        adopt_project(&mut updated, project);
    }

    Ok(replace_task(store, updated))
}

/// Flip a task's completed flag. Unknown ids are a no-op.
pub fn toggle_task_completed(store: &Store, task_id: &str) -> Store {
    let Some(task) = store.task(task_id) else {
        tracing::debug!(task_id, "toggle: task not found");
        return store.clone();
    };
    let mut updated = task.clone();
    updated.completed = !updated.completed;
    tracing::info!(task_id, completed = updated.completed, "toggled task");
    replace_task(store, updated)
}

/// Remove a task. Unknown ids are a no-op.
pub fn delete_task(store: &Store, task_id: &str) -> Store {
    if store.task(task_id).is_none() {
        tracing::debug!(task_id, "delete: task not found");
        return store.clone();
    }
    let tasks = store
        .tasks()
        .iter()
        .filter(|t| t.id != task_id)
        .cloned()
        .collect();
    tracing::info!(task_id, "deleted task");
    store.with_tasks(tasks)
}

/// Move a task to a new start time (dropping it on another calendar slot).
pub fn reschedule_task(store: &Store, task_id: &str, start_time: NaiveDateTime) -> Store {
    let Some(task) = store.task(task_id) else {
        tracing::debug!(task_id, "reschedule: task not found");
        return store.clone();
    };
    let mut updated = task.clone();
    updated.start_time = start_time;
    replace_task(store, updated)
}

// ---------------------------------------------------------------------------
// Move & reorder
// ---------------------------------------------------------------------------

/// Put a task into `to_list`, or into its project's unlisted bucket when
/// `to_list` is `None`.
///
/// The target list's project wins: moving into a list of another project
/// reassigns the task to that project, so a task's list always belongs to its
/// project. With `before`, the task is then placed immediately before that
/// task within the destination; if `before` is not there the task keeps its
/// insertion order.
pub fn move_task_to_list(
    store: &Store,
    task_id: &str,
    to_list: Option<&str>,
    before: Option<&str>,
) -> Result<Store, ReferenceError> {
    let Some(task) = store.task(task_id) else {
        tracing::debug!(task_id, "move: task not found");
        return Ok(store.clone());
    };

    let mut moved = task.clone();
    let scope = match to_list {
        Some(list_id) => {
            let list = store
                .list(list_id)
                .ok_or_else(|| ReferenceError::UnknownList(list_id.to_string()))?;
            if list.project_id != moved.project_id {
                let project = store
                    .project(&list.project_id)
                    .ok_or_else(|| ReferenceError::UnknownProject(list.project_id.clone()))?;
                tracing::info!(
                    task_id,
                    from = %moved.project_id,
                    to = %project.id,
                    "task follows list into another project"
                );
                adopt_project(&mut moved, project);
            }
            moved.list_id = Some(list.id.clone());
            TaskScope::List(list.id.clone())
        }
        None => {
            moved.list_id = None;
            TaskScope::Unlisted(moved.project_id.clone())
        }
    };
    tracing::info!(task_id, list = ?moved.list_id, "moved task");

    let store = replace_task(store, moved);
    Ok(match before {
        Some(target) => reorder_tasks(&store, &scope, task_id, target),
        None => store,
    })
}

/// Place `source_id` immediately before `target_id` within `scope`.
pub fn reorder_tasks(store: &Store, scope: &TaskScope, source_id: &str, target_id: &str) -> Store {
    let tasks = reorder_within_subset(store.tasks(), |t| scope.contains(t), source_id, target_id);
    store.with_tasks(tasks)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn inherited_color(project: &Project) -> String {
    if project.color.is_empty() {
        DEFAULT_TASK_COLOR.to_string()
    } else {
        project.color.clone()
    }
}

/// Point a task at a new project and refresh the display copies.
fn adopt_project(task: &mut Task, project: &Project) {
    task.project_id = project.id.clone();
    task.area = Some(project.area);
    task.category = Some(project.name.clone());
}

fn check_list_owner(store: &Store, list_id: &str, project_id: &str) -> Result<(), ReferenceError> {
    let list = store
        .list(list_id)
        .ok_or_else(|| ReferenceError::UnknownList(list_id.to_string()))?;
    if list.project_id != project_id {
        return Err(ReferenceError::ListNotInProject {
            list_id: list_id.to_string(),
            project_id: project_id.to_string(),
        });
    }
    Ok(())
}

/// Swap in `updated` at the position of the task with the same id.
fn replace_task(store: &Store, updated: Task) -> Store {
    let tasks = store
        .tasks()
        .iter()
        .map(|t| if t.id == updated.id { updated.clone() } else { t.clone() })
        .collect();
    store.with_tasks(tasks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
