use crate::model::alarm::Alarm;
use crate::model::list::List;
use crate::model::project::Project;
use crate::model::task::Task;

/// Anything addressable by a string identifier
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for List {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Alarm {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Move `source_id` to sit immediately before `target_id` within the subset
/// of `all` selected by `in_subset`.
///
/// The result is every item outside the subset, in original order, followed by
/// the reordered subset. Only the relative order inside a subset is
/// meaningful; callers re-filter instead of relying on global positions.
///
/// Returns `all` unchanged when the ids are equal or either one is not in the
/// subset (e.g. the target was deleted while a drag was in flight).
pub fn reorder_within_subset<T, F>(all: &[T], in_subset: F, source_id: &str, target_id: &str) -> Vec<T>
where
    T: Identified + Clone,
    F: Fn(&T) -> bool,
{
    if source_id == target_id {
        return all.to_vec();
    }

    let (mut subset, rest): (Vec<T>, Vec<T>) = all.iter().cloned().partition(|item| in_subset(item));

    let Some(source_idx) = subset.iter().position(|item| item.id() == source_id) else {
        return all.to_vec();
    };
    if !subset.iter().any(|item| item.id() == target_id) {
        return all.to_vec();
    }

    let moved = subset.remove(source_idx);
    // Target position is looked up after removal
    let target_idx = subset
        .iter()
        .position(|item| item.id() == target_id)
        .unwrap_or(subset.len());
    subset.insert(target_idx, moved);

    let mut out = rest;
    out.extend(subset);
    out
}
