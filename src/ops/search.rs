use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::model::store::Store;
use crate::model::task::Task;

/// Which field of a task matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Description,
    /// Name of the owning project
    Category,
}

/// A search hit for a task field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub task_id: String,
    pub field: MatchField,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search every task, in sequence order. A task yields one hit per matching
/// field.
pub fn search_tasks(store: &Store, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for task in store.tasks() {
        search_task(re, task, &mut hits);
    }
    hits
}

fn search_task(re: &Regex, task: &Task, hits: &mut Vec<SearchHit>) {
    let fields = [
        (MatchField::Title, Some(task.title.as_str())),
        (MatchField::Description, task.description.as_deref()),
        (MatchField::Category, task.category.as_deref()),
    ];
    for (field, text) in fields {
        let Some(text) = text else { continue };
        let spans = find_matches(re, text);
        if !spans.is_empty() {
            hits.push(SearchHit {
                task_id: task.id.clone(),
                field,
                spans,
            });
        }
    }
}

/// Compile a user-supplied pattern, case-insensitively unless it contains an
/// uppercase letter.
pub fn compile_query(pattern: &str) -> Result<Regex, regex::Error> {
    let smart_case = !pattern.chars().any(|c| c.is_uppercase());
    regex::RegexBuilder::new(pattern)
        .case_insensitive(smart_case)
        .build()
}
