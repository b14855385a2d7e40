use chrono::Utc;

use crate::model::config::IdStrategy;
use crate::model::store::Store;

/// Source of fresh entity identifiers.
///
/// `taken` reports whether a candidate is already in use by the collection the
/// new entity will join; implementations must never return a taken id.
pub trait IdGenerator {
    fn next_id(&mut self, taken: &dyn Fn(&str) -> bool) -> String;
}

/// Increasing integer ids: "1", "2", ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new(start: u64) -> Self {
        SequentialIds { next: start }
    }

    /// Start after the highest numeric id present anywhere in the store.
    pub fn after(store: &Store) -> Self {
        let max = store
            .projects()
            .iter()
            .map(|p| p.id.as_str())
            .chain(store.lists().iter().map(|l| l.id.as_str()))
            .chain(store.tasks().iter().map(|t| t.id.as_str()))
            .chain(store.alarms().iter().map(|a| a.id.as_str()))
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        SequentialIds::new(max + 1)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        SequentialIds::new(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, taken: &dyn Fn(&str) -> bool) -> String {
        loop {
            let candidate = self.next.to_string();
            self.next += 1;
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}

/// Millisecond timestamp ids. Two calls within the same millisecond, or a
/// candidate already in use, bump the value until it is free.
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last: i64,
}

impl TimestampIds {
    pub fn new() -> Self {
        TimestampIds::default()
    }

    fn candidate_after(&self, now: i64) -> i64 {
        now.max(self.last + 1)
    }

    fn next_from(&mut self, now: i64, taken: &dyn Fn(&str) -> bool) -> String {
        let mut candidate = self.candidate_after(now);
        while taken(&candidate.to_string()) {
            candidate += 1;
        }
        self.last = candidate;
        candidate.to_string()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self, taken: &dyn Fn(&str) -> bool) -> String {
        self.next_from(Utc::now().timestamp_millis(), taken)
    }
}

/// Build the generator selected in config, primed against `store`.
pub fn generator_for(strategy: IdStrategy, store: &Store) -> Box<dyn IdGenerator> {
    match strategy {
        IdStrategy::Sequential => Box::new(SequentialIds::after(store)),
        IdStrategy::Timestamp => Box::new(TimestampIds::new()),
    }
}
