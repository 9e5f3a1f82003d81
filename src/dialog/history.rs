//! In-memory input history, keyed by history name.

use std::collections::HashMap;

/// Number of items kept per history name.
pub const DEFAULT_HISTORY_LIMIT: usize = 60;

/// Recall lists for named inputs, oldest item first.
#[derive(Debug, Clone)]
pub struct History {
    lists: HashMap<String, Vec<String>>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            lists: HashMap::new(),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl History {
    /// Creates an empty history store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many items are kept per name.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Items recorded under `name`, oldest first.
    pub fn load(&self, name: &str) -> Vec<String> {
        self.lists.get(name).cloned().unwrap_or_default()
    }

    /// Records `value` under `name`.
    ///
    /// Empty values and repeats of the newest item are skipped; the oldest
    /// items are dropped once the limit is exceeded.
    pub fn push(&mut self, name: &str, value: &str) {
        if value.is_empty() || self.limit == 0 {
            return;
        }
        let list = self.lists.entry(name.to_string()).or_default();
        if list.last().map(String::as_str) == Some(value) {
            return;
        }
        list.push(value.to_string());
        if list.len() > self.limit {
            let excess = list.len() - self.limit;
            list.drain(..excess);
        }
    }
}
