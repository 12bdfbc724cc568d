//! Last-seen `updated_at` per issue number.

use serde_json::Value;
use std::collections::HashMap;

use crate::watcher::types::{IssueChange, IssueSummary, WatchError, WatchResult};

/// Remembers the `updated_at` of every issue seen so far.
#[derive(Debug, Default)]
pub struct IssueCache {
    seen: HashMap<u64, String>,
}

impl IssueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of issues tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Record one issue and report whether it is new or modified.
    pub fn record(&mut self, issue: IssueSummary) -> Option<IssueChange> {
        match self.seen.insert(issue.number, issue.updated_at.clone()) {
            None => Some(IssueChange::New(issue)),
            Some(previous) if previous != issue.updated_at => Some(IssueChange::Modified(issue)),
            Some(_) => None,
        }
    }

    /// Feed a raw puller payload through the cache.
    ///
    /// Elements that are not issue-shaped are skipped.
    pub fn observe(&mut self, payload: &[u8]) -> WatchResult<Vec<IssueChange>> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Empty payload from source; treating as no issues");
            return Ok(Vec::new());
        }

        let elements = match serde_json::from_slice::<Value>(payload)? {
            Value::Array(elements) => elements,
            Value::Object(_) => return Err(WatchError::NotAnArray("an object")),
            Value::String(_) => return Err(WatchError::NotAnArray("a string")),
            Value::Number(_) => return Err(WatchError::NotAnArray("a number")),
            Value::Bool(_) => return Err(WatchError::NotAnArray("a boolean")),
            Value::Null => return Err(WatchError::NotAnArray("null")),
        };

        let mut changes = Vec::new();
        for element in elements {
            match serde_json::from_value::<IssueSummary>(element) {
                Ok(issue) => changes.extend(self.record(issue)),
                Err(e) => tracing::warn!(error = %e, "Skipping malformed issue"),
            }
        }
        Ok(changes)
    }
}
