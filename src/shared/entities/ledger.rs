use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Oldest entries are evicted once the history grows past this.
pub const HISTORY_CAPACITY: usize = 25;

#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    pub command: String,
    pub action: String,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn time(&self) -> String {
        self.recorded_at.format("%H:%M:%S").to_string()
    }

    pub fn date(&self) -> String {
        self.recorded_at.format("%Y-%m-%d").to_string()
    }
}

/// Bounded newest-first history of dispatched commands.
#[derive(Debug, Default)]
pub struct SessionLedger {
    entries: VecDeque<LedgerEntry>,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, command: impl Into<String>, action: impl Into<String>) {
        self.entries.push_front(LedgerEntry {
            command: command.into(),
            action: action.into(),
            recorded_at: Utc::now(),
        });
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_back();
        }
    }

    /// Snapshot, newest first.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
