use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::entities::identifiers::{SessionId, WidgetId};
use crate::shared::entities::ledger::{LedgerEntry, SessionLedger};
use crate::shared::entities::note::Note;
use crate::shared::entities::task::Task;
use crate::shared::entities::widget::WidgetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub commands: u64,
    pub notes: usize,
    pub tasks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub commands: u64,
    pub notes: usize,
    pub tasks: usize,
    pub active_widgets: usize,
    pub session_minutes: i64,
}

/// In-memory state of one dashboard session. All mutation funnels through
/// here so the note and task counts can be derived from the live collections
/// instead of being book-kept alongside them; only the command counter is an
/// explicit saturating count.
#[derive(Debug)]
pub struct DashboardSession {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    notes: Vec<Note>,
    tasks: Vec<Task>,
    widgets: HashMap<WidgetId, WidgetKind>,
    ledger: SessionLedger,
    commands: u64,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            started_at: Utc::now(),
            notes: Vec::new(),
            tasks: Vec::new(),
            widgets: HashMap::new(),
            ledger: SessionLedger::new(),
            commands: 0,
        }
    }

    /// Registers a widget id. Returns false without side effects when the id
    /// is already live, so repeated singleton commands neither re-render nor
    /// bump the command counter.
    pub fn register_widget(&mut self, id: WidgetId, kind: WidgetKind) -> bool {
        if self.widgets.contains_key(&id) {
            return false;
        }
        self.widgets.insert(id, kind);
        self.commands = self.commands.saturating_add(1);
        true
    }

    /// Releases a widget, dropping any task bound to it. No-op on unknown
    /// ids, which also keeps the derived counters clamped at zero.
    pub fn release_widget(&mut self, id: &WidgetId) -> Option<WidgetKind> {
        let kind = self.widgets.remove(id)?;
        if kind == WidgetKind::Task {
            self.tasks.retain(|t| &t.widget != id);
        }
        Some(kind)
    }

    pub fn has_widget(&self, id: &WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn widget_ids(&self) -> Vec<WidgetId> {
        self.widgets.keys().cloned().collect()
    }

    pub fn append_note(&mut self, text: impl Into<String>) {
        self.notes.push(Note::new(text));
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// All note text joined for mood scoring.
    pub fn note_corpus(&self) -> String {
        self.notes
            .iter()
            .map(|n| n.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn add_task(&mut self, widget: WidgetId, text: impl Into<String>) {
        self.tasks.push(Task::new(widget, text));
    }

    /// Flips completion of the task bound to `widget`. Returns the new text
    /// and completion state, or None when no such task exists.
    pub fn toggle_task(&mut self, widget: &WidgetId) -> Option<(String, bool)> {
        let task = self.tasks.iter_mut().find(|t| &t.widget == widget)?;
        task.completed = !task.completed;
        Some((task.text.clone(), task.completed))
    }

    pub fn record(&mut self, command: impl Into<String>, action: impl Into<String>) {
        self.ledger.record(command, action);
    }

    pub fn history(&self) -> Vec<LedgerEntry> {
        self.ledger.entries()
    }

    pub fn counters(&self) -> Counters {
        Counters {
            commands: self.commands,
            notes: self
                .widgets
                .values()
                .filter(|k| **k == WidgetKind::Note)
                .count(),
            tasks: self.tasks.iter().filter(|t| !t.completed).count(),
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        let counters = self.counters();
        StatsSnapshot {
            commands: counters.commands,
            notes: counters.notes,
            tasks: counters.tasks,
            active_widgets: self.widgets.len(),
            session_minutes: (Utc::now() - self.started_at).num_minutes(),
        }
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}
