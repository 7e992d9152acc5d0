use chrono::{DateTime, Utc};

use crate::shared::entities::identifiers::WidgetId;

/// A task lives exactly as long as its widget; completion is toggled from
/// the rendering layer and only flips state, it never removes the task.
#[derive(Debug, Clone)]
pub struct Task {
    pub widget: WidgetId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(widget: WidgetId, text: impl Into<String>) -> Self {
        Self {
            widget,
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}
