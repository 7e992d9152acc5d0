use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Note {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
