use serde::Serialize;

use crate::nlu::mood::Mood;
use crate::shared::entities::identifiers::WidgetId;

/// Widget categories shown on the dashboard. Most are singletons bound to a
/// fixed id so repeated commands cannot stack duplicates; notes, tasks and
/// timers are instanced and may coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Weather,
    Calculator,
    Gps,
    Clock,
    YouTube,
    Music,
    Note,
    NotesList,
    Task,
    Timer,
    News,
    Quote,
}

impl WidgetKind {
    pub fn fixed_id(self) -> Option<&'static str> {
        match self {
            WidgetKind::Weather => Some("weather-card"),
            WidgetKind::Calculator => Some("calculator-card"),
            WidgetKind::Gps => Some("gps-card"),
            WidgetKind::Clock => Some("clock-card"),
            WidgetKind::YouTube => Some("youtube-card"),
            WidgetKind::Music => Some("music-card"),
            WidgetKind::NotesList => Some("notes-list-card"),
            WidgetKind::News => Some("news-card"),
            WidgetKind::Quote => Some("quote-card"),
            WidgetKind::Note | WidgetKind::Task | WidgetKind::Timer => None,
        }
    }

    /// Fixed id for singletons, fresh uuid-suffixed id otherwise.
    pub fn widget_id(self) -> WidgetId {
        match self.fixed_id() {
            Some(id) => WidgetId::new(id),
            None => {
                let prefix = match self {
                    WidgetKind::Note => "note",
                    WidgetKind::Task => "task",
                    _ => "timer",
                };
                WidgetId::generate(prefix)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeatherReport {
    pub temperature_c: i32,
    pub condition: &'static str,
    pub humidity_pct: u8,
    pub location: &'static str,
    pub wind: &'static str,
    pub uv_index: &'static str,
}

/// Display content handed to the render layer. Serialized form is what a
/// remote renderer would receive, hence the tagged representation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetPayload {
    Weather(WeatherReport),
    Calculator,
    GpsAcquiring,
    GpsPosition {
        latitude: f64,
        longitude: f64,
        accuracy_m: f64,
        altitude_m: Option<f64>,
    },
    GpsUnavailable {
        message: String,
    },
    Clock,
    YouTube,
    Music {
        playlist_id: String,
        playlist_name: String,
        mood: Mood,
    },
    NoteDraft,
    NotesList {
        notes: Vec<String>,
    },
    Task {
        text: String,
        completed: bool,
    },
    TimerRunning {
        remaining_seconds: u64,
        minutes: u32,
    },
    TimerExpired {
        minutes: u32,
    },
    News {
        headline: String,
    },
    Quote {
        text: String,
        author: String,
    },
}
