use crate::dialog::timers::format_clock;
use crate::shared::entities::{LedgerEntry, StatsSnapshot, WidgetId, WidgetKind, WidgetPayload};
use crate::shared::error::RecognitionError;
use crate::shared::ports::notification::{NotificationFuture, NotificationPort, Severity};
use crate::shared::ports::render::{RenderFuture, RenderPort};
use crate::shared::ports::speech::{SpeechFuture, SpeechPort, Transcript};

/// Renders the dashboard as plain lines on stdout. One line per widget
/// event, payloads as JSON.
#[derive(Clone, Debug, Default)]
pub struct ConsoleRender;

impl ConsoleRender {
    pub fn new() -> Self {
        Self
    }

    fn payload_json(payload: &WidgetPayload) -> String {
        serde_json::to_string(payload).unwrap_or_else(|err| {
            log::warn!("[render] payload encode failed: {err}");
            String::from("{}")
        })
    }
}

impl RenderPort for ConsoleRender {
    fn create_widget(&self, id: WidgetId, kind: WidgetKind, payload: WidgetPayload) -> RenderFuture {
        println!("[card+] {id} {kind:?} {}", Self::payload_json(&payload));
        Box::pin(async {})
    }

    fn update_widget(&self, id: WidgetId, payload: WidgetPayload) -> RenderFuture {
        // Countdowns update every second; a clock line beats a JSON dump.
        if let WidgetPayload::TimerRunning {
            remaining_seconds, ..
        } = payload
        {
            println!("[card~] {id} {}", format_clock(remaining_seconds));
        } else {
            println!("[card~] {id} {}", Self::payload_json(&payload));
        }
        Box::pin(async {})
    }

    fn remove_widget(&self, id: WidgetId) -> RenderFuture {
        println!("[card-] {id}");
        Box::pin(async {})
    }

    fn render_stats(&self, stats: StatsSnapshot) -> RenderFuture {
        println!(
            "[stats] commands={} notes={} tasks={} widgets={} minutes={}",
            stats.commands, stats.notes, stats.tasks, stats.active_widgets, stats.session_minutes
        );
        Box::pin(async {})
    }

    fn render_history(&self, entries: Vec<LedgerEntry>) -> RenderFuture {
        // The full list is re-sent on every change; only the newest line
        // is worth a console reader's attention.
        if let Some(top) = entries.first() {
            println!("[history] {} \"{}\" -> {}", top.time(), top.command, top.action);
        }
        Box::pin(async {})
    }
}

/// Speech adapter for a microphone-less console. Speaking prints, listening
/// reports that recognition is unavailable.
#[derive(Clone, Debug, Default)]
pub struct ConsoleSpeech;

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechPort for ConsoleSpeech {
    fn recognize_once(&self) -> SpeechFuture<Result<Transcript, RecognitionError>> {
        Box::pin(async { Err(RecognitionError::NotSupported) })
    }

    fn speak(&self, text: String) -> SpeechFuture<()> {
        println!("[voice] {text}");
        Box::pin(async {})
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConsoleNotification;

impl ConsoleNotification {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationPort for ConsoleNotification {
    fn show(&self, title: String, subtitle: String, severity: Severity) -> NotificationFuture {
        println!("[notify:{severity:?}] {title} - {subtitle}");
        Box::pin(async { Ok(()) })
    }
}
