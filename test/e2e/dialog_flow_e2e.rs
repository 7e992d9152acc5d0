use std::env;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::tempdir;
use tokio::time::sleep;

use vocalhub_core::dialog::DialogCoordinator;
use vocalhub_core::entities::{LedgerEntry, StatsSnapshot, WidgetId, WidgetKind, WidgetPayload};
use vocalhub_core::error::RecognitionError;
use vocalhub_core::interface::StaticGeo;
use vocalhub_core::logging;
use vocalhub_core::ports::notification::{NotificationFuture, NotificationPort, Severity};
use vocalhub_core::ports::render::{RenderFuture, RenderPort};
use vocalhub_core::ports::speech::{SpeechFuture, SpeechPort, Transcript};
use vocalhub_core::Mood;

#[derive(Default)]
struct CapturingRender {
    created: Mutex<Vec<(WidgetId, WidgetKind, WidgetPayload)>>,
    updated: Mutex<Vec<(WidgetId, WidgetPayload)>>,
    removed: Mutex<Vec<WidgetId>>,
    stats: Mutex<Vec<StatsSnapshot>>,
    history: Mutex<Vec<Vec<LedgerEntry>>>,
}

impl RenderPort for CapturingRender {
    fn create_widget(&self, id: WidgetId, kind: WidgetKind, payload: WidgetPayload) -> RenderFuture {
        self.created.lock().expect("lock").push((id, kind, payload));
        Box::pin(async {})
    }

    fn update_widget(&self, id: WidgetId, payload: WidgetPayload) -> RenderFuture {
        self.updated.lock().expect("lock").push((id, payload));
        Box::pin(async {})
    }

    fn remove_widget(&self, id: WidgetId) -> RenderFuture {
        self.removed.lock().expect("lock").push(id);
        Box::pin(async {})
    }

    fn render_stats(&self, stats: StatsSnapshot) -> RenderFuture {
        self.stats.lock().expect("lock").push(stats);
        Box::pin(async {})
    }

    fn render_history(&self, entries: Vec<LedgerEntry>) -> RenderFuture {
        self.history.lock().expect("lock").push(entries);
        Box::pin(async {})
    }
}

#[derive(Default)]
struct CapturingSpeech {
    spoken: Mutex<Vec<String>>,
}

impl SpeechPort for CapturingSpeech {
    fn recognize_once(&self) -> SpeechFuture<Result<Transcript, RecognitionError>> {
        Box::pin(async { Err(RecognitionError::NotSupported) })
    }

    fn speak(&self, text: String) -> SpeechFuture<()> {
        self.spoken.lock().expect("lock").push(text);
        Box::pin(async {})
    }
}

#[derive(Default)]
struct CapturingNotifier {
    shown: Mutex<Vec<(String, String, Severity)>>,
}

impl NotificationPort for CapturingNotifier {
    fn show(&self, title: String, subtitle: String, severity: Severity) -> NotificationFuture {
        self.shown
            .lock()
            .expect("lock")
            .push((title, subtitle, severity));
        Box::pin(async { Ok(()) })
    }
}

#[tokio::test]
async fn dialog_flow_e2e() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let log_dir = match env::var("E2E_LOG_DIR") {
        Ok(dir) => std::path::PathBuf::from(dir),
        Err(_) => temp.path().join("logs"),
    };
    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_DIR", log_dir.to_string_lossy().as_ref());
    env::set_var("LOG_FORMAT", "text");
    env::set_var("RUST_LOG", "info");
    logging::init();

    let render = Arc::new(CapturingRender::default());
    let speech = Arc::new(CapturingSpeech::default());
    let notifier = Arc::new(CapturingNotifier::default());
    let handle = DialogCoordinator::spawn(
        render.clone(),
        speech.clone(),
        Arc::new(StaticGeo::new(Some((40.7128, -74.006)))),
        notifier.clone(),
    );

    let script = [
        "show weather",
        "show gps",
        "add a task buy milk",
        "add a note i feel very happy today",
        "detect mood",
        "happy",
        "what is the meaning of life",
        "clear all cards",
    ];
    for line in script {
        handle.submit_text(line);
        sleep(Duration::from_millis(50)).await;
    }
    sleep(Duration::from_millis(200)).await;

    let created = render.created.lock().expect("lock");
    for kind in [
        WidgetKind::Weather,
        WidgetKind::Gps,
        WidgetKind::Task,
        WidgetKind::NotesList,
        WidgetKind::Music,
    ] {
        assert!(
            created.iter().any(|(_, k, _)| *k == kind),
            "missing widget {kind:?}"
        );
    }
    drop(created);

    let updated = render.updated.lock().expect("lock");
    assert!(updated
        .iter()
        .any(|(_, p)| matches!(p, WidgetPayload::GpsPosition { .. })));
    assert!(updated
        .iter()
        .any(|(_, p)| matches!(p, WidgetPayload::Music { mood: Mood::Happy, .. })));
    drop(updated);

    // clear all cards released every widget on the board
    assert_eq!(render.removed.lock().expect("lock").len(), 5);

    let history = render.history.lock().expect("lock");
    let last = history.last().expect("history rendered");
    assert_eq!(last.len(), 7);
    assert_eq!(last[0].action, "Cleared Dashboard");
    drop(history);

    let stats = render.stats.lock().expect("lock");
    let last = stats.last().expect("stats rendered");
    assert_eq!(last.commands, 5);
    assert_eq!(last.active_widgets, 0);
    assert_eq!(last.tasks, 0);
    drop(stats);

    let spoken = speech.spoken.lock().expect("lock");
    assert!(spoken.iter().any(|l| l.contains("How are you feeling")));
    assert!(spoken.iter().any(|l| l.contains("upbeat")));
    assert!(spoken.iter().any(|l| l == "Note added"));
    drop(spoken);

    let shown = notifier.shown.lock().expect("lock");
    assert!(shown
        .iter()
        .any(|(t, _, s)| t == "Welcome to VocalHub" && *s == Severity::Info));
    assert!(shown
        .iter()
        .any(|(t, sub, s)| t == "Command Not Recognized"
            && sub.contains("what is the meaning of life")
            && *s == Severity::Warning));
    assert!(shown
        .iter()
        .any(|(t, _, s)| t == "All Cards Cleared" && *s == Severity::Success));
    drop(shown);

    handle.shutdown();
    sleep(Duration::from_millis(100)).await;

    log::logger().flush();
    let logs = fs::read_to_string(log_dir.join("vocalhub.log"))?;
    assert!(logs.contains("[dialog] command: show weather"));
    assert!(logs.contains("started"));
    assert!(logs.contains("closed"));

    Ok(())
}
