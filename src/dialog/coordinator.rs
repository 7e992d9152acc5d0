use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tokio::time::{self, MissedTickBehavior};

use crate::nlu::intent;
use crate::nlu::mood::{self, Mood, MoodSource};
use crate::service::{CommandExecutor, Dispatch};
use crate::shared::config;
use crate::shared::entities::WidgetId;
use crate::shared::error::RecognitionError;
use crate::shared::ports::geo::GeoPort;
use crate::shared::ports::notification::{NotificationPort, Severity};
use crate::shared::ports::render::RenderPort;
use crate::shared::ports::speech::{SpeechPort, Transcript};

use super::state_machine::{DialogCommand, DialogSignal, DialogState, DialogStateMachine};
use super::timers::TimerRegistry;
use super::types::{DialogIn, RecognitionToken};

/// Cloneable sender half of a running dialog. Dropping every handle closes
/// the inbox and ends the session task.
#[derive(Clone)]
pub struct DialogHandle {
    tx: UnboundedSender<DialogIn>,
}

impl DialogHandle {
    pub fn start_recognition(&self) {
        let _ = self.tx.send(DialogIn::StartRecognition);
    }

    pub fn stop_recognition(&self) {
        let _ = self.tx.send(DialogIn::StopRecognition);
    }

    pub fn submit_text(&self, text: impl Into<String>) {
        let _ = self.tx.send(DialogIn::TextCommand { text: text.into() });
    }

    pub fn select_mood(&self, mood: Mood) {
        let _ = self.tx.send(DialogIn::SelectMood { mood });
    }

    pub fn toggle_task(&self, widget: WidgetId) {
        let _ = self.tx.send(DialogIn::ToggleTask { widget });
    }

    pub fn remove_widget(&self, widget: WidgetId) {
        let _ = self.tx.send(DialogIn::RemoveWidget { widget });
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(DialogIn::Shutdown);
    }
}

/// Where a transcript came from. Typed text never re-arms the microphone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Voice,
    Typed,
}

struct ActiveRecognition {
    token: RecognitionToken,
    stop: oneshot::Sender<()>,
}

/// Owns one dashboard session end to end: the dialog state machine, the
/// command executor and the single live recognition slot. Everything runs
/// on one task; ports are the only way side effects leave it.
pub struct DialogCoordinator {
    machine: DialogStateMachine,
    executor: CommandExecutor,
    speech: Arc<dyn SpeechPort>,
    notification: Arc<dyn NotificationPort>,
    tx_in: UnboundedSender<DialogIn>,
    recognition: Option<ActiveRecognition>,
    token_seq: u64,
}

impl DialogCoordinator {
    /// Spawns the session task and returns its handle.
    pub fn spawn(
        render: Arc<dyn RenderPort>,
        speech: Arc<dyn SpeechPort>,
        geo: Arc<dyn GeoPort>,
        notification: Arc<dyn NotificationPort>,
    ) -> DialogHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = Self::new(render, speech, geo, notification, tx.clone());
        tokio::spawn(async move { coordinator.run(rx).await });
        DialogHandle { tx }
    }

    fn new(
        render: Arc<dyn RenderPort>,
        speech: Arc<dyn SpeechPort>,
        geo: Arc<dyn GeoPort>,
        notification: Arc<dyn NotificationPort>,
        tx_in: UnboundedSender<DialogIn>,
    ) -> Self {
        let executor = CommandExecutor::new(
            render,
            Arc::clone(&speech),
            geo,
            Arc::clone(&notification),
            TimerRegistry::new(),
            tx_in.clone(),
        );
        Self {
            machine: DialogStateMachine::new(),
            executor,
            speech,
            notification,
            tx_in,
            recognition: None,
            token_seq: 0,
        }
    }

    async fn run(mut self, mut rx: UnboundedReceiver<DialogIn>) {
        let cfg = config::dashboard_config();
        if cfg.seed_sample_notes {
            self.executor.seed_sample_notes();
        }
        if cfg.welcome_notification {
            self.executor.notify_welcome();
        }
        log::info!("[dialog] session {} started", self.executor.session().id);

        let mut stats_tick = time::interval(cfg.stats_tick);
        stats_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                // First tick fires immediately and paints the initial stats.
                _ = stats_tick.tick() => {
                    self.executor.push_stats().await;
                }
                maybe = rx.recv() => {
                    let Some(ev) = maybe else { break; };
                    if !self.handle(ev).await {
                        break;
                    }
                }
            }
        }

        self.cancel_recognition();
        self.executor.stop_timers();
        log::info!("[dialog] session {} closed", self.executor.session().id);
    }

    async fn handle(&mut self, ev: DialogIn) -> bool {
        match ev {
            DialogIn::StartRecognition => self.start_recognition(),
            DialogIn::StopRecognition => self.stop_recognition(),
            DialogIn::TextCommand { text } => self.handle_text(text).await,
            DialogIn::SelectMood { mood } => {
                self.executor.play_mood_music(mood).await;
                self.executor.push_stats().await;
            }
            DialogIn::ToggleTask { widget } => self.executor.toggle_task(widget).await,
            DialogIn::RemoveWidget { widget } => self.executor.remove_widget(widget).await,
            DialogIn::RecognitionDone { token, result } => {
                self.recognition_done(token, result).await
            }
            DialogIn::TimerTick {
                widget,
                remaining_seconds,
            } => {
                self.executor.handle_timer_tick(widget, remaining_seconds).await
            }
            DialogIn::TimerExpired { widget } => self.executor.handle_timer_expired(widget).await,
            DialogIn::PositionResolved { widget, result } => {
                self.executor.handle_position(widget, result).await
            }
            DialogIn::Shutdown => return false,
        }
        true
    }

    fn start_recognition(&mut self) {
        // A second start supersedes any live session.
        self.cancel_recognition();
        self.begin_listening();
        self.transition(DialogSignal::RecognitionStarted);
    }

    fn stop_recognition(&mut self) {
        if !self.cancel_recognition() {
            return;
        }
        self.notify(
            "Voice Recognition Stopped",
            "Listening was cancelled before a command was captured.",
            Severity::Info,
        );
        self.transition(DialogSignal::Reset);
    }

    async fn handle_text(&mut self, text: String) {
        // A typed command supersedes any live microphone session.
        self.cancel_recognition();
        self.route_transcript(Transcript::new(text), Origin::Typed).await;
    }

    /// Arms a fresh recognition session. A completion from a superseded
    /// session is rejected by the token check even when it raced past the
    /// cancel.
    fn begin_listening(&mut self) {
        self.token_seq += 1;
        let token = RecognitionToken::new(self.token_seq);
        let (stop_tx, mut stop_rx) = oneshot::channel();
        self.recognition = Some(ActiveRecognition {
            token,
            stop: stop_tx,
        });
        log::debug!("[dialog] recognition {token} listening");
        let speech = Arc::clone(&self.speech);
        let tx = self.tx_in.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = speech.recognize_once() => {
                    let _ = tx.send(DialogIn::RecognitionDone { token, result });
                }
                _ = &mut stop_rx => {
                    log::debug!("[dialog] recognition {token} cancelled");
                }
            }
        });
    }

    fn cancel_recognition(&mut self) -> bool {
        let Some(active) = self.recognition.take() else {
            return false;
        };
        let _ = active.stop.send(());
        log::debug!("[dialog] recognition {} stopped", active.token);
        true
    }

    async fn recognition_done(
        &mut self,
        token: RecognitionToken,
        result: Result<Transcript, RecognitionError>,
    ) {
        match &self.recognition {
            Some(active) if active.token == token => {}
            _ => {
                log::debug!("[dialog] stale recognition {token} dropped");
                return;
            }
        }
        self.recognition = None;
        match result {
            Ok(transcript) => self.route_transcript(transcript, Origin::Voice).await,
            Err(err) => self.recognition_failed(err).await,
        }
    }

    async fn route_transcript(&mut self, transcript: Transcript, origin: Origin) {
        if transcript.is_empty() {
            log::debug!("[dialog] empty transcript ignored");
            return;
        }
        match self.machine.state() {
            DialogState::AwaitingMood => self.dispatch_mood(transcript).await,
            _ => self.dispatch_command(transcript, origin).await,
        }
    }

    async fn dispatch_command(&mut self, transcript: Transcript, origin: Origin) {
        let raw = transcript.as_str().to_string();
        log::info!("[dialog] command: {raw}");
        let intent = intent::match_transcript(&raw);
        match self.executor.execute(intent, &raw).await {
            Dispatch::MoodQuestionOpened => self.open_mood_question(origin),
            Dispatch::Settled => self.transition(DialogSignal::CommandDispatched),
        }
    }

    fn open_mood_question(&mut self, origin: Origin) {
        if origin == Origin::Voice {
            self.begin_listening();
        }
        self.transition(DialogSignal::MoodQuestionOpened);
    }

    async fn dispatch_mood(&mut self, transcript: Transcript) {
        let answer = transcript.as_str().to_string();
        log::info!("[dialog] mood answer: {answer}");
        let detected = mood::classify(&answer, MoodSource::Utterance);
        self.executor.play_mood_music(detected).await;
        self.executor.push_stats().await;
        self.transition(DialogSignal::MoodDispatched);
    }

    async fn recognition_failed(&mut self, err: RecognitionError) {
        log::warn!("[dialog] recognition failed: {err}");
        if self.machine.state() == DialogState::AwaitingMood {
            self.speech
                .speak("Sorry, I couldn't catch that. Please try again.".to_string())
                .await;
        }
        match err {
            RecognitionError::NotSupported => self.notify(
                "Speech Recognition Unavailable",
                "Voice recognition is not available on this platform.",
                Severity::Error,
            ),
            RecognitionError::PermissionDenied | RecognitionError::NoMatch => self.notify(
                "Voice Recognition Error",
                "Please try again or check microphone permissions",
                Severity::Error,
            ),
            RecognitionError::Aborted => self.notify(
                "Voice Recognition Stopped",
                "Listening was cancelled before a command was captured.",
                Severity::Info,
            ),
        }
        self.transition(DialogSignal::RecognitionFailed);
    }

    fn transition(&mut self, signal: DialogSignal) {
        let commands = self.machine.process(signal);
        if commands.is_empty() {
            return;
        }
        for command in &commands {
            let DialogCommand::Transition(next) = command;
            log::debug!("[dialog] state -> {next:?}");
        }
        self.machine.apply(&commands);
    }

    fn notify(&self, title: &str, subtitle: &str, severity: Severity) {
        let fut = self
            .notification
            .show(title.to_string(), subtitle.to_string(), severity);
        let label = title.to_string();
        tokio::spawn(async move {
            if let Err(err) = fut.await {
                log::warn!("[dialog] notification \"{label}\" failed: {err}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::shared::entities::{LedgerEntry, StatsSnapshot, WidgetKind, WidgetPayload};
    use crate::shared::error::GeoError;
    use crate::shared::ports::geo::GeoFuture;
    use crate::shared::ports::notification::NotificationFuture;
    use crate::shared::ports::render::RenderFuture;
    use crate::shared::ports::speech::SpeechFuture;

    use super::*;

    #[derive(Default)]
    struct RecordingRender {
        created: Mutex<Vec<(WidgetId, WidgetKind, WidgetPayload)>>,
        updated: Mutex<Vec<(WidgetId, WidgetPayload)>>,
    }

    impl RenderPort for RecordingRender {
        fn create_widget(
            &self,
            id: WidgetId,
            kind: WidgetKind,
            payload: WidgetPayload,
        ) -> RenderFuture {
            self.created.lock().expect("lock").push((id, kind, payload));
            Box::pin(async {})
        }

        fn update_widget(&self, id: WidgetId, payload: WidgetPayload) -> RenderFuture {
            self.updated.lock().expect("lock").push((id, payload));
            Box::pin(async {})
        }

        fn remove_widget(&self, _id: WidgetId) -> RenderFuture {
            Box::pin(async {})
        }

        fn render_stats(&self, _stats: StatsSnapshot) -> RenderFuture {
            Box::pin(async {})
        }

        fn render_history(&self, _entries: Vec<LedgerEntry>) -> RenderFuture {
            Box::pin(async {})
        }
    }

    struct PendingSpeech;

    impl SpeechPort for PendingSpeech {
        fn recognize_once(&self) -> SpeechFuture<Result<Transcript, RecognitionError>> {
            Box::pin(std::future::pending())
        }

        fn speak(&self, _text: String) -> SpeechFuture<()> {
            Box::pin(async {})
        }
    }

    /// First session never resolves; every later one hears "show clock".
    #[derive(Default)]
    struct RetrySpeech {
        calls: Mutex<u32>,
    }

    impl SpeechPort for RetrySpeech {
        fn recognize_once(&self) -> SpeechFuture<Result<Transcript, RecognitionError>> {
            let mut calls = self.calls.lock().expect("lock");
            *calls += 1;
            if *calls == 1 {
                Box::pin(std::future::pending())
            } else {
                Box::pin(async { Ok(Transcript::new("show clock")) })
            }
        }

        fn speak(&self, _text: String) -> SpeechFuture<()> {
            Box::pin(async {})
        }
    }

    #[derive(Default)]
    struct ScriptedSpeech {
        script: Mutex<VecDeque<Result<Transcript, RecognitionError>>>,
        spoken: Mutex<Vec<String>>,
    }

    impl ScriptedSpeech {
        fn new(lines: Vec<Result<Transcript, RecognitionError>>) -> Self {
            Self {
                script: Mutex::new(lines.into()),
                spoken: Mutex::new(Vec::new()),
            }
        }
    }

    impl SpeechPort for ScriptedSpeech {
        fn recognize_once(&self) -> SpeechFuture<Result<Transcript, RecognitionError>> {
            let next = self
                .script
                .lock()
                .expect("lock")
                .pop_front()
                .unwrap_or(Err(RecognitionError::NoMatch));
            Box::pin(async move { next })
        }

        fn speak(&self, text: String) -> SpeechFuture<()> {
            self.spoken.lock().expect("lock").push(text);
            Box::pin(async {})
        }
    }

    struct DeniedGeo;

    impl GeoPort for DeniedGeo {
        fn current_position(&self) -> GeoFuture {
            Box::pin(async { Err(GeoError::Denied) })
        }
    }

    #[derive(Default)]
    struct QuietNotifier {
        shown: Mutex<Vec<(String, String, Severity)>>,
    }

    impl NotificationPort for QuietNotifier {
        fn show(&self, title: String, subtitle: String, severity: Severity) -> NotificationFuture {
            self.shown
                .lock()
                .expect("lock")
                .push((title, subtitle, severity));
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn stale_recognition_result_is_dropped() {
        let render = Arc::new(RecordingRender::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut c = DialogCoordinator::new(
            render.clone(),
            Arc::new(PendingSpeech),
            Arc::new(DeniedGeo),
            Arc::new(QuietNotifier::default()),
            tx,
        );

        c.handle(DialogIn::StartRecognition).await;
        c.handle(DialogIn::StartRecognition).await;

        c.handle(DialogIn::RecognitionDone {
            token: RecognitionToken::new(1),
            result: Ok(Transcript::new("show weather")),
        })
        .await;
        assert!(render.created.lock().expect("lock").is_empty());

        c.handle(DialogIn::RecognitionDone {
            token: RecognitionToken::new(2),
            result: Ok(Transcript::new("show weather")),
        })
        .await;
        assert_eq!(render.created.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn second_start_supersedes_the_live_session() {
        let render = Arc::new(RecordingRender::default());
        let speech = Arc::new(RetrySpeech::default());
        let handle = DialogCoordinator::spawn(
            render.clone(),
            speech.clone(),
            Arc::new(DeniedGeo),
            Arc::new(QuietNotifier::default()),
        );

        handle.start_recognition();
        time::sleep(Duration::from_millis(50)).await;
        handle.start_recognition();
        time::sleep(Duration::from_millis(200)).await;

        assert_eq!(*speech.calls.lock().expect("lock"), 2);
        let created = render.created.lock().expect("lock");
        assert!(created.iter().any(|(_, kind, _)| *kind == WidgetKind::Clock));
        drop(created);
        handle.shutdown();
    }

    #[tokio::test]
    async fn voice_mood_question_routes_the_answer() {
        let render = Arc::new(RecordingRender::default());
        let speech = Arc::new(ScriptedSpeech::new(vec![
            Ok(Transcript::new("ask my mood")),
            Ok(Transcript::new("happy")),
        ]));
        let handle = DialogCoordinator::spawn(
            render.clone(),
            speech.clone(),
            Arc::new(DeniedGeo),
            Arc::new(QuietNotifier::default()),
        );

        handle.start_recognition();
        time::sleep(Duration::from_millis(200)).await;

        let created = render.created.lock().expect("lock");
        let music = created
            .iter()
            .find(|(_, kind, _)| *kind == WidgetKind::Music)
            .expect("music widget");
        assert!(matches!(
            &music.2,
            WidgetPayload::Music { mood: Mood::Happy, .. }
        ));
        drop(created);

        let spoken = speech.spoken.lock().expect("lock");
        assert!(spoken.iter().any(|l| l.contains("How are you feeling")));
        assert!(spoken.iter().any(|l| l.contains("upbeat")));
        drop(spoken);
        handle.shutdown();
    }

    #[tokio::test]
    async fn typed_text_answers_an_open_mood_question() {
        let render = Arc::new(RecordingRender::default());
        let speech = Arc::new(ScriptedSpeech::default());
        let handle = DialogCoordinator::spawn(
            render.clone(),
            speech.clone(),
            Arc::new(DeniedGeo),
            Arc::new(QuietNotifier::default()),
        );

        handle.submit_text("detect mood");
        handle.submit_text("angry");
        time::sleep(Duration::from_millis(200)).await;

        let created = render.created.lock().expect("lock");
        let music = created
            .iter()
            .find(|(_, kind, _)| *kind == WidgetKind::Music)
            .expect("music widget");
        assert!(matches!(
            &music.2,
            WidgetPayload::Music { mood: Mood::Angry, .. }
        ));
        drop(created);
        handle.shutdown();
    }

    #[tokio::test]
    async fn recognition_failure_notifies_and_recovers() {
        let render = Arc::new(RecordingRender::default());
        let speech = Arc::new(ScriptedSpeech::new(vec![Err(
            RecognitionError::PermissionDenied,
        )]));
        let notifier = Arc::new(QuietNotifier::default());
        let handle = DialogCoordinator::spawn(
            render.clone(),
            speech.clone(),
            Arc::new(DeniedGeo),
            notifier.clone(),
        );

        handle.start_recognition();
        time::sleep(Duration::from_millis(200)).await;

        let shown = notifier.shown.lock().expect("lock");
        assert!(shown
            .iter()
            .any(|(title, _, severity)| title == "Voice Recognition Error"
                && *severity == Severity::Error));
        drop(shown);

        // The dialog is back in idle and accepts the next command.
        handle.submit_text("show clock");
        time::sleep(Duration::from_millis(200)).await;
        let created = render.created.lock().expect("lock");
        assert!(created
            .iter()
            .any(|(_, kind, _)| *kind == WidgetKind::Clock));
        drop(created);
        handle.shutdown();
    }
}
