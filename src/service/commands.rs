use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::dialog::timers::TimerRegistry;
use crate::dialog::types::DialogIn;
use crate::nlu::intent::Intent;
use crate::nlu::mood::{self, Mood, MoodSource};
use crate::service::{content, music};
use crate::shared::entities::{DashboardSession, WidgetId, WidgetKind, WidgetPayload};
use crate::shared::error::GeoError;
use crate::shared::ports::geo::{Coordinates, GeoPort};
use crate::shared::ports::notification::{NotificationPort, Severity};
use crate::shared::ports::render::RenderPort;
use crate::shared::ports::speech::SpeechPort;

const MOOD_PROMPT: &str = "How are you feeling right now? You can say: happy, sad, calm, or angry.";

const SAMPLE_NOTES: [&str; 2] = ["I feel very happy today", "Completed a big milestone at work"];

/// How a dispatched intent leaves the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Settled,
    MoodQuestionOpened,
}

/// Executes resolved intents against the session and the outbound ports.
/// One executor per dialog controller; all methods run on the controller
/// task, so session state needs no locking.
pub struct CommandExecutor {
    session: DashboardSession,
    timers: TimerRegistry,
    render: Arc<dyn RenderPort>,
    speech: Arc<dyn SpeechPort>,
    geo: Arc<dyn GeoPort>,
    notification: Arc<dyn NotificationPort>,
    tx_in: UnboundedSender<DialogIn>,
}

impl CommandExecutor {
    pub fn new(
        render: Arc<dyn RenderPort>,
        speech: Arc<dyn SpeechPort>,
        geo: Arc<dyn GeoPort>,
        notification: Arc<dyn NotificationPort>,
        timers: TimerRegistry,
        tx_in: UnboundedSender<DialogIn>,
    ) -> Self {
        Self {
            session: DashboardSession::new(),
            timers,
            render,
            speech,
            geo,
            notification,
            tx_in,
        }
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    /// Runs one intent to completion and reports whether the dialog settled
    /// or opened the mood question.
    pub async fn execute(&mut self, intent: Intent, raw: &str) -> Dispatch {
        log::debug!("[command] dispatching {intent:?}");
        let mut dispatch = Dispatch::Settled;
        match intent {
            Intent::ShowWeather => self.show_weather().await,
            Intent::ShowCalculator => self.show_calculator().await,
            Intent::ShowGps => self.show_gps().await,
            Intent::ShowClock => self.show_clock().await,
            Intent::ShowYouTube => self.show_youtube().await,
            Intent::PlayMusic => self.play_music().await,
            Intent::AskMood => {
                self.ask_mood(raw).await;
                dispatch = Dispatch::MoodQuestionOpened;
            }
            Intent::RecommendMusic => self.recommend_music(raw).await,
            Intent::CreateNote => self.create_note().await,
            Intent::AddNote(text) => self.add_note(text).await,
            Intent::AddTask(text) => self.add_task(text).await,
            Intent::SetTimer(minutes) => self.set_timer(minutes).await,
            Intent::ShowNews => self.show_news().await,
            Intent::ShowQuote => self.show_quote().await,
            Intent::ClearAll => self.clear_all().await,
            Intent::Unrecognized(text) => self.unrecognized(&text).await,
        }
        self.push_stats().await;
        dispatch
    }

    /// Switches the music widget to the playlist for `mood` and announces
    /// the pick. Used by the mood answer path, the notes-based
    /// recommendation and the external mood selection.
    pub async fn play_mood_music(&mut self, mood: Mood) {
        let playlist = music::playlist_for(mood);
        log::info!("[command] mood {mood:?} -> playlist {}", playlist.name);
        self.speech
            .speak(music::announcement(mood).to_string())
            .await;
        self.upsert_widget(
            WidgetKind::Music,
            WidgetPayload::Music {
                playlist_id: playlist.id,
                playlist_name: playlist.name.to_string(),
                mood,
            },
        )
        .await;
    }

    pub async fn remove_widget(&mut self, widget: WidgetId) {
        let Some(kind) = self.session.release_widget(&widget) else {
            return;
        };
        if kind == WidgetKind::Timer {
            self.timers.stop(&widget);
        }
        log::debug!("[command] widget {widget} removed");
        self.render.remove_widget(widget).await;
        self.push_stats().await;
    }

    pub async fn toggle_task(&mut self, widget: WidgetId) {
        let Some((text, completed)) = self.session.toggle_task(&widget) else {
            log::debug!("[command] toggle for unknown task {widget}");
            return;
        };
        self.render
            .update_widget(
                widget,
                WidgetPayload::Task {
                    text: text.clone(),
                    completed,
                },
            )
            .await;
        if completed {
            self.notify(
                "Task Completed! 🎉",
                format!("\"{text}\" has been marked as done."),
                Severity::Success,
            );
        }
        self.push_stats().await;
    }

    pub async fn handle_timer_tick(&mut self, widget: WidgetId, remaining_seconds: u64) {
        // A tick in flight while the timer is being stopped is dropped here.
        let Some(minutes) = self.timers.minutes(&widget) else {
            return;
        };
        self.render
            .update_widget(
                widget,
                WidgetPayload::TimerRunning {
                    remaining_seconds,
                    minutes,
                },
            )
            .await;
    }

    pub async fn handle_timer_expired(&mut self, widget: WidgetId) {
        let Some(minutes) = self.timers.minutes(&widget) else {
            return;
        };
        self.timers.release(&widget);
        log::info!("[timer {widget}] expired after {minutes} minute(s)");
        self.render
            .update_widget(widget, WidgetPayload::TimerExpired { minutes })
            .await;
        self.notify(
            "Timer Expired! ⏰",
            format!("Your {minutes}-minute timer has finished."),
            Severity::Warning,
        );
    }

    pub async fn handle_position(&mut self, widget: WidgetId, result: Result<Coordinates, GeoError>) {
        if !self.session.has_widget(&widget) {
            return;
        }
        match result {
            Ok(pos) => {
                self.render
                    .update_widget(
                        widget,
                        WidgetPayload::GpsPosition {
                            latitude: pos.latitude,
                            longitude: pos.longitude,
                            accuracy_m: pos.accuracy_m,
                            altitude_m: pos.altitude_m,
                        },
                    )
                    .await;
            }
            Err(err) => {
                log::warn!("[command] position lookup failed: {err}");
                self.render
                    .update_widget(
                        widget,
                        WidgetPayload::GpsUnavailable {
                            message: err.to_string(),
                        },
                    )
                    .await;
                self.notify(
                    "Location Access Denied",
                    "Please enable location services to use GPS features".to_string(),
                    Severity::Error,
                );
            }
        }
    }

    pub async fn push_stats(&self) {
        self.render.render_stats(self.session.stats()).await;
    }

    pub fn seed_sample_notes(&mut self) {
        for text in SAMPLE_NOTES {
            self.session.append_note(text);
        }
    }

    pub fn notify_welcome(&self) {
        self.notify(
            "Welcome to VocalHub",
            "Say or type a command to begin your session".to_string(),
            Severity::Info,
        );
    }

    pub fn stop_timers(&mut self) {
        self.timers.stop_all();
    }

    async fn show_weather(&mut self) {
        let report = content::pick_weather();
        self.create_widget(WidgetKind::Weather, WidgetPayload::Weather(report))
            .await;
        self.record("show weather", "Weather Forecast").await;
    }

    async fn show_calculator(&mut self) {
        self.create_widget(WidgetKind::Calculator, WidgetPayload::Calculator)
            .await;
        self.record("show calculator", "Advanced Calculator").await;
    }

    async fn show_gps(&mut self) {
        self.create_widget(WidgetKind::Gps, WidgetPayload::GpsAcquiring)
            .await;
        // The lookup refreshes an already open card too.
        let widget = WidgetKind::Gps.widget_id();
        let geo = Arc::clone(&self.geo);
        let tx = self.tx_in.clone();
        tokio::spawn(async move {
            let result = geo.current_position().await;
            let _ = tx.send(DialogIn::PositionResolved { widget, result });
        });
        self.record("show gps", "GPS Location Services").await;
    }

    async fn show_clock(&mut self) {
        self.create_widget(WidgetKind::Clock, WidgetPayload::Clock)
            .await;
        self.record("show clock", "Live World Clock").await;
    }

    async fn show_youtube(&mut self) {
        self.create_widget(WidgetKind::YouTube, WidgetPayload::YouTube)
            .await;
        self.record("show youtube", "YouTube Player").await;
    }

    async fn play_music(&mut self) {
        let playlist = music::playlist_for(Mood::Neutral);
        self.upsert_widget(
            WidgetKind::Music,
            WidgetPayload::Music {
                playlist_id: playlist.id,
                playlist_name: playlist.name.to_string(),
                mood: Mood::Neutral,
            },
        )
        .await;
        self.record("play music", "Background Music").await;
    }

    async fn ask_mood(&mut self, raw: &str) {
        self.speech.speak(MOOD_PROMPT.to_string()).await;
        self.record(raw, "Asked Mood & Recommended Music").await;
    }

    async fn recommend_music(&mut self, raw: &str) {
        let detected = mood::classify(&self.session.note_corpus(), MoodSource::Notes);
        log::debug!("[command] detected mood from notes: {detected:?}");
        self.play_mood_music(detected).await;
        self.record(raw, "Music Recommendation Based on Notes").await;
    }

    async fn create_note(&mut self) {
        self.create_widget(WidgetKind::Note, WidgetPayload::NoteDraft)
            .await;
        self.record("create a note", "New Note Created").await;
    }

    async fn add_note(&mut self, text: String) {
        self.session.append_note(text.as_str());
        self.render_notes_list().await;
        let detected = mood::classify(&self.session.note_corpus(), MoodSource::Notes);
        log::debug!("[command] detected mood from notes: {detected:?}");
        self.play_mood_music(detected).await;
        // Spoken last: the confirmation cuts off the playlist announcement.
        self.speech.speak("Note added".to_string()).await;
        self.record(format!("add note: {text}"), "Note Added").await;
    }

    async fn add_task(&mut self, text: String) {
        if let Some(id) = self
            .create_widget(
                WidgetKind::Task,
                WidgetPayload::Task {
                    text: text.clone(),
                    completed: false,
                },
            )
            .await
        {
            self.session.add_task(id, text.as_str());
        }
        self.record(format!("add a task: {text}"), "New Task Added")
            .await;
    }

    async fn set_timer(&mut self, minutes: u32) {
        let remaining = u64::from(minutes) * 60;
        if let Some(id) = self
            .create_widget(
                WidgetKind::Timer,
                WidgetPayload::TimerRunning {
                    remaining_seconds: remaining,
                    minutes,
                },
            )
            .await
        {
            self.timers.start(id.clone(), minutes, self.tx_in.clone());
            log::info!("[timer {id}] countdown started for {minutes} minute(s)");
        }
        self.record(format!("set a timer for {minutes} minutes"), "Countdown Timer")
            .await;
    }

    async fn show_news(&mut self) {
        let headline = content::pick_headline().to_string();
        self.create_widget(WidgetKind::News, WidgetPayload::News { headline })
            .await;
        self.record("show the news", "News Headlines").await;
    }

    async fn show_quote(&mut self) {
        let (text, author) = content::pick_quote();
        self.create_widget(
            WidgetKind::Quote,
            WidgetPayload::Quote {
                text: text.to_string(),
                author: author.to_string(),
            },
        )
        .await;
        self.record("show a random quote", "Random Quote").await;
    }

    async fn clear_all(&mut self) {
        for id in self.session.widget_ids() {
            if let Some(kind) = self.session.release_widget(&id) {
                if kind == WidgetKind::Timer {
                    self.timers.stop(&id);
                }
                self.render.remove_widget(id).await;
            }
        }
        self.notify(
            "All Cards Cleared",
            "Your dashboard is now pristine and ready for new commands.".to_string(),
            Severity::Success,
        );
        self.record("clear all cards", "Cleared Dashboard").await;
    }

    async fn unrecognized(&mut self, text: &str) {
        self.notify(
            "Command Not Recognized",
            format!("\"{text}\" - Try one of the suggested commands"),
            Severity::Warning,
        );
        self.record(text, "Unrecognized Command").await;
    }

    async fn render_notes_list(&mut self) {
        let notes = self
            .session
            .notes()
            .iter()
            .map(|n| n.text.clone())
            .collect();
        self.upsert_widget(WidgetKind::NotesList, WidgetPayload::NotesList { notes })
            .await;
    }

    /// Creates a widget of `kind`, skipping render and counters when the id
    /// is already live. Returns the id only for a fresh creation.
    async fn create_widget(&mut self, kind: WidgetKind, payload: WidgetPayload) -> Option<WidgetId> {
        let id = kind.widget_id();
        if !self.session.register_widget(id.clone(), kind) {
            log::debug!("[command] widget {id} already live, create skipped");
            return None;
        }
        self.render.create_widget(id.clone(), kind, payload).await;
        Some(id)
    }

    async fn upsert_widget(&mut self, kind: WidgetKind, payload: WidgetPayload) {
        let id = kind.widget_id();
        if self.session.register_widget(id.clone(), kind) {
            self.render.create_widget(id, kind, payload).await;
        } else {
            self.render.update_widget(id, payload).await;
        }
    }

    async fn record(&mut self, command: impl Into<String>, action: &str) {
        self.session.record(command, action);
        self.render.render_history(self.session.history()).await;
    }

    fn notify(&self, title: &str, subtitle: String, severity: Severity) {
        let fut = self.notification.show(title.to_string(), subtitle, severity);
        let label = title.to_string();
        tokio::spawn(async move {
            if let Err(err) = fut.await {
                log::warn!("[command] notification \"{label}\" failed: {err}");
            }
        });
    }
}
