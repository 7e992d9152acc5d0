use std::sync::OnceLock;

use regex::Regex;

/// Resolved voice command. Captured payloads are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ShowWeather,
    ShowCalculator,
    ShowGps,
    ShowClock,
    ShowYouTube,
    PlayMusic,
    AskMood,
    RecommendMusic,
    CreateNote,
    AddNote(String),
    AddTask(String),
    SetTimer(u32),
    ShowNews,
    ShowQuote,
    ClearAll,
    Unrecognized(String),
}

pub const DEFAULT_TASK_TEXT: &str = "New Task";

fn timer_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"set a timer for (\d+) minutes?").expect("timer rule regex"))
}

fn add_note_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"add a note (.+)").expect("add note rule regex"))
}

fn add_task_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"add a task (.+)").expect("add task rule regex"))
}

/// Matches a normalized transcript against the command rules, first hit wins.
///
/// Rule order is part of the contract: "play music for my mood" resolves to
/// [`Intent::PlayMusic`] because the background-music rule sits above the
/// mood-recommendation rule, and a transcript that mentions both a task and
/// a timer is a task because the task rules run first.
pub fn match_transcript(raw: &str) -> Intent {
    let cmd = raw.trim().to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| cmd.contains(n));

    if has(&["show weather", "weather forecast"]) {
        return Intent::ShowWeather;
    }
    if has(&["show calculator", "calculator"]) {
        return Intent::ShowCalculator;
    }
    if has(&["show gps", "gps", "location"]) {
        return Intent::ShowGps;
    }
    if has(&["show clock", "live clock"]) {
        return Intent::ShowClock;
    }
    if has(&["show youtube", "youtube"]) {
        return Intent::ShowYouTube;
    }
    if has(&["play music", "background music"]) {
        return Intent::PlayMusic;
    }
    if has(&["ask my mood", "detect mood", "how is my mood"]) {
        return Intent::AskMood;
    }
    if has(&["recommend music", "play music for my mood"]) {
        return Intent::RecommendMusic;
    }
    if cmd.contains("create a note") {
        return Intent::CreateNote;
    }
    if let Some(caps) = add_note_rule().captures(&cmd) {
        let text = caps[1].trim();
        if !text.is_empty() {
            return Intent::AddNote(text.to_string());
        }
    }
    if let Some(caps) = add_task_rule().captures(&cmd) {
        let text = caps[1].trim();
        if !text.is_empty() {
            return Intent::AddTask(text.to_string());
        }
    }
    if cmd.contains("add a task") {
        let rest = cmd.replacen("add a task", "", 1);
        let rest = rest.trim();
        return Intent::AddTask(if rest.is_empty() {
            DEFAULT_TASK_TEXT.to_string()
        } else {
            rest.to_string()
        });
    }
    if let Some(caps) = timer_rule().captures(&cmd) {
        // Digit runs too large for u32 fall through to the remaining rules.
        if let Ok(minutes) = caps[1].parse::<u32>() {
            return Intent::SetTimer(minutes);
        }
    }
    if cmd.contains("show the news") {
        return Intent::ShowNews;
    }
    if has(&["show a random quote", "random quote"]) {
        return Intent::ShowQuote;
    }
    if cmd.contains("clear all cards") {
        return Intent::ClearAll;
    }
    Intent::Unrecognized(cmd)
}
