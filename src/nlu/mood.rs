use serde::Serialize;

/// Mood inferred from free text. `Neutral` doubles as the no-signal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Calm,
    Neutral,
}

/// Which classification strategy to apply. The two strategies are deliberately
/// different and must not be merged: the note corpus is scored by exact-token
/// counts with a priority tie-break, a single spoken answer by substring
/// containment with first-match resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodSource {
    Notes,
    Utterance,
}

const HAPPY_TOKENS: &[&str] = &[
    "happy",
    "joy",
    "excited",
    "glad",
    "great",
    "wonderful",
    "delighted",
    "pleased",
    "cheerful",
    "elated",
];
const SAD_TOKENS: &[&str] = &[
    "sad",
    "unhappy",
    "depressed",
    "down",
    "lonely",
    "miserable",
    "tear",
    "sorrow",
    "tired",
    "blue",
    "gloom",
];
const ANGRY_TOKENS: &[&str] = &[
    "angry",
    "mad",
    "furious",
    "annoyed",
    "irritated",
    "frustrated",
    "rage",
    "resentful",
];
const CALM_TOKENS: &[&str] = &["calm", "relax", "peace", "tranquil", "serene", "chill", "rested"];

// Checked in this order; the first mood with any contained keyword wins.
const UTTERANCE_KEYWORDS: [(Mood, &[&str]); 4] = [
    (Mood::Happy, &["happy", "joyful", "excited", "great"]),
    (Mood::Sad, &["sad", "unhappy", "down", "depressed"]),
    (Mood::Calm, &["calm", "relaxed", "peaceful", "chill"]),
    (Mood::Angry, &["angry", "mad", "furious", "frustrated"]),
];

pub fn classify(text: &str, source: MoodSource) -> Mood {
    match source {
        MoodSource::Notes => classify_notes(text),
        MoodSource::Utterance => classify_utterance(text),
    }
}

/// Token-exact keyword counting over the accumulated note corpus. The mood
/// with the strictly highest count wins; ties fall to the fixed priority
/// happy > calm > sad > angry. Zero matches overall is `Neutral`.
pub fn classify_notes(text: &str) -> Mood {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    // Already ordered by tie-break priority.
    let scores = [
        (Mood::Happy, token_hits(&tokens, HAPPY_TOKENS)),
        (Mood::Calm, token_hits(&tokens, CALM_TOKENS)),
        (Mood::Sad, token_hits(&tokens, SAD_TOKENS)),
        (Mood::Angry, token_hits(&tokens, ANGRY_TOKENS)),
    ];
    if scores.iter().all(|(_, count)| *count == 0) {
        return Mood::Neutral;
    }

    let mut best = (Mood::Neutral, 0usize);
    for (mood, count) in scores {
        if count > best.1 {
            best = (mood, count);
        }
    }
    best.0
}

/// Substring containment over a single spoken answer, first match in the
/// fixed happy, sad, calm, angry order.
pub fn classify_utterance(text: &str) -> Mood {
    let lowered = text.to_lowercase();
    for (mood, words) in UTTERANCE_KEYWORDS {
        if words.iter().any(|w| lowered.contains(w)) {
            return mood;
        }
    }
    Mood::Neutral
}

fn token_hits(tokens: &[&str], words: &[&str]) -> usize {
    tokens.iter().filter(|t| words.contains(*t)).count()
}
