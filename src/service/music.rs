use crate::nlu::mood::Mood;
use crate::shared::config;

/// Playlist chosen for a mood. Ids come from config so deployments can remap
/// them without a rebuild; names and announcements are fixed copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: &'static str,
}

pub fn playlist_for(mood: Mood) -> Playlist {
    let cfg = config::playlist_config();
    let (id, name) = match mood {
        Mood::Happy => (&cfg.happy, "Happy Hits"),
        Mood::Sad => (&cfg.sad, "Sad Songs"),
        Mood::Angry => (&cfg.angry, "Rock Hard"),
        Mood::Calm => (&cfg.calm, "Chill Vibes"),
        Mood::Neutral => (&cfg.neutral, "Today's Top Hits"),
    };
    Playlist {
        id: id.clone(),
        name,
    }
}

/// Spoken line accompanying the playlist switch.
pub fn announcement(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "You sound happy! Let me play some upbeat songs.",
        Mood::Sad => "I hear you are sad. Here are some comforting songs.",
        Mood::Angry => "You seem angry. Let's play some energetic rock.",
        Mood::Calm => "You sound calm. Here's some relaxing vibes.",
        Mood::Neutral => "I couldn't detect a clear mood, so here's today's top hits.",
    }
}
