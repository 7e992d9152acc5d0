use std::fmt;

use crate::nlu::mood::Mood;
use crate::shared::entities::WidgetId;
use crate::shared::error::{GeoError, RecognitionError};
use crate::shared::ports::geo::Coordinates;
use crate::shared::ports::speech::Transcript;

/// Identity of one recognition attempt. Strictly increasing per controller,
/// so a completion carrying an old token is recognizably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecognitionToken(u64);

impl RecognitionToken {
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for RecognitionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events consumed by the dialog controller. External surfaces send the
/// first group through [`super::DialogHandle`]; the rest are posted back by
/// tasks the controller itself spawned.
#[derive(Debug)]
pub enum DialogIn {
    StartRecognition,
    StopRecognition,
    TextCommand {
        text: String,
    },
    SelectMood {
        mood: Mood,
    },
    ToggleTask {
        widget: WidgetId,
    },
    RemoveWidget {
        widget: WidgetId,
    },
    Shutdown,
    RecognitionDone {
        token: RecognitionToken,
        result: Result<Transcript, RecognitionError>,
    },
    TimerTick {
        widget: WidgetId,
        remaining_seconds: u64,
    },
    TimerExpired {
        widget: WidgetId,
    },
    PositionResolved {
        widget: WidgetId,
        result: Result<Coordinates, GeoError>,
    },
}
