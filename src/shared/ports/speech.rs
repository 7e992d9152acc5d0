use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::shared::error::RecognitionError;

pub type SpeechFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Lower-cased, trimmed recognition result. Produced once per recognition
/// attempt and consumed by exactly one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Speech capability of the surrounding platform.
///
/// `recognize_once` resolves exactly once per call, with either one
/// transcript or one error; an attempt that ends without delivering a result
/// must resolve to [`RecognitionError::NoMatch`]. `speak` queues an
/// utterance and cancels whatever was still being spoken.
pub trait SpeechPort: Send + Sync {
    fn recognize_once(&self) -> SpeechFuture<Result<Transcript, RecognitionError>>;
    fn speak(&self, text: String) -> SpeechFuture<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_normalizes_on_construction() {
        let t = Transcript::new("  Show Weather  ");
        assert_eq!(t.as_str(), "show weather");
        assert!(Transcript::new("   ").is_empty());
    }
}
