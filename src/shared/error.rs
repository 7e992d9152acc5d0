use thiserror::Error;

/// Failure modes of a single recognition attempt. `Aborted` is the expected
/// outcome of a controller-initiated cancellation and is never surfaced as a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("speech recognition not supported")]
    NotSupported,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("no speech detected")]
    NoMatch,
    #[error("recognition aborted")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("location access denied")]
    Denied,
    #[error("position lookup timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification delivery failed: {0}")]
    Failed(String),
}
