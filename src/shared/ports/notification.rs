use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::shared::error::NotificationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

pub type NotificationFuture = Pin<Box<dyn Future<Output = Result<(), NotificationError>> + Send>>;

pub trait NotificationPort: Send + Sync {
    fn show(&self, title: String, subtitle: String, severity: Severity) -> NotificationFuture;
}
