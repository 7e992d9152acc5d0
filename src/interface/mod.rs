pub mod console;
pub mod geo;
pub mod notification;

pub use console::{ConsoleNotification, ConsoleRender, ConsoleSpeech};
pub use geo::StaticGeo;
pub use notification::{NoopNotification, WebhookNotifier};
