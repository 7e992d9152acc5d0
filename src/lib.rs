pub mod dialog;
pub mod interface;
pub mod logging;
pub mod nlu;
pub mod service;
pub mod shared;

pub use dialog::{DialogCoordinator, DialogHandle};
pub use nlu::{Intent, Mood, MoodSource};
pub use service::{CommandExecutor, Dispatch};
pub use shared::{config, entities, error, ports};
