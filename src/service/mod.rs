pub mod commands;
pub mod content;
pub mod music;

pub use commands::{CommandExecutor, Dispatch};
