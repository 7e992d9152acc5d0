pub mod intent;
pub mod mood;

pub use intent::Intent;
pub use mood::{Mood, MoodSource};
