pub mod coordinator;
pub mod state_machine;
pub mod timers;
pub mod types;

pub use coordinator::{DialogCoordinator, DialogHandle};
pub use state_machine::{DialogCommand, DialogSignal, DialogState, DialogStateMachine};
pub use types::{DialogIn, RecognitionToken};
