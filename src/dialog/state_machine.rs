/// Which conversational purpose the next transcript is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    AwaitingCommand,
    AwaitingMood,
}

/// Outcome of one controller step, reduced to what it means for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSignal {
    /// A recognition attempt for an ordinary command was started.
    RecognitionStarted,
    /// A transcript was dispatched through the lexical matcher.
    CommandDispatched,
    /// The mood question was asked; the next answer routes to the mood
    /// classifier.
    MoodQuestionOpened,
    /// A pending mood answer was dispatched.
    MoodDispatched,
    /// The active recognition attempt failed or ended without a result.
    RecognitionFailed,
    /// Explicit stop or shutdown.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogCommand {
    Transition(DialogState),
}

/// Pure state table for the dialog controller. `process` computes commands
/// without mutating, `apply` commits them; no-op transitions produce no
/// commands.
#[derive(Debug)]
pub struct DialogStateMachine {
    state: DialogState,
}

impl DialogStateMachine {
    pub fn new() -> Self {
        Self {
            state: DialogState::Idle,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn process(&self, signal: DialogSignal) -> Vec<DialogCommand> {
        let next = match signal {
            // A pending mood question survives a microphone restart.
            DialogSignal::RecognitionStarted => match self.state {
                DialogState::AwaitingMood => DialogState::AwaitingMood,
                _ => DialogState::AwaitingCommand,
            },
            DialogSignal::MoodQuestionOpened => DialogState::AwaitingMood,
            DialogSignal::CommandDispatched
            | DialogSignal::MoodDispatched
            | DialogSignal::RecognitionFailed
            | DialogSignal::Reset => DialogState::Idle,
        };
        if next == self.state {
            return Vec::new();
        }
        vec![DialogCommand::Transition(next)]
    }

    pub fn apply(&mut self, commands: &[DialogCommand]) {
        for command in commands {
            match command {
                DialogCommand::Transition(next) => self.state = *next,
            }
        }
    }
}

impl Default for DialogStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
