//! Editor commands: key dispatch, prompt, search, file load/save.

mod dispatcher;
mod error;
pub mod io_ops;
mod prompt;
pub mod search;

pub use dispatcher::{DispatchResult, dispatch, find, save};
pub use error::EditorError;
pub use prompt::{PromptIo, prompt};
pub use search::{Direction, Match, SearchState, find_next};

/// Status line shown at startup.
pub fn help_message(bindings: &core_events::KeyBindings) -> String {
    use core_events::Command;
    format!(
        "HELP: {} = save | {} = quit | {} = find",
        bindings.chord(Command::Save),
        bindings.chord(Command::Quit),
        bindings.chord(Command::Find),
    )
}
