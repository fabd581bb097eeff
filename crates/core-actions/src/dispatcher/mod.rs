//! Dispatcher applying one logical [`Key`] to the editor state.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `edit`    - text mutation (insert/newline/backspace/delete)
//! * `command` - quit guard, save, find
//!
//! Every key other than quit re-arms the quit guard after it is applied.

use crate::PromptIo;
use anyhow::Result;
use core_events::{Key, ctrl};
use core_state::EditorState;
use tracing::trace;

mod command;
mod edit;
mod motion;

pub use command::{find, save};

/// Result of dispatching a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub quit: bool,
}

impl DispatchResult {
    pub fn proceed() -> Self {
        Self { quit: false }
    }
    pub fn quit() -> Self {
        Self { quit: true }
    }
}

/// Apply `key` to `state`. `io` is used by commands that open a prompt.
pub fn dispatch<P: PromptIo + ?Sized>(
    key: Key,
    state: &mut EditorState,
    io: &mut P,
) -> Result<DispatchResult> {
    trace!(target: "runtime", ?key, "dispatch");
    match key {
        Key::Quit => return Ok(command::quit(state)),
        Key::Enter => edit::insert_newline(state),
        Key::Save => command::save(state, io)?,
        Key::Find => command::find(state, io)?,
        Key::Home => state.cursor.cx = 0,
        Key::End => state.cursor.cx = state.current_line_len(),
        Key::Backspace => edit::delete_backward(state),
        Key::Delete => edit::delete_forward(state),
        Key::PageUp | Key::PageDown => motion::page(state, key == Key::PageUp),
        Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
            motion::step(state, key)
        }
        Key::Escape => {}
        Key::Byte(b) if b == ctrl(b'l') => {}
        Key::Byte(b) => edit::insert_char(state, b),
    }
    state.quit_guard.reset();
    Ok(DispatchResult::proceed())
}
