//! Quit guard, save and find.

use super::DispatchResult;
use crate::io_ops::write_buffer;
use crate::search::{FIND_PROMPT, SearchState};
use crate::{PromptIo, prompt};
use anyhow::Result;
use core_events::Command;
use core_state::{EditorState, QuitDecision};
use tracing::{info, warn};

pub const SAVE_AS_PROMPT: &str = "Save as: {} (ESC to cancel)";

pub(crate) fn quit(state: &mut EditorState) -> DispatchResult {
    match state.quit_guard.press(state.buffer.is_dirty()) {
        QuitDecision::Quit => {
            info!(target: "runtime", "quit");
            DispatchResult::quit()
        }
        QuitDecision::Warn { remaining } => {
            let chord = state.bindings.chord(Command::Quit);
            state.set_status(format!(
                "WARNING!!! File has unsaved changes. Press {chord} {remaining} more times to quit."
            ));
            DispatchResult::proceed()
        }
    }
}

/// Write the buffer to its file, asking for a name first when it has none.
/// Write failures become a status message; the dirty counter is kept.
pub fn save<P: PromptIo + ?Sized>(state: &mut EditorState, io: &mut P) -> Result<()> {
    if state.file_name.is_none() {
        match prompt(state, io, SAVE_AS_PROMPT, |_, _, _| {})? {
            Some(name) => state.set_file_name(name),
            None => {
                state.set_status("Save aborted");
                return Ok(());
            }
        }
    }
    let Some(path) = state.file_name.clone() else {
        return Ok(());
    };
    match write_buffer(&path, &state.buffer) {
        Ok(written) => {
            state.buffer.mark_clean();
            state.set_status(format!("{written} bytes written to disk"));
        }
        Err(err) => {
            let detail = err
                .io_source()
                .map_or_else(|| err.to_string(), ToString::to_string);
            warn!(target: "io", %err, "save_failed");
            state.set_status(format!("Can't save! I/O error: {detail}"));
        }
    }
    Ok(())
}

/// Interactive search. Cancelling puts the cursor and scroll offsets back
/// where they were when the prompt opened.
pub fn find<P: PromptIo + ?Sized>(state: &mut EditorState, io: &mut P) -> Result<()> {
    let saved_cursor = state.cursor;
    let (saved_row_off, saved_col_off) = (state.view.row_off, state.view.col_off);
    let mut search = SearchState::default();
    let query = prompt(state, io, FIND_PROMPT, |st, q, k| search.on_key(st, q, k))?;
    if query.is_none() {
        state.cursor = saved_cursor;
        state.view.row_off = saved_row_off;
        state.view.col_off = saved_col_off;
    }
    Ok(())
}
