//! Single-line prompt shown in the message bar.

use anyhow::Result;
use core_events::Key;
use core_state::EditorState;
use tracing::debug;

/// Screen and keyboard access needed while a prompt is open.
pub trait PromptIo {
    /// Redraw the whole frame from `state`.
    fn refresh(&mut self, state: &mut EditorState) -> Result<()>;
    /// Block for the next key. `None` means input is exhausted. May adjust
    /// `state` (e.g. the view on resize) before returning.
    fn read_key(&mut self, state: &mut EditorState) -> Result<Option<Key>>;
}

/// Read a line of input. `template` has one `{}` placeholder replaced by the
/// text typed so far. `on_key` runs after every key with the current text
/// and the key that triggered it, including the final Enter/Escape.
///
/// Returns the text on Enter (ignored while empty) and `None` on Escape or
/// end of input.
pub fn prompt<P, F>(
    state: &mut EditorState,
    io: &mut P,
    template: &str,
    mut on_key: F,
) -> Result<Option<String>>
where
    P: PromptIo + ?Sized,
    F: FnMut(&mut EditorState, &str, Key),
{
    let mut input = String::new();
    loop {
        state.set_status(template.replace("{}", &input));
        io.refresh(state)?;
        let key = io.read_key(state)?.unwrap_or(Key::Escape);
        match key {
            Key::Escape => {
                state.clear_status();
                on_key(state, &input, key);
                debug!(target: "runtime", "prompt_cancelled");
                return Ok(None);
            }
            Key::Enter if !input.is_empty() => {
                state.clear_status();
                on_key(state, &input, key);
                return Ok(Some(input));
            }
            Key::Backspace | Key::Delete => {
                input.pop();
            }
            _ => {
                if let Some(b) = key.printable() {
                    input.push(char::from(b));
                }
            }
        }
        on_key(state, &input, key);
    }
}
