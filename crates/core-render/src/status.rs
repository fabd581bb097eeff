//! Status bar and message bar text.
//!
//! Status bar layout (exactly `width` characters):
//! `<name> - <N> lines[ (modified)]` left aligned, then
//! `<filetype> | <line>/<N>` right aligned when it fits in the remaining
//! space, padded with spaces otherwise.

use core_state::EditorState;
use std::time::Instant;

const NAME_MAX: usize = 20;
const NO_NAME: &str = "[No Name]";
const NO_FILETYPE: &str = "no ft";

pub fn status_bar(state: &EditorState, width: usize) -> String {
    let name: String = match state.file_name() {
        Some(p) => p.to_string_lossy().chars().take(NAME_MAX).collect(),
        None => NO_NAME.to_string(),
    };
    let count = state.buffer.line_count();
    let modified = if state.buffer.is_dirty() { " (modified)" } else { "" };
    let left = format!("{name} - {count} lines{modified}");
    let right = format!(
        "{} | {}/{}",
        state.buffer.profile().map_or(NO_FILETYPE, |p| p.filetype),
        state.cursor.cy + 1,
        count
    );

    let mut out: String = left.chars().take(width).collect();
    let mut len = out.chars().count();
    let rlen = right.chars().count();
    while len < width {
        if width - len == rlen {
            out.push_str(&right);
            break;
        }
        out.push(' ');
        len += 1;
    }
    out
}

/// The live status message truncated to `width`, or empty once expired.
pub fn message_bar(state: &EditorState, width: usize, now: Instant) -> String {
    state
        .status_text_at(now)
        .map(|t| t.chars().take(width).collect())
        .unwrap_or_default()
}
