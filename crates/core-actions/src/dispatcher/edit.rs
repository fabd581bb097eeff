//! Text edits at the cursor.

use core_state::EditorState;
use tracing::trace;

pub(crate) fn insert_char(state: &mut EditorState, byte: u8) {
    let count = state.buffer.line_count();
    if state.cursor.cy >= count {
        state.cursor.cy = state.buffer.insert_line(count, b"");
    }
    state
        .buffer
        .insert_char(state.cursor.cy, state.cursor.cx, byte);
    state.cursor.cx += 1;
    state.clamp_cursor();
}

/// Split at the cursor. At column 0 an empty line is inserted above, so the
/// cursor ends on the line it was on, one row down.
pub(crate) fn insert_newline(state: &mut EditorState) {
    let (cx, cy) = (state.cursor.cx, state.cursor.cy);
    if cx == 0 {
        state.buffer.insert_line(cy, b"");
    } else {
        state.buffer.split_line(cy, cx);
    }
    state.cursor.cy = cy + 1;
    state.cursor.cx = 0;
    trace!(target: "text", line = cy, col = cx, "newline");
}

/// Delete the byte left of the cursor, joining onto the previous line at
/// column 0.
pub(crate) fn delete_backward(state: &mut EditorState) {
    let (cx, cy) = (state.cursor.cx, state.cursor.cy);
    if cy >= state.buffer.line_count() || (cx == 0 && cy == 0) {
        return;
    }
    if cx > 0 {
        state.buffer.delete_char(cy, cx - 1);
        state.cursor.cx -= 1;
    } else if let Some(col) = state.buffer.join_with_previous(cy) {
        state.cursor.cy = cy - 1;
        state.cursor.cx = col;
    }
}

/// Delete the byte under the cursor, joining the next line at end of line.
pub(crate) fn delete_forward(state: &mut EditorState) {
    let (cx, cy) = (state.cursor.cx, state.cursor.cy);
    if cy >= state.buffer.line_count() {
        return;
    }
    if cx < state.buffer.line_len(cy) {
        state.buffer.delete_char(cy, cx);
    } else {
        state.buffer.join_with_previous(cy + 1);
    }
}
