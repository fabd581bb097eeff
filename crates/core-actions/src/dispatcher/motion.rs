//! Cursor movement.
//!
//! Horizontal steps wrap across line boundaries but never onto the append
//! position; vertical steps clamp `cx` to the destination line.

use core_events::Key;
use core_state::EditorState;

pub(crate) fn step(state: &mut EditorState, key: Key) {
    let count = state.buffer.line_count();
    let c = &mut state.cursor;
    match key {
        Key::ArrowLeft => {
            if c.cx > 0 {
                c.cx -= 1;
            } else if c.cy > 0 {
                c.cy -= 1;
                c.cx = state.buffer.line_len(c.cy);
            }
        }
        Key::ArrowRight => {
            if c.cy < count {
                if c.cx < state.buffer.line_len(c.cy) {
                    c.cx += 1;
                } else if c.cy + 1 < count {
                    c.cy += 1;
                    c.cx = 0;
                }
            }
        }
        Key::ArrowUp => c.cy = c.cy.saturating_sub(1),
        Key::ArrowDown => {
            if c.cy + 1 < count {
                c.cy += 1;
            }
        }
        _ => {}
    }
    state.clamp_cursor();
}

/// Jump to the top (or bottom) visible row, then move a full screen.
pub(crate) fn page(state: &mut EditorState, up: bool) {
    let rows = state.view.rows;
    let count = state.buffer.line_count();
    if up {
        state.cursor.cy = state.view.row_off.min(count);
    } else {
        state.cursor.cy = (state.view.row_off + rows.saturating_sub(1)).min(count);
    }
    let key = if up { Key::ArrowUp } else { Key::ArrowDown };
    for _ in 0..rows {
        step(state, key);
    }
    state.clamp_cursor();
}
