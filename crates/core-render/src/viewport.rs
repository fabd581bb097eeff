//! Scroll adjustment run before every frame.
//!
//! Guarantees after [`scroll`]:
//! * `cursor.rx` is the rendered column of `cursor.cx` (zero on the append
//!   position).
//! * `row_off <= cy < row_off + rows` and `col_off <= rx < col_off + cols`
//!   whenever the view has at least one row/column.

use core_state::EditorState;
use tracing::trace;

pub fn scroll(state: &mut EditorState) {
    state.cursor.rx = state.cursor_rx();
    let (cy, rx) = (state.cursor.cy, state.cursor.rx);
    let view = &mut state.view;
    let before = (view.row_off, view.col_off);

    if cy < view.row_off {
        view.row_off = cy;
    }
    if view.rows > 0 && cy >= view.row_off + view.rows {
        view.row_off = cy + 1 - view.rows;
    }
    if rx < view.col_off {
        view.col_off = rx;
    }
    if view.cols > 0 && rx >= view.col_off + view.cols {
        view.col_off = rx + 1 - view.cols;
    }

    if before != (view.row_off, view.col_off) {
        trace!(target: "render", row_off = view.row_off, col_off = view.col_off, "scrolled");
    }
}
