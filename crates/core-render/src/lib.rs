//! Screen rendering: scroll adjustment, frame assembly, emission.
//!
//! One refresh is three steps:
//! 1. [`scroll`] recomputes the rendered cursor column and moves the scroll
//!    offsets so the cursor is visible.
//! 2. [`build_frame`] turns the visible slice of the buffer plus the status
//!    and message bars into an inert [`Frame`].
//! 3. [`write_frame`] emits it through crossterm and flushes once.
//!
//! Frames are always full repaints.

pub mod frame;
pub mod status;
pub mod theme;
mod viewport;
mod writer;

pub use frame::{FILLER, Frame, Row, Span, WELCOME, build_frame, control_glyph, line_spans};
pub use viewport::scroll;
pub use writer::write_frame;

use anyhow::Result;
use core_state::EditorState;
use std::io::Write;
use std::time::Instant;
use tracing::trace;

/// Scroll, build and write one frame.
pub fn refresh<W: Write>(out: &mut W, state: &mut EditorState) -> Result<()> {
    scroll(state);
    let frame = build_frame(state, Instant::now());
    trace!(target: "render", rows = frame.rows.len(), cursor = ?frame.cursor, "frame");
    write_frame(out, &frame)
}
