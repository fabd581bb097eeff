//! Frame assembly: an inert description of one full screen.
//!
//! Text rows are run-length encoded into [`Span`]s. A row starts in the
//! `Normal` class and a [`Span::Style`] is emitted only where the class of the
//! next printed byte differs from the current one. Control bytes become
//! [`Span::Glyph`] placeholders, drawn in inverse video by the writer, and do
//! not change the current class.

use crate::status::{message_bar, status_bar};
use core_state::EditorState;
use core_text::{Highlight, Line};
use std::time::Instant;

pub const WELCOME: &str = concat!("Kiln editor -- version ", env!("CARGO_PKG_VERSION"));

/// Marker drawn on rows past the end of the buffer.
pub const FILLER: &str = "~";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Style(Highlight),
    Text(Vec<u8>),
    Glyph(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Filler,
    Banner(String),
    Text(Vec<Span>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
    pub status_bar: String,
    pub message_bar: String,
    /// Screen position of the cursor as (column, row).
    pub cursor: (u16, u16),
}

/// Build the frame for the current state. Call [`crate::scroll`] first.
pub fn build_frame(state: &EditorState, now: Instant) -> Frame {
    let view = state.view;
    let count = state.buffer.line_count();
    let rows = (0..view.rows)
        .map(|y| {
            let file_row = y + view.row_off;
            match state.buffer.line(file_row) {
                Some(line) => Row::Text(line_spans(line, view.col_off, view.cols)),
                None if count == 0 && y == view.rows / 3 => Row::Banner(banner(view.cols)),
                None => Row::Filler,
            }
        })
        .collect();
    let cursor = (
        to_u16(state.cursor.rx.saturating_sub(view.col_off)),
        to_u16(state.cursor.cy.saturating_sub(view.row_off)),
    );
    Frame {
        rows,
        status_bar: status_bar(state, view.cols),
        message_bar: message_bar(state, view.cols, now),
        cursor,
    }
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Placeholder for a control byte.
pub fn control_glyph(b: u8) -> u8 {
    if b < 26 { b'@' + b } else { b'?' }
}

fn is_control(b: u8) -> bool {
    b < 0x20 || b == 0x7f
}

/// Spans for the visible slice `[col_off, col_off + width)` of `line`.
pub fn line_spans(line: &Line, col_off: usize, width: usize) -> Vec<Span> {
    let rendered = line.rendered();
    let start = col_off.min(rendered.len());
    let end = col_off.saturating_add(width).min(rendered.len());
    let highlight = line.highlight();

    let mut spans = Vec::new();
    let mut current = Highlight::Normal;
    let mut text: Vec<u8> = Vec::new();
    for (&b, &class) in rendered[start..end].iter().zip(&highlight[start..end]) {
        if is_control(b) {
            if !text.is_empty() {
                spans.push(Span::Text(std::mem::take(&mut text)));
            }
            spans.push(Span::Glyph(control_glyph(b)));
            continue;
        }
        if class != current {
            if !text.is_empty() {
                spans.push(Span::Text(std::mem::take(&mut text)));
            }
            spans.push(Span::Style(class));
            current = class;
        }
        text.push(b);
    }
    if !text.is_empty() {
        spans.push(Span::Text(text));
    }
    spans
}

fn banner(cols: usize) -> String {
    let text: String = WELCOME.chars().take(cols).collect();
    let mut padding = (cols - text.len()) / 2;
    let mut row = String::with_capacity(cols);
    if padding > 0 {
        row.push_str(FILLER);
        padding -= 1;
    }
    row.extend(std::iter::repeat_n(' ', padding));
    row.push_str(&text);
    row
}
