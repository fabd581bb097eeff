//! Incremental search over rendered lines.
//!
//! [`SearchState`] is driven by the prompt callback: each keystroke first
//! restores the previously overlaid line, then (unless the prompt is
//! finishing) looks for the query starting just past the last match, in the
//! direction chosen by the arrow keys, wrapping at both ends.

use core_events::Key;
use core_state::EditorState;
use core_text::{Buffer, Highlight};
use tracing::{debug, trace};

pub const FIND_PROMPT: &str = "Search: {} (Use ESC/Arrows/Enter)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A hit: line index plus rendered span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub line: usize,
    pub rx: usize,
    pub len: usize,
}

/// Find the first line, in scan order, whose rendered text contains `query`.
/// Scanning starts one step past `last` (or at line 0 going forward when
/// there is no previous match) and visits every line once.
pub fn find_next(
    buffer: &Buffer,
    query: &[u8],
    last: Option<usize>,
    dir: Direction,
) -> Option<Match> {
    let count = buffer.line_count();
    if query.is_empty() || count == 0 {
        return None;
    }
    let mut current = last.filter(|l| *l < count);
    for _ in 0..count {
        let next = match (current, dir) {
            (None, _) => 0,
            (Some(c), Direction::Forward) => (c + 1) % count,
            (Some(0), Direction::Backward) => count - 1,
            (Some(c), Direction::Backward) => c - 1,
        };
        current = Some(next);
        let rendered = buffer.line(next)?.rendered();
        if let Some(rx) = find_bytes(rendered, query) {
            return Some(Match {
                line: next,
                rx,
                len: query.len(),
            });
        }
    }
    None
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Per-prompt search session.
#[derive(Debug, Default)]
pub struct SearchState {
    last_match: Option<usize>,
    direction: Direction,
    saved: Option<(usize, Vec<Highlight>)>,
}

impl SearchState {
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn has_overlay(&self) -> bool {
        self.saved.is_some()
    }

    /// Prompt callback: react to `key` with the current `query`.
    pub fn on_key(&mut self, state: &mut EditorState, query: &str, key: Key) {
        self.restore(&mut state.buffer);

        match key {
            Key::Enter | Key::Escape => {
                self.last_match = None;
                self.direction = Direction::Forward;
                return;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = Direction::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = Direction::Backward,
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let Some(hit) = find_next(&state.buffer, query.as_bytes(), self.last_match, self.direction)
        else {
            trace!(target: "search", query_len = query.len(), "no_match");
            return;
        };
        self.last_match = Some(hit.line);
        state.cursor.cy = hit.line;
        state.cursor.cx = state.buffer.rx_to_cx(hit.line, hit.rx);
        // Past the end: the next scroll step brings the match row to the top.
        state.view.row_off = state.buffer.line_count();
        if let Some(saved) = state.buffer.overlay_highlight(
            hit.line,
            hit.rx..hit.rx + hit.len,
            Highlight::SearchMatch,
        ) {
            self.saved = Some((hit.line, saved));
        }
        debug!(
            target: "search",
            line = hit.line,
            rx = hit.rx,
            direction = ?self.direction,
            "match"
        );
    }

    fn restore(&mut self, buffer: &mut Buffer) {
        if let Some((line, saved)) = self.saved.take() {
            buffer.restore_highlight(line, saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(text: &[u8]) -> Buffer {
        Buffer::from_bytes(text, 4)
    }

    #[test]
    fn forward_scan_starts_at_top_without_history() {
        let b = buf(b"foo\nbar\nfoo");
        assert_eq!(find_next(&b, b"foo", None, Direction::Forward).map(|m| m.line), Some(0));
        assert_eq!(find_next(&b, b"foo", Some(0), Direction::Forward).map(|m| m.line), Some(2));
    }

    #[test]
    fn scan_wraps_both_ways() {
        let b = buf(b"foo\nbar\nbaz");
        assert_eq!(find_next(&b, b"foo", Some(2), Direction::Forward).map(|m| m.line), Some(0));
        assert_eq!(find_next(&b, b"baz", Some(0), Direction::Backward).map(|m| m.line), Some(2));
        assert_eq!(find_next(&b, b"foo", Some(0), Direction::Forward).map(|m| m.line), Some(0));
    }

    #[test]
    fn match_offset_is_rendered() {
        let b = buf(b"\tx foo");
        assert_eq!(
            find_next(&b, b"foo", None, Direction::Forward),
            Some(Match { line: 0, rx: 6, len: 3 })
        );
    }

    #[test]
    fn empty_query_and_empty_buffer_find_nothing() {
        assert_eq!(find_next(&buf(b"abc"), b"", None, Direction::Forward), None);
        assert_eq!(find_next(&buf(b""), b"a", None, Direction::Forward), None);
        assert_eq!(find_next(&buf(b"ab"), b"abc", None, Direction::Forward), None);
    }
}
