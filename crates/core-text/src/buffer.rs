//! Line store: ordered lines, dirty counter, active syntax profile.
//!
//! Invariants (hold after every public call):
//! * `lines[i].index() == i` for every line.
//! * Every line's `rendered` is `render(raw)` and its `highlight` has one
//!   class per rendered byte.
//! * Every line's highlight was computed with its predecessor's current
//!   block-comment carry as seed (line 0 is seeded with `false`).
//!
//! Row and column arguments are clamped; operations that name a row outside
//! the buffer are no-ops.

use crate::line::Line;
use crate::render::DEFAULT_TAB_STOP;
use core_syntax::{Highlight, SyntaxProfile, select_profile};
use std::ops::Range;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Line>,
    tab_stop: usize,
    profile: Option<&'static SyntaxProfile>,
    dirty: u64,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl Buffer {
    /// Empty buffer with no syntax profile.
    pub fn new(tab_stop: usize) -> Self {
        Self {
            lines: Vec::new(),
            tab_stop: tab_stop.max(1),
            profile: None,
            dirty: 0,
        }
    }

    /// Split `content` into lines at `\n`, stripping trailing `\r`/`\n`
    /// bytes from each. A final newline does not produce an empty line.
    /// The result is clean (dirty counter zero).
    pub fn from_bytes(content: &[u8], tab_stop: usize) -> Self {
        let mut buffer = Self::new(tab_stop);
        let mut rest = content;
        while !rest.is_empty() {
            let (mut line, tail) = match rest.iter().position(|b| *b == b'\n') {
                Some(nl) => (&rest[..nl], &rest[nl + 1..]),
                None => (rest, &[][..]),
            };
            while let Some((&b'\r', head)) = line.split_last() {
                line = head;
            }
            let index = buffer.lines.len();
            buffer
                .lines
                .push(Line::new(index, line.to_vec(), buffer.tab_stop));
            rest = tail;
        }
        debug!(target: "text", lines = buffer.lines.len(), bytes = content.len(), "buffer_loaded");
        buffer
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Logical length of line `idx`; zero past the end.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Line::len)
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn profile(&self) -> Option<&'static SyntaxProfile> {
        self.profile
    }

    /// Mutation counter; nonzero means unsaved changes.
    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Rendered column of `cx` on line `idx`; zero past the end.
    pub fn cx_to_rx(&self, idx: usize, cx: usize) -> usize {
        self.lines
            .get(idx)
            .map_or(0, |l| l.cx_to_rx(cx, self.tab_stop))
    }

    /// Logical column covering rendered column `rx` on line `idx`.
    pub fn rx_to_cx(&self, idx: usize, rx: usize) -> usize {
        self.lines
            .get(idx)
            .map_or(0, |l| l.rx_to_cx(rx, self.tab_stop))
    }

    /// Choose a profile for `filename` (clearing it when `None` or unmatched)
    /// and rehighlight every line top to bottom.
    pub fn select_syntax(&mut self, filename: Option<&str>) {
        self.profile = filename.and_then(select_profile);
        let mut carry = false;
        for line in &mut self.lines {
            line.rehighlight(self.profile, carry);
            carry = line.continues_block_comment();
        }
        debug!(
            target: "text",
            filetype = self.profile.map(|p| p.filetype),
            lines = self.lines.len(),
            "syntax_applied"
        );
    }

    /// Insert a new line at `at` (clamped to `[0, line_count]`); returns the
    /// index it landed on.
    pub fn insert_line(&mut self, at: usize, bytes: &[u8]) -> usize {
        let at = at.min(self.lines.len());
        self.lines
            .insert(at, Line::new(at, bytes.to_vec(), self.tab_stop));
        self.reindex_from(at + 1);
        // The follower's seed is now the new line's carry: rescan through it.
        self.rehighlight(at..at + 2);
        self.dirty += 1;
        at
    }

    /// Remove line `at`; no-op when out of range.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            return;
        }
        self.lines.remove(at);
        self.reindex_from(at);
        self.rehighlight(at..at + 1);
        self.dirty += 1;
    }

    /// Insert `byte` at logical column `at` (clamped to the line length).
    pub fn insert_char(&mut self, line: usize, at: usize, byte: u8) {
        let Some(l) = self.lines.get_mut(line) else {
            return;
        };
        let at = at.min(l.len());
        l.raw_mut().insert(at, byte);
        self.refresh_line(line);
        self.dirty += 1;
    }

    /// Remove the byte at logical column `at`; no-op when out of range.
    pub fn delete_char(&mut self, line: usize, at: usize) {
        let Some(l) = self.lines.get_mut(line) else {
            return;
        };
        if at >= l.len() {
            return;
        }
        l.raw_mut().remove(at);
        self.refresh_line(line);
        self.dirty += 1;
    }

    pub fn append_bytes(&mut self, line: usize, bytes: &[u8]) {
        let Some(l) = self.lines.get_mut(line) else {
            return;
        };
        l.raw_mut().extend_from_slice(bytes);
        self.refresh_line(line);
        self.dirty += 1;
    }

    /// Truncate `line` at `at` and insert the remainder as the next line.
    pub fn split_line(&mut self, line: usize, at: usize) {
        let Some(l) = self.lines.get_mut(line) else {
            return;
        };
        let at = at.min(l.len());
        let tail = l.raw_mut().split_off(at);
        self.refresh_line(line);
        self.insert_line(line + 1, &tail);
    }

    /// Append `line` onto its predecessor and remove it. Returns the column in
    /// the predecessor where the joined content starts; `None` (no-op) for
    /// line 0 or out-of-range lines.
    pub fn join_with_previous(&mut self, line: usize) -> Option<usize> {
        if line == 0 || line >= self.lines.len() {
            return None;
        }
        let content = std::mem::take(self.lines[line].raw_mut());
        let col = self.lines[line - 1].len();
        self.append_bytes(line - 1, &content);
        self.delete_line(line);
        Some(col)
    }

    /// Every line's raw bytes followed by `\n`.
    pub fn serialize(&self) -> Vec<u8> {
        let total = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(line.raw());
            out.push(b'\n');
        }
        out
    }

    /// Paint `class` over `span` (clamped to the rendered width) of line `idx`
    /// and return the highlight it replaced, for [`Buffer::restore_highlight`].
    pub fn overlay_highlight(
        &mut self,
        idx: usize,
        span: Range<usize>,
        class: Highlight,
    ) -> Option<Vec<Highlight>> {
        let line = self.lines.get_mut(idx)?;
        let saved = line.highlight().to_vec();
        let hl = line.highlight_mut();
        let end = span.end.min(hl.len());
        let start = span.start.min(end);
        hl[start..end].fill(class);
        Some(saved)
    }

    /// Put back a highlight saved by [`Buffer::overlay_highlight`]. Ignored if
    /// the line has since changed width.
    pub fn restore_highlight(&mut self, idx: usize, saved: Vec<Highlight>) {
        if let Some(line) = self.lines.get_mut(idx)
            && line.highlight().len() == saved.len()
        {
            line.replace_highlight(saved);
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, line) in self.lines.iter_mut().enumerate().skip(start) {
            line.set_index(i);
        }
    }

    fn refresh_line(&mut self, idx: usize) {
        self.lines[idx].rerender(self.tab_stop);
        self.rehighlight(idx..idx + 1);
    }

    /// Rescan every line in `span`, then keep going while the carry of the
    /// last scanned line changed. Terminates at the first line whose carry is
    /// stable, or at the end of the buffer.
    fn rehighlight(&mut self, span: Range<usize>) {
        let mut idx = span.start;
        let mut scanned = 0usize;
        while idx < self.lines.len() {
            let seed = idx > 0 && self.lines[idx - 1].continues_block_comment();
            let changed = self.lines[idx].rehighlight(self.profile, seed);
            scanned += 1;
            idx += 1;
            if !changed && idx >= span.end {
                break;
            }
        }
        if scanned > span.len() {
            trace!(target: "text.highlight", start = span.start, scanned, "cascade");
        }
    }
}
