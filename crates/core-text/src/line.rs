//! A single editable line and its derived render/highlight state.

use crate::render;
use core_syntax::{Highlight, SyntaxProfile, scan_line};

/// One row of the buffer.
///
/// `rendered` and `highlight` are derived: they are replaced wholesale
/// whenever `raw` changes and are never edited in place, except for the
/// transient search overlay which the buffer restores from a saved copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    index: usize,
    raw: Vec<u8>,
    rendered: Vec<u8>,
    highlight: Vec<Highlight>,
    continues_block_comment: bool,
}

impl Line {
    pub(crate) fn new(index: usize, raw: Vec<u8>, tab_stop: usize) -> Self {
        let rendered = render::render(&raw, tab_stop);
        let highlight = vec![Highlight::Normal; rendered.len()];
        Self {
            index,
            raw,
            rendered,
            highlight,
            continues_block_comment: false,
        }
    }

    /// Position in the buffer; always equals the line's offset in the store.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// True when a block comment is still open at end of line.
    pub fn continues_block_comment(&self) -> bool {
        self.continues_block_comment
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn raw_mut(&mut self) -> &mut Vec<u8> {
        &mut self.raw
    }

    pub(crate) fn highlight_mut(&mut self) -> &mut [Highlight] {
        &mut self.highlight
    }

    pub(crate) fn replace_highlight(&mut self, highlight: Vec<Highlight>) {
        debug_assert_eq!(highlight.len(), self.rendered.len());
        self.highlight = highlight;
    }

    /// Regenerate `rendered` from `raw`. The caller must rehighlight next.
    pub(crate) fn rerender(&mut self, tab_stop: usize) {
        self.rendered = render::render(&self.raw, tab_stop);
    }

    /// Rescan `rendered`; returns whether the block-comment carry changed.
    pub(crate) fn rehighlight(&mut self, profile: Option<&SyntaxProfile>, seed: bool) -> bool {
        let outcome = scan_line(&self.rendered, profile, seed);
        self.highlight = outcome.classes;
        let changed = self.continues_block_comment != outcome.open_block_comment;
        self.continues_block_comment = outcome.open_block_comment;
        changed
    }

    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        render::logical_to_rendered(&self.raw, cx, tab_stop)
    }

    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        render::rendered_to_logical(&self.raw, rx, tab_stop)
    }
}
