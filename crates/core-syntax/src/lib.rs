//! Syntax classification for rendered lines.
//!
//! The crate is deliberately buffer-agnostic: it knows how to classify one
//! rendered line given the block-comment carry state of its predecessor, and
//! it owns the static table of syntax profiles. Cross-line propagation (the
//! cascade that re-scans following lines when a block comment opens or
//! closes) lives with the line store in `core-text`, which is the only place
//! that can see neighbouring lines.
//!
//! Invariants:
//! * `scan_line` returns exactly one `Highlight` per rendered byte.
//! * Scanning is a pure function of `(rendered, profile, seed)`; recomputing
//!   with identical inputs yields identical output.

mod profile;
mod scanner;

pub use profile::{PROFILES, SyntaxFlags, SyntaxProfile, select_profile};
pub use scanner::{ScanOutcome, scan_line};

/// Color class assigned to a single rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    BlockComment,
    KeywordPrimary,
    KeywordSecondary,
    String,
    Number,
    SearchMatch,
}

/// C `isspace` set; unlike `u8::is_ascii_whitespace` it includes vertical tab.
const WHITESPACE: &[u8] = b" \t\n\x0b\x0c\r";

/// Separator bytes terminate keywords and permit numbers to start.
pub fn is_separator(b: u8) -> bool {
    WHITESPACE.contains(&b) || b == b'\0' || b",.()+-*/=~%<>[];".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators() {
        for b in b" \t\n\x0b\x0c\r\0,.()+-*/=~%<>[];" {
            assert!(is_separator(*b), "{:?} should separate", *b as char);
        }
        for b in b"aZ09_\"'{}#" {
            assert!(!is_separator(*b), "{:?} should not separate", *b as char);
        }
    }

    #[test]
    fn default_class_is_normal() {
        assert_eq!(Highlight::default(), Highlight::Normal);
    }
}
