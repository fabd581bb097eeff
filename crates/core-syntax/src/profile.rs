//! Static syntax profile table and filename-based selection.

use bitflags::bitflags;
use tracing::debug;

bitflags! {
    /// Optional scanner features enabled per profile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS = 0b0000_0001;
        const STRINGS = 0b0000_0010;
    }
}

/// Immutable highlighting ruleset.
///
/// Keywords ending in [`SyntaxProfile::SECONDARY_MARKER`] belong to the
/// secondary (type name) class; the marker is not part of the matched text.
#[derive(Debug, PartialEq, Eq)]
pub struct SyntaxProfile {
    /// Short filetype label shown in the status bar.
    pub filetype: &'static str,
    /// Extension patterns start with `.`; anything else is a substring match.
    pub file_match: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub single_line_comment: Option<&'static str>,
    /// `(start, end)` delimiters of a multi-line comment.
    pub block_comment: Option<(&'static str, &'static str)>,
    pub flags: SyntaxFlags,
}

impl SyntaxProfile {
    pub const SECONDARY_MARKER: u8 = b'|';

    /// Does this profile claim `filename`?
    pub fn matches(&self, filename: &str) -> bool {
        let ext = filename.rfind('.').map(|i| &filename[i..]);
        self.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                filename.contains(pattern)
            }
        })
    }
}

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
    "typedef", "static", "enum", "class", "case", "int|", "long|", "double|", "float|", "char|",
    "unsigned|", "signed|", "void|",
];

/// Profile table consulted by [`select_profile`]; first match wins.
pub static PROFILES: &[SyntaxProfile] = &[SyntaxProfile {
    filetype: "c",
    file_match: &[".c", ".h", ".cpp"],
    keywords: C_KEYWORDS,
    single_line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
}];

/// Pick the first profile whose patterns match `filename`.
pub fn select_profile(filename: &str) -> Option<&'static SyntaxProfile> {
    let found = PROFILES.iter().find(|p| p.matches(filename));
    debug!(
        target: "syntax",
        filetype = found.map(|p| p.filetype),
        "profile_selected"
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_uses_last_dot() {
        assert_eq!(select_profile("main.c").map(|p| p.filetype), Some("c"));
        assert_eq!(select_profile("dir.v2/x.h").map(|p| p.filetype), Some("c"));
        assert!(select_profile("main.c.bak").is_none());
        assert!(select_profile("Makefile").is_none());
    }

    #[test]
    fn extension_must_match_exactly() {
        // ".c" must not match ".cpp" or ".cc" by prefix.
        assert_eq!(select_profile("a.cpp").map(|p| p.filetype), Some("c"));
        assert!(select_profile("a.cc").is_none());
    }

    #[test]
    fn substring_patterns_match_anywhere() {
        static P: SyntaxProfile = SyntaxProfile {
            filetype: "make",
            file_match: &["Makefile"],
            keywords: &[],
            single_line_comment: Some("#"),
            block_comment: None,
            flags: SyntaxFlags::empty(),
        };
        assert!(P.matches("src/Makefile.am"));
        assert!(!P.matches("makefile"));
    }

    #[test]
    fn c_profile_flags() {
        let p = &PROFILES[0];
        assert!(p.flags.contains(SyntaxFlags::NUMBERS | SyntaxFlags::STRINGS));
        assert_eq!(p.block_comment, Some(("/*", "*/")));
    }
}
