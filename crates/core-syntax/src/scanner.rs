//! Single-line highlighting scanner.
//!
//! Rules are tried in priority order at each position: single-line comment,
//! block comment, string, number, keyword, plain byte. Each rule either
//! consumes one or more bytes and restarts the loop, or falls through.

use crate::{Highlight, SyntaxFlags, SyntaxProfile, is_separator};

/// Result of scanning one rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// One class per rendered byte.
    pub classes: Vec<Highlight>,
    /// A block comment is still open at end of line.
    pub open_block_comment: bool,
}

/// Classify `rendered`. `seed_in_comment` is the carry state of the previous
/// line. Without a profile every byte is `Normal` and the carry is cleared.
pub fn scan_line(
    rendered: &[u8],
    profile: Option<&SyntaxProfile>,
    seed_in_comment: bool,
) -> ScanOutcome {
    let mut classes = vec![Highlight::Normal; rendered.len()];
    let Some(profile) = profile else {
        return ScanOutcome {
            classes,
            open_block_comment: false,
        };
    };

    let line_comment = profile.single_line_comment.map(str::as_bytes);
    let block = profile
        .block_comment
        .map(|(start, end)| (start.as_bytes(), end.as_bytes()))
        .filter(|(start, end)| !start.is_empty() && !end.is_empty());

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = seed_in_comment && block.is_some();

    let mut i = 0;
    while i < rendered.len() {
        let c = rendered[i];
        let rest = &rendered[i..];
        let prev_class = if i > 0 {
            classes[i - 1]
        } else {
            Highlight::Normal
        };

        if let Some(prefix) = line_comment
            && !prefix.is_empty()
            && in_string.is_none()
            && !in_comment
            && rest.starts_with(prefix)
        {
            classes[i..].fill(Highlight::Comment);
            break;
        }

        if let Some((start, end)) = block
            && in_string.is_none()
        {
            if in_comment {
                if rest.starts_with(end) {
                    classes[i..i + end.len()].fill(Highlight::BlockComment);
                    i += end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    classes[i] = Highlight::BlockComment;
                    i += 1;
                }
                continue;
            }
            if rest.starts_with(start) {
                classes[i..i + start.len()].fill(Highlight::BlockComment);
                i += start.len();
                in_comment = true;
                continue;
            }
        }

        if profile.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(quote) = in_string {
                classes[i] = Highlight::String;
                if c == b'\\' && i + 1 < rendered.len() {
                    classes[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            }
            if c == b'"' || c == b'\'' {
                in_string = Some(c);
                classes[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if profile.flags.contains(SyntaxFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_class == Highlight::Number))
                || (c == b'.' && prev_class == Highlight::Number))
        {
            classes[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = match_keyword(profile, rest) {
            classes[i..i + len].fill(class);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    ScanOutcome {
        classes,
        open_block_comment: in_comment,
    }
}

/// First keyword (table order) that prefixes `rest` and is followed by a
/// separator or the end of the line.
fn match_keyword(profile: &SyntaxProfile, rest: &[u8]) -> Option<(usize, Highlight)> {
    profile.keywords.iter().find_map(|kw| {
        let kw = kw.as_bytes();
        let (word, class) = match kw.split_last() {
            Some((&SyntaxProfile::SECONDARY_MARKER, word)) => (word, Highlight::KeywordSecondary),
            _ => (kw, Highlight::KeywordPrimary),
        };
        if word.is_empty() || !rest.starts_with(word) {
            return None;
        }
        match rest.get(word.len()) {
            Some(&next) if !is_separator(next) => None,
            _ => Some((word.len(), class)),
        }
    })
}
