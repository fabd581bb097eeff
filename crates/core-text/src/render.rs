//! Tab expansion and logical/rendered column mapping.
//!
//! All three functions share one expansion rule: a tab advances the rendered
//! column to the next multiple of the tab stop, always by at least one cell.
//! A tab stop of zero is treated as one.

pub const DEFAULT_TAB_STOP: usize = 4;

#[inline]
fn advance(rx: usize, byte: u8, tab_stop: usize) -> usize {
    if byte == b'\t' {
        rx + tab_stop - (rx % tab_stop)
    } else {
        rx + 1
    }
}

/// Expand tabs in `raw` into spaces.
pub fn render(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = raw.iter().filter(|b| **b == b'\t').count();
    let mut out = Vec::with_capacity(raw.len() + tabs * (tab_stop - 1));
    for &b in raw {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % tab_stop != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}

/// Rendered column of logical column `cx` (clamped to the line length).
pub fn logical_to_rendered(raw: &[u8], cx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    raw[..cx.min(raw.len())]
        .iter()
        .fold(0, |rx, &b| advance(rx, b, tab_stop))
}

/// Logical column whose rendered extent covers `rx`; the line length when
/// `rx` lies past the rendered width.
pub fn rendered_to_logical(raw: &[u8], rx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut cur = 0;
    for (cx, &b) in raw.iter().enumerate() {
        cur = advance(cur, b, tab_stop);
        if cur > rx {
            return cx;
        }
    }
    raw.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_tab_expands_to_stop() {
        assert_eq!(render(b"\tfoo", 4), b"    foo");
        assert_eq!(logical_to_rendered(b"\tfoo", 1, 4), 4);
    }

    #[test]
    fn mid_tab_aligns_to_next_stop() {
        assert_eq!(render(b"ab\tc", 4), b"ab  c");
        assert_eq!(render(b"abcd\tc", 4), b"abcd    c");
        assert_eq!(logical_to_rendered(b"ab\tc", 3, 4), 4);
    }

    #[test]
    fn rendered_inside_tab_maps_to_tab() {
        let raw = b"a\tb";
        for rx in 1..4 {
            assert_eq!(rendered_to_logical(raw, rx, 4), 1, "rx={rx}");
        }
        assert_eq!(rendered_to_logical(raw, 4, 4), 2);
        assert_eq!(rendered_to_logical(raw, 99, 4), 3);
    }

    #[test]
    fn cx_is_clamped() {
        assert_eq!(logical_to_rendered(b"ab", 10, 4), 2);
    }

    #[test]
    fn zero_tab_stop_behaves_as_one() {
        assert_eq!(render(b"\t\t", 0), b"  ");
        assert_eq!(logical_to_rendered(b"\tx", 2, 0), 2);
    }

    #[test]
    fn other_tab_stops() {
        assert_eq!(render(b"x\ty", 8), b"x       y");
        assert_eq!(logical_to_rendered(b"x\ty", 2, 8), 8);
    }
}
