//! Frame emission through crossterm.
//!
//! Every row is repainted from column 0 and cleared to end of line, so the
//! previous frame never leaks through. Commands are queued and flushed once.

use crate::frame::{FILLER, Frame, Row, Span};
use crate::theme::color_for;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

pub fn write_frame<W: Write>(out: &mut W, frame: &Frame) -> Result<()> {
    queue!(out, Hide)?;
    let mut y: u16 = 0;
    for row in &frame.rows {
        queue!(out, MoveTo(0, y))?;
        match row {
            Row::Filler => queue!(out, Print(FILLER))?,
            Row::Banner(text) => queue!(out, Print(text))?,
            Row::Text(spans) => write_spans(out, spans)?,
        }
        queue!(out, Clear(ClearType::UntilNewLine))?;
        y = y.saturating_add(1);
    }

    queue!(
        out,
        MoveTo(0, y),
        SetAttribute(Attribute::Reverse),
        Print(&frame.status_bar),
        SetAttribute(Attribute::Reset),
        Clear(ClearType::UntilNewLine),
        MoveTo(0, y.saturating_add(1)),
        Print(&frame.message_bar),
        Clear(ClearType::UntilNewLine),
        MoveTo(frame.cursor.0, frame.cursor.1),
        Show
    )?;
    out.flush()?;
    Ok(())
}

fn write_spans<W: Write>(out: &mut W, spans: &[Span]) -> Result<()> {
    for span in spans {
        match span {
            Span::Style(class) => queue!(out, SetForegroundColor(color_for(*class)))?,
            // Raw bytes: the byte model does not promise valid UTF-8.
            Span::Text(bytes) => out.write_all(bytes)?,
            Span::Glyph(g) => queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(char::from(*g)),
                SetAttribute(Attribute::NoReverse)
            )?,
        }
    }
    queue!(out, ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Highlight;

    #[test]
    fn text_bytes_are_written_verbatim() {
        let frame = Frame {
            rows: vec![
                Row::Text(vec![
                    Span::Style(Highlight::Number),
                    Span::Text(b"42\xff".to_vec()),
                    Span::Glyph(b'A'),
                ]),
                Row::Filler,
            ],
            status_bar: "status".into(),
            message_bar: "msg".into(),
            cursor: (1, 0),
        };
        let mut out = Vec::new();
        write_frame(&mut out, &frame).unwrap();
        let hay = &out[..];
        let contains = |needle: &[u8]| hay.windows(needle.len()).any(|w| w == needle);
        assert!(contains(b"42\xff"));
        assert!(contains(b"status"));
        assert!(contains(b"msg"));
        assert!(contains(b"~"));
    }
}
