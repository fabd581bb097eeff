//! Highlight class → terminal color.

use core_text::Highlight;
use crossterm::style::Color;

pub fn color_for(class: Highlight) -> Color {
    match class {
        Highlight::Comment | Highlight::BlockComment => Color::DarkCyan,
        Highlight::KeywordPrimary => Color::DarkYellow,
        Highlight::KeywordSecondary => Color::DarkGreen,
        Highlight::String => Color::DarkMagenta,
        Highlight::Number => Color::DarkRed,
        Highlight::SearchMatch => Color::DarkBlue,
        Highlight::Normal => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_share_a_color() {
        assert_eq!(color_for(Highlight::Comment), color_for(Highlight::BlockComment));
        assert_eq!(color_for(Highlight::Normal), Color::Reset);
        assert_ne!(color_for(Highlight::SearchMatch), color_for(Highlight::Number));
    }
}
