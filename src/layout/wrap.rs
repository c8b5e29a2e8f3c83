//! Line wrapping for story paragraphs.
//!
//! Wrapping deliberately uses a cheap estimate: a fixed number of characters
//! per line derived from an average glyph width. Only once the lines are fixed
//! is each one measured exactly, to centre it. Keeping the two apart keeps the
//! wrap points identical to the booklets printed so far.

use crate::sinks::Surface;
use crate::units::Pt;

/// How many characters fit on a line, estimated from an average glyph width
/// of `font_size * average_char_width_factor`.
///
/// Never returns less than one so wrapping always makes progress.
pub fn estimate_line_break_width(
    text_width: Pt,
    font_size: Pt,
    average_char_width_factor: f32,
) -> usize {
    let estimate = (*text_width / (*font_size * average_char_width_factor)).floor();
    if estimate.is_finite() && estimate >= 1.0 {
        estimate as usize
    } else {
        1
    }
}

/// The exact width a line will take up once rendered on `surface`.
pub fn measure_exact_rendered_width<S: Surface + ?Sized>(surface: &S, line: &str, size: Pt) -> Pt {
    surface.text_width(line, size)
}

/// Greedily wrap `text` to at most `max_chars` characters per line.
///
/// Every `\n` starts a new paragraph. Within a paragraph a line is broken at
/// the last space before the limit, or hard at the limit if there is none, and
/// leading whitespace of the remainder is dropped. Empty paragraphs produce no
/// lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut rest = paragraph;
        while let Some((limit, _)) = rest.char_indices().nth(max_chars) {
            let split_at = rest[..limit].rfind(' ').unwrap_or(limit);
            lines.push(rest[..split_at].to_string());
            rest = rest[split_at..].trim_start();
        }
        if !rest.is_empty() {
            lines.push(rest.to_string());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::BookletConfig;

    #[test]
    fn default_settings_fit_fifty_characters() {
        let config = BookletConfig::default();
        let max_chars = estimate_line_break_width(
            config.content_width(),
            config.font_size(),
            config.average_char_width_factor,
        );
        assert_eq!(max_chars, 50);
    }

    #[test]
    fn estimate_never_reaches_zero() {
        assert_eq!(estimate_line_break_width(Pt(1.0), Pt(12.0), 0.6), 1);
        assert_eq!(estimate_line_break_width(Pt(100.0), Pt(0.0), 0.6), 1);
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text("Hello world", 50), vec!["Hello world"]);
    }

    #[test]
    fn breaks_at_last_space_before_limit() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn hard_breaks_words_longer_than_the_limit() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn line_breaks_are_never_merged() {
        assert_eq!(wrap_text("Es war\neinmal", 80), vec!["Es war", "einmal"]);
        assert_eq!(wrap_text("a\n\nb", 80), vec!["a", "b"]);
        assert_eq!(wrap_text("eins zwei\ndrei", 4), vec!["eins", "zwei", "drei"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap_text("äöüäö", 2), vec!["äö", "üä", "ö"]);
        assert_eq!(wrap_text("Bär und Fuchs", 8), vec!["Bär und", "Fuchs"]);
    }

    #[test]
    fn wrapping_a_fitting_line_is_a_no_op() {
        let text = "Der kleine Fuchs lief durch den Wald und traf dort einen Igel, \
                    der ihm von dem großen Fest auf der Lichtung erzählte.";
        for line in wrap_text(text, 30) {
            assert!(line.chars().count() <= 30);
            assert_eq!(wrap_text(&line, 30), vec![line.clone()]);
        }
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_text("", 50).is_empty());
        assert!(wrap_text("\n", 50).is_empty());
    }
}
