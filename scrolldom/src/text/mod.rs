use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cut a string to at most `max_width` display columns.
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    if display_width(s) <= max_width {
        return s;
    }

    let mut width = 0;
    let mut end = 0;

    for (i, ch) in s.char_indices() {
        let ch_width = char_width(ch);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        end = i + ch.len_utf8();
    }

    &s[..end]
}

/// Number of rows a text block occupies.
pub fn line_count(s: &str) -> usize {
    s.lines().count().max(1)
}
