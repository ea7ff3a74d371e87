use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shortens `s` to at most `max_width` terminal columns, ending in "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Number of the option a digit key refers to, zero-based. `'1'` is the first option.
pub fn digit_to_index(c: char) -> Option<usize> {
    c.to_digit(10)
        .filter(|d| *d > 0)
        .map(|d| d as usize - 1)
}
