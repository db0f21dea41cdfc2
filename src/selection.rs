//!
//! Keeps the cursor and the selection out of the separators.
//!

use crate::format::DisplayFormatter;
use std::ops::Range;

/// Adjusts a selection in the display text.
///
/// Each position where the char is a space is moved to the position
/// directly after the last digit before it. Both are clamped to the
/// length of the display text.
///
/// This is idempotent.
pub fn fix_selection(start: usize, end: usize, display: &str) -> (usize, usize) {
    (fix_cursor(start, display), fix_cursor(end, display))
}

/// Fix a single cursor position.
pub fn fix_cursor(pos: usize, display: &str) -> usize {
    let pos = pos.min(display.len());
    if display.as_bytes().get(pos) == Some(&b' ') {
        after_last_digit(pos, display)
    } else {
        pos
    }
}

/// Position after the last digit before pos, or 0.
fn after_last_digit(pos: usize, display: &str) -> usize {
    match display[..pos].rfind(|c: char| c.is_ascii_digit()) {
        Some(idx) => (idx + 1).min(display.len()),
        None => 0,
    }
}

/// Maps a selection in the display text to the range of raw digits
/// that must be shown as selected.
pub fn raw_selection(sel: Range<usize>, display: &str, fmt: &DisplayFormatter) -> Range<usize> {
    let start = fmt.display_to_raw(sel.start, display);
    let end = fmt.display_to_raw(sel.end, display);
    start..end.max(start)
}

/// Maps a raw selection back to the display text.
pub fn display_selection(sel: Range<usize>, raw_len: usize, fmt: &DisplayFormatter) -> Range<usize> {
    fmt.raw_to_display(sel.start, raw_len)..fmt.raw_to_display(sel.end, raw_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_last_digit() {
        assert_eq!(after_last_digit(0, "1234 5678"), 0);
        assert_eq!(after_last_digit(4, "1234 5678"), 4);
        assert_eq!(after_last_digit(5, "1234 5678"), 4);
        assert_eq!(after_last_digit(6, "1234  5678"), 4);
        assert_eq!(after_last_digit(3, "   "), 0);
    }
}
