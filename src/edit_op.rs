//!
//! Edit operations for the card-entry.
//!
//! All edits are rewritten in terms of the raw digits. The display
//! text and the cursor are derived afterward.
//!
//! The functions return true if anything changed, the text or
//! the cursor.
//!

use crate::CardCore;
use crate::clipboard::ClipboardError;
use log::{debug, warn};
use std::ops::Range;
use std::time::Instant;

/// Insert a char at the cursor. Replaces the selection.
///
/// Anything but digits is ignored. If the number is already
/// complete the char is ignored too.
pub fn insert_char(core: &mut CardCore, c: char) -> bool {
    if !c.is_ascii_digit() {
        return false;
    }
    let mut buf = [0u8; 4];
    insert_str(core, c.encode_utf8(&mut buf))
}

/// Insert text at the cursor. Replaces the selection.
///
/// The text is filtered to contain only digits, and truncated
/// to fit into the remaining space.
pub fn insert_str(core: &mut CardCore, text: &str) -> bool {
    let old_text = core.numbers().to_string();
    let old_cursor = core.cursor();

    let sel = core.raw_selection();
    let n = core.replace_raw(sel, text, Instant::now());
    if n < text.chars().filter(|c| c.is_ascii_digit()).count() {
        debug!("card-entry: truncated insert {:?} to {} digits", text, n);
    }

    old_text != core.numbers() || old_cursor != core.cursor()
}

/// Paste text. Everything but digits is removed before inserting.
///
/// Separators in the pasted text don't count towards the
/// maximum length.
pub fn paste_str(core: &mut CardCore, text: &str) -> bool {
    insert_str(core, text)
}

/// Replace the complete number.
///
/// Uses the same filtering as paste. The cursor is placed at
/// the end.
pub fn set_text(core: &mut CardCore, text: &str) -> bool {
    let old = core.numbers().to_string();
    let len = core.numbers().len();
    core.replace_raw(0..len, text, Instant::now());
    old != core.numbers()
}

/// Clear the number.
pub fn clear(core: &mut CardCore) -> bool {
    if core.is_empty() {
        false
    } else {
        set_text(core, "")
    }
}

/// Delete the selected digits.
pub fn delete_selection(core: &mut CardCore) -> bool {
    if !core.has_selection() {
        return false;
    }
    let sel = core.raw_selection();
    core.replace_raw(sel, "", Instant::now());
    true
}

/// Backspace.
///
/// With the selection-fix active, a backspace directly after a
/// separator doesn't delete the separator char but steps over the
/// whole separator. The digits stay the same, the cursor ends up
/// right after the last digit of the previous part.
pub fn delete_prev_char(core: &mut CardCore) -> bool {
    if core.has_selection() {
        return delete_selection(core);
    }

    let cursor = core.cursor();
    if cursor == 0 {
        return false;
    }

    let part_length = core.partition().part_length();
    let space_count = core.partition().space_count();

    if core.selection_fix()
        && cursor > part_length
        && core.formatter().is_separator(cursor - 1, core.display())
    {
        let start = cursor.saturating_sub(space_count);
        let mut display = core.display().to_string();
        display.replace_range(start..cursor, "");
        debug!(
            "card-entry: backspace over separator {}..{} in {:?}",
            start,
            cursor,
            core.display()
        );
        core.replace_display(&display, start);
        return true;
    }

    let raw_cursor = core.raw_cursor();
    if raw_cursor == 0 {
        // only separators before the cursor
        return core.set_cursor(0, false);
    }
    core.replace_raw(raw_cursor - 1..raw_cursor, "", Instant::now());
    true
}

/// Delete.
///
/// With the selection-fix active, a delete directly before a
/// separator steps over the separator without deleting anything.
pub fn delete_next_char(core: &mut CardCore) -> bool {
    if core.has_selection() {
        return delete_selection(core);
    }

    let cursor = core.cursor();
    if cursor >= core.len() {
        return false;
    }

    if core.is_separator(cursor) {
        let mut pos = cursor;
        while pos < core.len() && core.is_separator(pos) {
            pos += 1;
        }
        return core.set_cursor(pos, false);
    }

    let raw_cursor = core.raw_cursor();
    if raw_cursor >= core.numbers().len() {
        return false;
    }
    core.replace_raw(raw_cursor..raw_cursor + 1, "", Instant::now());
    true
}

/// Selected text without any separators.
pub fn copy_text(core: &CardCore) -> String {
    core.selected_text().replace(' ', "")
}

/// Copy the selection to the clipboard.
/// Separators are not copied.
pub fn copy_to_clip(core: &CardCore) -> Result<bool, ClipboardError> {
    let Some(clip) = core.clipboard() else {
        return Ok(false);
    };
    if !core.has_selection() {
        return Ok(false);
    }
    clip.set_string(&copy_text(core))?;
    Ok(true)
}

/// Cut the selection to the clipboard.
pub fn cut_to_clip(core: &mut CardCore) -> Result<bool, ClipboardError> {
    if copy_to_clip(core)? {
        Ok(delete_selection(core))
    } else {
        Ok(false)
    }
}

/// Paste from the clipboard.
pub fn paste_from_clip(core: &mut CardCore) -> Result<bool, ClipboardError> {
    let Some(clip) = core.clipboard() else {
        return Ok(false);
    };
    let text = clip.get_string()?;
    Ok(paste_str(core, &text))
}

/// Log clipboard errors and map them to unchanged.
pub(crate) fn clip_result(r: Result<bool, ClipboardError>) -> bool {
    match r {
        Ok(v) => v,
        Err(e) => {
            warn!("card-entry: clipboard {}", e);
            false
        }
    }
}

/// Move the cursor one position to the left.
pub fn move_left(core: &mut CardCore, extend_selection: bool) -> bool {
    let pos = core.cursor().saturating_sub(1);
    core.set_cursor(pos, extend_selection)
}

/// Move the cursor one position to the right.
/// Separators are skipped.
pub fn move_right(core: &mut CardCore, extend_selection: bool) -> bool {
    let len = core.len();
    let mut pos = (core.cursor() + 1).min(len);
    while pos < len && core.is_separator(pos) && core.is_separator(pos - 1) {
        pos += 1;
    }
    core.set_cursor(pos, extend_selection)
}

/// Start of the number.
pub fn move_to_start(core: &mut CardCore, extend_selection: bool) -> bool {
    core.set_cursor(0, extend_selection)
}

/// End of the number.
pub fn move_to_end(core: &mut CardCore, extend_selection: bool) -> bool {
    let len = core.len();
    core.set_cursor(len, extend_selection)
}

/// Range of raw digits of the part containing the raw index.
pub fn part_range(core: &CardCore, raw_idx: usize) -> Range<usize> {
    let part_length = core.partition().part_length();
    let len = core.numbers().len();
    // at the end use the last part instead of an empty one
    let raw_idx = if raw_idx >= len && len > 0 {
        len - 1
    } else {
        raw_idx
    };
    let part = (raw_idx / part_length).min(core.partition().part_count() - 1);
    let start = (part * part_length).min(len);
    let end = ((part + 1) * part_length).min(len);
    start..end
}

/// Move to the start of the current part, or the previous part
/// if the cursor is already at a start.
pub fn move_to_prev_part(core: &mut CardCore, extend_selection: bool) -> bool {
    let part_length = core.partition().part_length();
    let raw_cursor = core.raw_cursor();
    let target = if raw_cursor % part_length == 0 {
        raw_cursor.saturating_sub(part_length)
    } else {
        raw_cursor - raw_cursor % part_length
    };
    let pos = core.from_raw(target);
    core.set_cursor(pos, extend_selection)
}

/// Move to the end of the current part, or the next part if
/// the cursor is already at an end.
pub fn move_to_next_part(core: &mut CardCore, extend_selection: bool) -> bool {
    let part_length = core.partition().part_length();
    let len = core.numbers().len();
    let raw_cursor = core.raw_cursor();
    let target = ((raw_cursor / part_length + 1) * part_length).min(len);
    let pos = core.from_raw(target);
    core.set_cursor(pos, extend_selection)
}

/// Select the part at the cursor.
pub fn select_part(core: &mut CardCore) -> bool {
    let range = part_range(core, core.raw_cursor());
    let start = core.from_raw(range.start);
    // no separators inside a part
    let end = start + (range.end - range.start);
    core.set_selection(start, end)
}
