//!
//! Editing core of the card-entry.
//!
//! Independent of any ui. The widgets keep one of these and call
//! the functions in [edit_op](crate::edit_op) on it.
//!

use crate::animation::{TailAnimation, TailFrame};
use crate::clipboard::{Clipboard, global_clipboard};
use crate::format::DisplayFormatter;
use crate::raw_text::RawText;
use crate::selection::{fix_selection, raw_selection};
use crate::PartitionSpec;
use std::ops::Range;
use std::time::Instant;

/// Host independent core of the card-entry.
///
/// Holds the raw digits, the selection, the mode flags and the
/// animation state. The selection is kept in the coordinates of
/// the host text, which is the display text when the selection-fix
/// is active, and the raw digits otherwise.
#[derive(Debug, Clone)]
pub struct CardCore {
    fmt: DisplayFormatter,
    raw: RawText,
    // cached display text, always fmt.format(raw)
    display: String,

    anchor: usize,
    cursor: usize,

    selection_fix: bool,
    has_animation: bool,
    animation: TailAnimation,

    clip: Option<Box<dyn Clipboard>>,
}

impl Default for CardCore {
    fn default() -> Self {
        Self::new(PartitionSpec::default())
    }
}

impl CardCore {
    pub fn new(partition: PartitionSpec) -> Self {
        Self {
            fmt: DisplayFormatter::new(partition),
            raw: RawText::new(partition.max_length()),
            display: Default::default(),
            anchor: 0,
            cursor: 0,
            selection_fix: false,
            has_animation: false,
            animation: Default::default(),
            clip: Some(global_clipboard()),
        }
    }

    /// Change the partition. Truncates the digits if necessary.
    pub fn set_partition(&mut self, partition: PartitionSpec) {
        self.fmt = DisplayFormatter::new(partition);
        self.raw.set_max_length(partition.max_length());
        self.sync_display();
        let (anchor, cursor) = (self.anchor, self.cursor);
        self.set_selection(anchor, cursor);
    }

    #[inline]
    pub fn partition(&self) -> &PartitionSpec {
        self.fmt.partition()
    }

    #[inline]
    pub fn formatter(&self) -> &DisplayFormatter {
        &self.fmt
    }

    /// Keep the cursor out of the separators.
    ///
    /// With this flag the host text is the display text with the
    /// separator spaces. Without, the host text is only the digits
    /// and the separators are purely visual.
    pub fn set_selection_fix(&mut self, fix: bool) {
        if self.selection_fix == fix {
            return;
        }
        let raw_anchor = self.to_raw(self.anchor);
        let raw_cursor = self.to_raw(self.cursor);
        self.selection_fix = fix;
        let anchor = self.from_raw(raw_anchor);
        let cursor = self.from_raw(raw_cursor);
        self.set_selection(anchor, cursor);
    }

    #[inline]
    pub fn selection_fix(&self) -> bool {
        self.selection_fix
    }

    /// Animate appended digits.
    pub fn set_animation(&mut self, animation: bool) {
        self.has_animation = animation;
        if !animation {
            self.animation.stop();
        }
    }

    #[inline]
    pub fn has_animation(&self) -> bool {
        self.has_animation
    }

    #[inline]
    pub fn animation(&self) -> &TailAnimation {
        &self.animation
    }

    #[inline]
    pub fn animation_mut(&mut self) -> &mut TailAnimation {
        &mut self.animation
    }

    /// Advance the animation. Returns true if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.animation.tick(now)
    }

    /// Current frame for the last glyph.
    pub fn tail_frame(&self, now: Instant, line_spacing: f32) -> TailFrame {
        self.animation.frame(now, line_spacing)
    }

    /// Clipboard used.
    pub fn set_clipboard(&mut self, clip: Option<Box<dyn Clipboard + 'static>>) {
        self.clip = clip;
    }

    pub fn clipboard(&self) -> Option<&dyn Clipboard> {
        self.clip.as_deref()
    }
}

impl CardCore {
    /// Add a listener for the completion state.
    pub fn on_pin_change(&mut self, f: impl Fn(bool, usize) + 'static) {
        self.raw.on_pin_change(f);
    }

    /// Add a listener for the raw digits.
    pub fn on_number_change(&mut self, f: impl Fn(&str) + 'static) {
        self.raw.on_number_change(f);
    }

    /// The digits without any separators.
    #[inline]
    pub fn numbers(&self) -> &str {
        self.raw.raw_text()
    }

    /// Raw text model.
    #[inline]
    pub fn raw(&self) -> &RawText {
        &self.raw
    }

    /// All digits entered.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.raw.is_complete()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Display text with separators.
    #[inline]
    pub fn display(&self) -> &str {
        self.display.as_str()
    }

    /// Host text. Either the display text or the raw digits,
    /// depending on the selection-fix.
    #[inline]
    pub fn text(&self) -> &str {
        if self.selection_fix {
            self.display.as_str()
        } else {
            self.raw.raw_text()
        }
    }

    /// Length of the host text.
    #[inline]
    pub fn len(&self) -> usize {
        self.text().len()
    }

    /// Host position to raw index.
    pub fn to_raw(&self, pos: usize) -> usize {
        if self.selection_fix {
            self.fmt.display_to_raw(pos, &self.display)
        } else {
            pos.min(self.raw.len())
        }
    }

    /// Raw index to host position.
    pub fn from_raw(&self, idx: usize) -> usize {
        if self.selection_fix {
            self.fmt.raw_to_display(idx, self.raw.len())
        } else {
            idx.min(self.raw.len())
        }
    }

    /// Is the char after the host position a separator.
    #[inline]
    pub fn is_separator(&self, pos: usize) -> bool {
        self.selection_fix && self.fmt.is_separator(pos, &self.display)
    }
}

impl CardCore {
    /// Cursor position in the host text.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selection anchor in the host text.
    #[inline]
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Selection in the host text.
    #[inline]
    pub fn selection(&self) -> Range<usize> {
        if self.anchor < self.cursor {
            self.anchor..self.cursor
        } else {
            self.cursor..self.anchor
        }
    }

    /// Selection as range of raw digits.
    pub fn raw_selection(&self) -> Range<usize> {
        if self.selection_fix {
            raw_selection(self.selection(), &self.display, &self.fmt)
        } else {
            self.selection()
        }
    }

    /// Cursor as raw index.
    #[inline]
    pub fn raw_cursor(&self) -> usize {
        self.to_raw(self.cursor)
    }

    /// Set the cursor. The position is clamped to the text and
    /// kept out of any separators.
    pub fn set_cursor(&mut self, cursor: usize, extend_selection: bool) -> bool {
        let anchor = if extend_selection {
            self.anchor
        } else {
            cursor
        };
        self.set_selection(anchor, cursor)
    }

    /// Set the selection. The positions are clamped to the text and
    /// kept out of any separators.
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) -> bool {
        let len = self.len();
        let (anchor, cursor) = if self.selection_fix {
            fix_selection(anchor, cursor, &self.display)
        } else {
            (anchor.min(len), cursor.min(len))
        };

        let old_selection = (self.anchor, self.cursor);
        self.anchor = anchor;
        self.cursor = cursor;
        old_selection != (self.anchor, self.cursor)
    }

    /// Select everything.
    pub fn select_all(&mut self) -> bool {
        let len = self.len();
        self.set_selection(0, len)
    }

    /// Selected host text.
    pub fn selected_text(&self) -> &str {
        &self.text()[self.selection()]
    }
}

impl CardCore {
    /// Replace a range of raw digits.
    ///
    /// Anything but digits is removed from the text. The inserted
    /// digits are truncated to fit max_length.
    /// Listeners are notified once, if the digits changed.
    ///
    /// Returns the number of inserted digits.
    pub(crate) fn replace_raw(&mut self, range: Range<usize>, text: &str, now: Instant) -> usize {
        let old = self.raw.raw_text();
        let start = range.start.min(old.len());
        let end = range.end.clamp(start, old.len());

        let remain = old.len() - (end - start);
        let room = self.raw.max_length().saturating_sub(remain);
        let digits = text
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(room)
            .collect::<String>();

        let append = start == old.len() && !digits.is_empty();

        let mut new_raw = String::with_capacity(remain + digits.len());
        new_raw.push_str(&old[..start]);
        new_raw.push_str(&digits);
        new_raw.push_str(&old[end..]);

        self.raw.apply(&new_raw);
        self.sync_display();

        let cursor = self.from_raw(start + digits.len());
        self.set_cursor(cursor, false);

        if append && self.has_animation {
            self.animation.start(now);
        }

        digits.len()
    }

    /// Replace the display text. Used for edits of the host text.
    /// The cursor is set to the given host position.
    pub(crate) fn replace_display(&mut self, display: &str, cursor: usize) {
        let raw = self.fmt.unformat(display);
        self.raw.apply(&raw);
        self.sync_display();
        self.set_cursor(cursor, false);
    }

    fn sync_display(&mut self) {
        self.display = self.fmt.format(self.raw.raw_text());
    }
}
