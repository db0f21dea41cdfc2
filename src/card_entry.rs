//! Card-number input widget.
//!
//! * Accepts only digits, up to the maximum length.
//! * The digits are shown in parts with a gap between them.
//! * Each part is underlined, complete parts with a different style.
//! * Optional selection-fix that keeps the cursor out of the gaps.
//! * Optional animation for the last digit when appending.
//! * Text selection with keyboard + mouse.
//! * Copy/paste without the separators.
//!
//! ```rust ignore
//! use rat_cardentry::card_entry::{CardEntry, CardEntryState};
//! use ratatui_core::widgets::StatefulWidget;
//!
//! let mut state = CardEntryState::new()
//!     .with_selection_fix(true)
//!     .with_animation(true);
//! state.on_pin_change(|complete, len| {
//!     log::debug!("complete {} {}", complete, len);
//! });
//!
//! CardEntry::new()
//!     .styles(THEME.card_style())
//!     .render(area, frame.buffer_mut(), &mut state);
//! if let Some((x, y)) = state.screen_cursor() {
//!     frame.set_cursor_position((x, y));
//! }
//! ```
//!
//! The animation needs a regular call to [CardEntryState::tick] and
//! a repaint as long as it returns true.
//!
//! Event handling by calling the freestanding fn [handle_events].
//! There's [handle_mouse_events] if you want to override the default key bindings but keep
//! the mouse behaviour.
//!

use crate::_private::NonExhaustive;
use crate::clipboard::Clipboard;
use crate::edit_op;
use crate::event::{ReadOnly, TextOutcome};
use crate::layout::{CardLayout, GlyphCanvas, GlyphMetrics, LayoutConfig, LayoutStyle};
use crate::{
    CardCore, CardError, CardStyle, HasScreenCursor, PartitionSpec, TextFocusGained,
    TextFocusLost,
};
use rat_event::util::MouseFlags;
use rat_event::{HandleEvent, MouseOnly, Regular, ct_event};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use rat_reloc::{RelocatableState, relocate_area, relocate_dark_offset};
use ratatui_core::buffer::Buffer;
use ratatui_core::layout::{Rect, Size};
use ratatui_core::style::{Modifier, Style};
use ratatui_core::symbols::line;
use ratatui_core::widgets::{StatefulWidget, Widget};
use ratatui_crossterm::crossterm::event::Event;
use ratatui_widgets::block::{Block, BlockExt};
use std::ops::Range;
use std::time::Instant;

/// Card-number input widget.
///
/// # Stateful
/// This widget implements [`StatefulWidget`], you can use it with
/// [`CardEntryState`] to handle common actions.
#[derive(Debug, Clone)]
pub struct CardEntry<'a> {
    block: Option<Block<'a>>,
    style: Style,
    focus_style: Option<Style>,
    select_style: Option<Style>,
    line_style: Option<Style>,
    filled_line_style: Option<Style>,
    has_line: bool,
    on_focus_gained: TextFocusGained,
    on_focus_lost: TextFocusLost,
}

/// State & event-handling.
#[derive(Debug)]
pub struct CardEntryState {
    /// The whole area with block.
    /// __read only__ renewed with each render.
    pub area: Rect,
    /// Area inside a possible block.
    /// __read only__ renewed with each render.
    pub inner: Rect,
    /// Dark offset due to clipping.
    /// __read only__ secondary offset due to clipping.
    pub dark_offset: (u16, u16),

    /// Editing core
    pub value: CardCore,
    /// Any edit will clear the value first.
    /// This flag will be reset by any edit and navigation.
    pub overwrite: bool,
    /// Focus behaviour.
    /// __read only__
    pub on_focus_gained: TextFocusGained,
    /// Focus behaviour.
    /// __read only__
    pub on_focus_lost: TextFocusLost,

    /// Current focus state.
    /// __read+write__
    pub focus: FocusFlag,

    /// Mouse selection in progress.
    /// __read+write__
    pub mouse: MouseFlags,

    /// Construct with `..Default::default()`
    pub non_exhaustive: NonExhaustive,
}

impl Default for CardEntry<'_> {
    fn default() -> Self {
        Self {
            block: Default::default(),
            style: Default::default(),
            focus_style: Default::default(),
            select_style: Default::default(),
            line_style: Default::default(),
            filled_line_style: Default::default(),
            has_line: true,
            on_focus_gained: Default::default(),
            on_focus_lost: Default::default(),
        }
    }
}

impl<'a> CardEntry<'a> {
    /// New widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined style.
    #[inline]
    pub fn styles_opt(self, styles: Option<CardStyle>) -> Self {
        if let Some(styles) = styles {
            self.styles(styles)
        } else {
            self
        }
    }

    /// Set the combined style.
    #[inline]
    pub fn styles(mut self, styles: CardStyle) -> Self {
        self.style = styles.style;
        if styles.focus.is_some() {
            self.focus_style = styles.focus;
        }
        if styles.select.is_some() {
            self.select_style = styles.select;
        }
        if styles.line.is_some() {
            self.line_style = styles.line;
        }
        if styles.filled_line.is_some() {
            self.filled_line_style = styles.filled_line;
        }
        if let Some(of) = styles.on_focus_gained {
            self.on_focus_gained = of;
        }
        if let Some(of) = styles.on_focus_lost {
            self.on_focus_lost = of;
        }
        if let Some(border_style) = styles.border_style {
            self.block = self.block.map(|v| v.border_style(border_style));
        }
        if styles.block.is_some() {
            self.block = styles.block;
        }
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Base text style.
    #[inline]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Style when focused.
    #[inline]
    pub fn focus_style(mut self, style: impl Into<Style>) -> Self {
        self.focus_style = Some(style.into());
        self
    }

    /// Style for selection
    #[inline]
    pub fn select_style(mut self, style: impl Into<Style>) -> Self {
        self.select_style = Some(style.into());
        self
    }

    /// Style for the line below a part.
    #[inline]
    pub fn line_style(mut self, style: impl Into<Style>) -> Self {
        self.line_style = Some(style.into());
        self
    }

    /// Style for the line below a complete part.
    #[inline]
    pub fn filled_line_style(mut self, style: impl Into<Style>) -> Self {
        self.filled_line_style = Some(style.into());
        self
    }

    /// Show the lines below the parts. Uses a second row.
    ///
    /// Default is true.
    #[inline]
    pub fn has_line(mut self, has_line: bool) -> Self {
        self.has_line = has_line;
        self
    }

    /// Block.
    #[inline]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self.block = self.block.map(|v| v.style(self.style));
        self
    }

    /// Focus behaviour
    #[inline]
    pub fn on_focus_gained(mut self, of: TextFocusGained) -> Self {
        self.on_focus_gained = of;
        self
    }

    /// Focus behaviour
    #[inline]
    pub fn on_focus_lost(mut self, of: TextFocusLost) -> Self {
        self.on_focus_lost = of;
        self
    }

    /// Size needed to show all digits, including the block.
    pub fn size(&self, partition: &PartitionSpec) -> Size {
        let layout = CardLayout::compute(
            partition,
            "",
            0..0,
            None,
            &terminal_config(self.has_line),
            &CellMetrics,
        );

        let area = Rect::new(0, 0, 20, 20);
        let inner = self.block.inner_if_some(area);
        let block_width = area.width - inner.width;
        let block_height = area.height - inner.height;

        let rows = if self.has_line { 2 } else { 1 };

        Size::new(layout.width as u16 + block_width, rows + block_height)
    }
}

impl<'a> StatefulWidget for &CardEntry<'a> {
    type State = CardEntryState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for CardEntry<'_> {
    type State = CardEntryState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(widget: &CardEntry<'_>, area: Rect, buf: &mut Buffer, state: &mut CardEntryState) {
    state.area = area;
    state.inner = widget.block.inner_if_some(area);
    state.on_focus_gained = widget.on_focus_gained;
    state.on_focus_lost = widget.on_focus_lost;

    let style = widget.style;
    let focus_style = if let Some(focus_style) = widget.focus_style {
        focus_style
    } else {
        style
    };
    let select_style = if let Some(select_style) = widget.select_style {
        select_style
    } else {
        Style::default().black().on_yellow()
    };
    let line_style = if let Some(line_style) = widget.line_style {
        line_style
    } else {
        Style::default().dark_gray()
    };
    let filled_line_style = if let Some(filled_line_style) = widget.filled_line_style {
        filled_line_style
    } else {
        style
    };

    let (style, select_style) = if state.focus.get() {
        (
            style.patch(focus_style),
            style.patch(focus_style).patch(select_style),
        )
    } else {
        (style, style)
    };

    // set base style
    if let Some(block) = &widget.block {
        block.render(area, buf);
    } else {
        buf.set_style(area, style);
    }

    if state.inner.width == 0 || state.inner.height == 0 {
        // noop
        return;
    }

    let layout = state.layout(widget.has_line, Instant::now());
    let mut canvas = BufferCanvas {
        buf,
        area: state.inner,
    };
    layout.draw(
        &mut canvas,
        &LayoutStyle {
            text: style,
            selection: select_style,
            line: style.patch(line_style),
            filled_line: style.patch(filled_line_style),
        },
    );
}

/// Every glyph uses one cell.
#[derive(Debug)]
struct CellMetrics;

impl GlyphMetrics for CellMetrics {
    fn glyph_width(&self, _c: char) -> f32 {
        1.0
    }
}

/// Digits go to the first row, the lines to the second.
fn terminal_config(has_line: bool) -> LayoutConfig {
    LayoutConfig {
        char_width: Some(1.0),
        line_spacing: 1.0,
        line_thickness: 1.0,
        padding_left: 0.0,
        padding_right: 0.0,
        bottom: 1.0,
        has_line,
    }
}

/// Draws to a buffer area.
#[derive(Debug)]
struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl BufferCanvas<'_> {
    fn cell_pos(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let cx = x.floor() as u16;
        let cy = y.round() as u16;
        if cx >= self.area.width || cy >= self.area.height {
            return None;
        }
        Some((self.area.x + cx, self.area.y + cy))
    }
}

impl GlyphCanvas for BufferCanvas<'_> {
    type Color = Style;

    fn draw_glyph(&mut self, c: char, x: f32, y: f32, color: Style, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let Some(pos) = self.cell_pos(x, y) else {
            return;
        };
        // no transparency, fade-in is shown as dim
        let style = if alpha < 128 {
            color.add_modifier(Modifier::DIM)
        } else {
            color
        };
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_char(c);
            cell.set_style(style);
        }
    }

    fn draw_rect(&mut self, x0: f32, y0: f32, x1: f32, _y1: f32, color: Style) {
        let mut x = x0;
        while x < x1 {
            if let Some(pos) = self.cell_pos(x, y0) {
                if let Some(cell) = self.buf.cell_mut(pos) {
                    cell.set_symbol(line::HORIZONTAL);
                    cell.set_style(color);
                }
            }
            x += 1.0;
        }
    }
}

impl Clone for CardEntryState {
    fn clone(&self) -> Self {
        Self {
            area: self.area,
            inner: self.inner,
            dark_offset: self.dark_offset,
            value: self.value.clone(),
            overwrite: Default::default(),
            on_focus_gained: Default::default(),
            on_focus_lost: Default::default(),
            focus: self.focus.new_instance(),
            mouse: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl Default for CardEntryState {
    fn default() -> Self {
        Self {
            area: Default::default(),
            inner: Default::default(),
            dark_offset: Default::default(),
            value: Default::default(),
            overwrite: Default::default(),
            on_focus_gained: Default::default(),
            on_focus_lost: Default::default(),
            focus: Default::default(),
            mouse: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl HasFocus for CardEntryState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl CardEntryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            focus: FocusFlag::new().with_name(name),
            ..CardEntryState::default()
        }
    }

    /// With a different partition.
    ///
    /// Fails if max_length can't be split in part_count parts of equal length.
    pub fn with_partition(
        mut self,
        max_length: usize,
        part_count: usize,
        space_count: usize,
    ) -> Result<Self, CardError> {
        let partition = PartitionSpec::new(max_length, part_count, space_count)?;
        self.value.set_partition(partition);
        Ok(self)
    }

    /// With the selection-fix.
    #[inline]
    pub fn with_selection_fix(mut self, fix: bool) -> Self {
        self.value.set_selection_fix(fix);
        self
    }

    /// With the animation of appended digits.
    #[inline]
    pub fn with_animation(mut self, animation: bool) -> Self {
        self.value.set_animation(animation);
        self
    }

    /// Change the partition. Truncates the digits if necessary.
    #[inline]
    pub fn set_partition(&mut self, partition: PartitionSpec) {
        self.value.set_partition(partition);
    }

    #[inline]
    pub fn partition(&self) -> &PartitionSpec {
        self.value.partition()
    }

    /// Keep the cursor and the selection out of the gaps between
    /// the parts.
    #[inline]
    pub fn set_selection_fix(&mut self, fix: bool) {
        self.value.set_selection_fix(fix);
    }

    #[inline]
    pub fn selection_fix(&self) -> bool {
        self.value.selection_fix()
    }

    /// Animate appended digits.
    #[inline]
    pub fn set_animation(&mut self, animation: bool) {
        self.value.set_animation(animation);
    }

    #[inline]
    pub fn has_animation(&self) -> bool {
        self.value.has_animation()
    }

    /// Advance the animation.
    ///
    /// Returns true as long as a repaint is needed.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.value.tick(Instant::now())
    }

    /// The next edit operation will overwrite the current content
    /// instead of adding text. Any move operations will cancel
    /// this overwrite.
    #[inline]
    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    /// Will the next edit operation overwrite the content?
    #[inline]
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

impl CardEntryState {
    /// Listener for the completion state.
    ///
    /// Called with (complete, length) after each change of the digits.
    #[inline]
    pub fn on_pin_change(&mut self, f: impl Fn(bool, usize) + 'static) {
        self.value.on_pin_change(f);
    }

    /// Listener for the digits.
    #[inline]
    pub fn on_number_change(&mut self, f: impl Fn(&str) + 'static) {
        self.value.on_number_change(f);
    }
}

impl CardEntryState {
    /// Clipboard used.
    /// Default is to use the global_clipboard().
    #[inline]
    pub fn set_clipboard(&mut self, clip: Option<impl Clipboard + 'static>) {
        match clip {
            None => self.value.set_clipboard(None),
            Some(v) => self.value.set_clipboard(Some(Box::new(v))),
        }
    }

    /// Clipboard used.
    /// Default is to use the global_clipboard().
    #[inline]
    pub fn clipboard(&self) -> Option<&dyn Clipboard> {
        self.value.clipboard()
    }

    /// Copy the selected digits to the clipboard.
    #[inline]
    pub fn copy_to_clip(&mut self) -> bool {
        edit_op::clip_result(edit_op::copy_to_clip(&self.value))
    }

    /// Cut the selected digits to the clipboard.
    #[inline]
    pub fn cut_to_clip(&mut self) -> bool {
        edit_op::clip_result(edit_op::cut_to_clip(&mut self.value))
    }

    /// Paste from the clipboard.
    #[inline]
    pub fn paste_from_clip(&mut self) -> bool {
        edit_op::clip_result(edit_op::paste_from_clip(&mut self.value))
    }
}

impl CardEntryState {
    /// The digits without any separators.
    #[inline]
    pub fn numbers(&self) -> &str {
        self.value.numbers()
    }

    /// Text as shown, with the separators.
    #[inline]
    pub fn display_text(&self) -> &str {
        self.value.display()
    }

    /// Host text. This is the display text with the selection-fix,
    /// the digits otherwise. Cursor and selection refer to this text.
    #[inline]
    pub fn text(&self) -> &str {
        self.value.text()
    }

    /// All digits entered.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.value.is_complete()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Length of the host text.
    #[inline]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.value.cursor()
    }

    #[inline]
    pub fn anchor(&self) -> usize {
        self.value.anchor()
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.value.has_selection()
    }

    #[inline]
    pub fn selection(&self) -> Range<usize> {
        self.value.selection()
    }

    /// Selection as range of digits.
    #[inline]
    pub fn raw_selection(&self) -> Range<usize> {
        self.value.raw_selection()
    }

    /// Selected digits without separators.
    #[inline]
    pub fn selected_text(&self) -> String {
        edit_op::copy_text(&self.value)
    }

    /// Set the cursor position.
    #[inline]
    pub fn set_cursor(&mut self, cursor: usize, extend_selection: bool) -> bool {
        self.value.set_cursor(cursor, extend_selection)
    }

    /// Set the selection.
    #[inline]
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) -> bool {
        self.value.set_selection(anchor, cursor)
    }

    #[inline]
    pub fn select_all(&mut self) -> bool {
        self.value.select_all()
    }

    /// Cursor to 0 and no selection.
    #[inline]
    pub fn set_default_cursor(&mut self) {
        self.value.set_cursor(0, false);
    }
}

impl CardEntryState {
    /// Replace the number. Anything but digits is removed.
    #[inline]
    pub fn set_text<S: AsRef<str>>(&mut self, s: S) {
        edit_op::set_text(&mut self.value, s.as_ref());
    }

    /// Clear the number.
    #[inline]
    pub fn clear(&mut self) -> bool {
        edit_op::clear(&mut self.value)
    }

    /// Insert a char at the cursor.
    #[inline]
    pub fn insert_char(&mut self, c: char) -> bool {
        edit_op::insert_char(&mut self.value, c)
    }

    /// Insert a str at the cursor.
    #[inline]
    pub fn insert_str(&mut self, t: &str) -> bool {
        edit_op::insert_str(&mut self.value, t)
    }

    /// Paste text at the cursor.
    #[inline]
    pub fn paste_str(&mut self, t: &str) -> bool {
        edit_op::paste_str(&mut self.value, t)
    }

    /// Delete the selection.
    #[inline]
    pub fn delete_selection(&mut self) -> bool {
        edit_op::delete_selection(&mut self.value)
    }

    /// Backspace.
    #[inline]
    pub fn delete_prev_char(&mut self) -> bool {
        edit_op::delete_prev_char(&mut self.value)
    }

    /// Delete.
    #[inline]
    pub fn delete_next_char(&mut self) -> bool {
        edit_op::delete_next_char(&mut self.value)
    }

    #[inline]
    pub fn move_left(&mut self, extend_selection: bool) -> bool {
        edit_op::move_left(&mut self.value, extend_selection)
    }

    #[inline]
    pub fn move_right(&mut self, extend_selection: bool) -> bool {
        edit_op::move_right(&mut self.value, extend_selection)
    }

    #[inline]
    pub fn move_to_line_start(&mut self, extend_selection: bool) -> bool {
        edit_op::move_to_start(&mut self.value, extend_selection)
    }

    #[inline]
    pub fn move_to_line_end(&mut self, extend_selection: bool) -> bool {
        edit_op::move_to_end(&mut self.value, extend_selection)
    }

    #[inline]
    pub fn move_to_prev_part(&mut self, extend_selection: bool) -> bool {
        edit_op::move_to_prev_part(&mut self.value, extend_selection)
    }

    #[inline]
    pub fn move_to_next_part(&mut self, extend_selection: bool) -> bool {
        edit_op::move_to_next_part(&mut self.value, extend_selection)
    }

    /// Select the part at the cursor.
    #[inline]
    pub fn select_part(&mut self) -> bool {
        edit_op::select_part(&mut self.value)
    }
}

impl HasScreenCursor for CardEntryState {
    /// The current text cursor as an absolute screen position.
    #[inline]
    fn screen_cursor(&self) -> Option<(u16, u16)> {
        if self.is_focused() {
            if self.has_selection() {
                None
            } else {
                let sc = self.col_to_screen(self.cursor())?;
                if sc > self.inner.width + self.dark_offset.0 {
                    None
                } else {
                    Some((self.inner.x + sc, self.inner.y))
                }
            }
        } else {
            None
        }
    }
}

impl RelocatableState for CardEntryState {
    fn relocate(&mut self, shift: (i16, i16), clip: Rect) {
        // clip offset for some corrections.
        self.dark_offset = relocate_dark_offset(self.inner, shift, clip);
        self.area = relocate_area(self.area, shift, clip);
        self.inner = relocate_area(self.inner, shift, clip);
    }
}

impl CardEntryState {
    fn layout(&self, has_line: bool, now: Instant) -> CardLayout {
        let config = terminal_config(has_line);
        let tail = if self.value.animation().is_animating(now) {
            Some(self.value.tail_frame(now, config.line_spacing))
        } else {
            None
        };
        CardLayout::compute(
            self.value.partition(),
            self.value.numbers(),
            self.value.raw_selection(),
            tail,
            &config,
            &CellMetrics,
        )
    }

    /// Converts from a widget relative screen coordinate to a
    /// position in the host text.
    pub fn screen_to_col(&self, scx: i16) -> usize {
        let scx = scx + self.dark_offset.0 as i16;
        if scx < 0 {
            return 0;
        }
        let layout = self.layout(false, Instant::now());
        let raw = layout.raw_at(scx as f32, self.numbers().len());
        self.value.from_raw(raw)
    }

    /// Converts a position in the host text to a widget relative
    /// screen coordinate.
    pub fn col_to_screen(&self, pos: usize) -> Option<u16> {
        let raw = self.value.to_raw(pos);
        let before_gap = self.value.is_separator(pos);
        let layout = self.layout(false, Instant::now());
        let x = layout.cell_x(raw, before_gap) as u16;
        x.checked_sub(self.dark_offset.0)
    }

    /// Set the cursor position from a screen position relative to the origin
    /// of the widget.
    pub fn set_screen_cursor(&mut self, cursor: i16, extend_selection: bool) -> bool {
        let c = self.screen_to_col(cursor);
        self.set_cursor(c, extend_selection)
    }

    /// Select the part at the screen position relative to the origin
    /// of the widget.
    pub fn select_screen_part(&mut self, cursor: i16) -> bool {
        let c = self.screen_to_col(cursor);
        self.value.set_cursor(c, false);
        self.select_part()
    }
}

impl HandleEvent<Event, Regular, TextOutcome> for CardEntryState {
    fn handle(&mut self, event: &Event, _keymap: Regular) -> TextOutcome {
        // small helper ...
        fn tc(
            state: &mut CardEntryState,
            op: impl FnOnce(&mut CardEntryState) -> bool,
        ) -> TextOutcome {
            let old = state.numbers().to_string();
            if op(state) {
                if old != state.numbers() {
                    TextOutcome::TextChanged
                } else {
                    TextOutcome::Changed
                }
            } else {
                TextOutcome::Unchanged
            }
        }
        fn overwrite(state: &mut CardEntryState) {
            if state.overwrite {
                state.overwrite = false;
                state.clear();
            }
        }
        fn clear_overwrite(state: &mut CardEntryState) {
            state.overwrite = false;
        }

        // focus behaviour
        if self.lost_focus() {
            match self.on_focus_lost {
                TextFocusLost::None => {}
                TextFocusLost::Position0 => {
                    self.set_default_cursor();
                    // repaint is triggered by focus-change
                }
            }
        }
        if self.gained_focus() {
            match self.on_focus_gained {
                TextFocusGained::None => {}
                TextFocusGained::Overwrite => {
                    self.overwrite = true;
                }
                TextFocusGained::SelectAll => {
                    self.select_all();
                    // repaint is triggered by focus-change
                }
            }
        }

        let mut r = if self.is_focused() {
            match event {
                ct_event!(key press c) | ct_event!(key press SHIFT-c) => {
                    if c.is_ascii_digit() {
                        overwrite(self);
                        let c = *c;
                        tc(self, |s| s.insert_char(c))
                    } else {
                        TextOutcome::Unchanged
                    }
                }
                ct_event!(paste value) => {
                    overwrite(self);
                    tc(self, |s| s.paste_str(value))
                }
                ct_event!(keycode press Backspace) => {
                    clear_overwrite(self);
                    tc(self, |s| s.delete_prev_char())
                }
                ct_event!(keycode press Delete) => {
                    clear_overwrite(self);
                    tc(self, |s| s.delete_next_char())
                }
                ct_event!(key press CONTROL-'x') => {
                    clear_overwrite(self);
                    tc(self, |s| s.cut_to_clip())
                }
                ct_event!(key press CONTROL-'v') => {
                    overwrite(self);
                    tc(self, |s| s.paste_from_clip())
                }
                ct_event!(key press CONTROL-'d') => {
                    clear_overwrite(self);
                    tc(self, |s| s.clear())
                }

                ct_event!(key release _)
                | ct_event!(key release SHIFT-_)
                | ct_event!(keycode release Backspace)
                | ct_event!(keycode release Delete)
                | ct_event!(key release CONTROL-'x')
                | ct_event!(key release CONTROL-'v')
                | ct_event!(key release CONTROL-'d') => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        };

        if r == TextOutcome::Continue {
            r = self.handle(event, ReadOnly);
        }
        r
    }
}

impl HandleEvent<Event, ReadOnly, TextOutcome> for CardEntryState {
    fn handle(&mut self, event: &Event, _keymap: ReadOnly) -> TextOutcome {
        fn clear_overwrite(state: &mut CardEntryState) {
            state.overwrite = false;
        }

        let mut r = if self.is_focused() {
            match event {
                ct_event!(keycode press Left) => {
                    clear_overwrite(self);
                    self.move_left(false).into()
                }
                ct_event!(keycode press Right) => {
                    clear_overwrite(self);
                    self.move_right(false).into()
                }
                ct_event!(keycode press CONTROL-Left) => {
                    clear_overwrite(self);
                    self.move_to_prev_part(false).into()
                }
                ct_event!(keycode press CONTROL-Right) => {
                    clear_overwrite(self);
                    self.move_to_next_part(false).into()
                }
                ct_event!(keycode press Home) => {
                    clear_overwrite(self);
                    self.move_to_line_start(false).into()
                }
                ct_event!(keycode press End) => {
                    clear_overwrite(self);
                    self.move_to_line_end(false).into()
                }
                ct_event!(keycode press SHIFT-Left) => {
                    clear_overwrite(self);
                    self.move_left(true).into()
                }
                ct_event!(keycode press SHIFT-Right) => {
                    clear_overwrite(self);
                    self.move_right(true).into()
                }
                ct_event!(keycode press CONTROL_SHIFT-Left) => {
                    clear_overwrite(self);
                    self.move_to_prev_part(true).into()
                }
                ct_event!(keycode press CONTROL_SHIFT-Right) => {
                    clear_overwrite(self);
                    self.move_to_next_part(true).into()
                }
                ct_event!(keycode press SHIFT-Home) => {
                    clear_overwrite(self);
                    self.move_to_line_start(true).into()
                }
                ct_event!(keycode press SHIFT-End) => {
                    clear_overwrite(self);
                    self.move_to_line_end(true).into()
                }
                ct_event!(key press CONTROL-'a') => {
                    clear_overwrite(self);
                    self.select_all().into()
                }
                ct_event!(key press CONTROL-'c') => {
                    clear_overwrite(self);
                    self.copy_to_clip().into()
                }

                ct_event!(keycode release Left)
                | ct_event!(keycode release Right)
                | ct_event!(keycode release CONTROL-Left)
                | ct_event!(keycode release CONTROL-Right)
                | ct_event!(keycode release Home)
                | ct_event!(keycode release End)
                | ct_event!(keycode release SHIFT-Left)
                | ct_event!(keycode release SHIFT-Right)
                | ct_event!(keycode release CONTROL_SHIFT-Left)
                | ct_event!(keycode release CONTROL_SHIFT-Right)
                | ct_event!(keycode release SHIFT-Home)
                | ct_event!(keycode release SHIFT-End)
                | ct_event!(key release CONTROL-'a')
                | ct_event!(key release CONTROL-'c') => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        };

        if r == TextOutcome::Continue {
            r = self.handle(event, MouseOnly);
        }
        r
    }
}

impl HandleEvent<Event, MouseOnly, TextOutcome> for CardEntryState {
    fn handle(&mut self, event: &Event, _keymap: MouseOnly) -> TextOutcome {
        fn clear_overwrite(state: &mut CardEntryState) {
            state.overwrite = false;
        }

        match event {
            ct_event!(mouse any for m) if self.mouse.drag(self.inner, m) => {
                let c = (m.column as i16) - (self.inner.x as i16);
                clear_overwrite(self);
                self.set_screen_cursor(c, true).into()
            }
            ct_event!(mouse any for m) if self.mouse.doubleclick(self.inner, m) => {
                let c = (m.column as i16) - (self.inner.x as i16);
                clear_overwrite(self);
                self.select_screen_part(c).into()
            }
            ct_event!(mouse down Left for column,row) => {
                if self.gained_focus() {
                    // don't react to the first click that's for
                    // focus. this one shouldn't demolish the selection.
                    TextOutcome::Unchanged
                } else if self.inner.contains((*column, *row).into()) {
                    let c = (column - self.inner.x) as i16;
                    clear_overwrite(self);
                    self.set_screen_cursor(c, false).into()
                } else {
                    TextOutcome::Continue
                }
            }
            ct_event!(mouse down SHIFT-Left for column,row) => {
                if self.inner.contains((*column, *row).into()) {
                    let c = (column - self.inner.x) as i16;
                    clear_overwrite(self);
                    self.set_screen_cursor(c, true).into()
                } else {
                    TextOutcome::Continue
                }
            }
            _ => TextOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Text events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_events(state: &mut CardEntryState, focus: bool, event: &Event) -> TextOutcome {
    state.focus.set(focus);
    state.handle(event, Regular)
}

/// Handle only navigation events.
/// Text events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_readonly_events(
    state: &mut CardEntryState,
    focus: bool,
    event: &Event,
) -> TextOutcome {
    state.focus.set(focus);
    state.handle(event, ReadOnly)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(state: &mut CardEntryState, event: &Event) -> TextOutcome {
    state.handle(event, MouseOnly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_alpha() {
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        let mut canvas = BufferCanvas {
            buf: &mut buf,
            area,
        };
        canvas.draw_glyph('1', 0.0, 0.0, Style::new(), 0);
        canvas.draw_glyph('2', 1.0, 0.0, Style::new(), 64);
        canvas.draw_glyph('3', 2.0, 0.0, Style::new(), 128);

        assert_eq!(buf[(0u16, 0u16)].symbol(), " ");
        assert_eq!(buf[(1u16, 0u16)].symbol(), "2");
        assert!(buf[(1u16, 0u16)].modifier.contains(Modifier::DIM));
        assert_eq!(buf[(2u16, 0u16)].symbol(), "3");
        assert!(!buf[(2u16, 0u16)].modifier.contains(Modifier::DIM));
    }
}
