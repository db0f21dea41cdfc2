#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod animation;
pub mod card_entry;
pub mod clipboard;
pub mod edit_op;
pub mod format;
pub mod layout;
pub mod partition;
pub mod raw_text;
pub mod selection;

mod card_core;

pub use card_core::CardCore;
pub use partition::PartitionSpec;
pub use rat_cursor::HasScreenCursor;

use crate::_private::NonExhaustive;
use ratatui_core::style::Style;
use ratatui_widgets::block::Block;

pub mod event {
    //!
    //! Event-handler traits and Keybindings.
    //!

    pub use rat_event::*;

    /// Runs only the navigation events, not any editing.
    #[derive(Debug)]
    pub struct ReadOnly;

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum TextOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        /// Further processing for this event may stop.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it.
        /// Further processing for this event may stop.
        /// Rendering the ui is advised.
        Changed,
        /// The card number has changed.
        TextChanged,
    }

    impl ConsumedEvent for TextOutcome {
        fn is_consumed(&self) -> bool {
            *self != TextOutcome::Continue
        }
    }

    // Useful for converting most navigation/edit results.
    impl From<bool> for TextOutcome {
        fn from(value: bool) -> Self {
            if value {
                TextOutcome::Changed
            } else {
                TextOutcome::Unchanged
            }
        }
    }

    impl From<Outcome> for TextOutcome {
        fn from(value: Outcome) -> Self {
            match value {
                Outcome::Continue => TextOutcome::Continue,
                Outcome::Unchanged => TextOutcome::Unchanged,
                Outcome::Changed => TextOutcome::Changed,
            }
        }
    }

    impl From<TextOutcome> for Outcome {
        fn from(value: TextOutcome) -> Self {
            match value {
                TextOutcome::Continue => Outcome::Continue,
                TextOutcome::Unchanged => Outcome::Unchanged,
                TextOutcome::Changed => Outcome::Changed,
                TextOutcome::TextChanged => Outcome::Changed,
            }
        }
    }
}

/// This flag sets the behaviour of the widget when
/// it detects that it gained focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextFocusGained {
    /// None
    #[default]
    None,
    /// Editing overwrites the current content.
    /// Any movement resets this flag and allows editing.
    Overwrite,
    /// Select all text on focus gain.
    SelectAll,
}

/// This flag sets the behaviour of the widget when
/// it detects that it lost focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextFocusLost {
    /// None
    #[default]
    None,
    /// Clears the selection and sets the cursor to 0.
    Position0,
}

/// Combined style for the widget.
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub style: Style,
    pub focus: Option<Style>,
    pub select: Option<Style>,
    /// Underline of a part that is not complete yet.
    pub line: Option<Style>,
    /// Underline of a complete part.
    pub filled_line: Option<Style>,

    /// Focus behaviour.
    pub on_focus_gained: Option<TextFocusGained>,
    /// Focus behaviour.
    pub on_focus_lost: Option<TextFocusLost>,

    pub block: Option<Block<'static>>,
    pub border_style: Option<Style>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            focus: None,
            select: None,
            line: None,
            filled_line: None,
            on_focus_gained: None,
            on_focus_lost: None,
            block: None,
            border_style: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

/// Errors for the card-entry.
///
/// User input never fails, it is filtered and truncated instead.
/// Only the configuration and the clipboard can go wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    /// The maximum length is 0.
    ZeroLength,
    /// The part count is 0.
    ZeroParts,
    /// The maximum length can't be split into parts of equal length.
    UnevenPartition { max_length: usize, part_count: usize },
    /// Clipboard error occurred.
    Clipboard,
}

impl Display for CardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for CardError {}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
