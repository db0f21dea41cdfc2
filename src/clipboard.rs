//!
//! Clipboard access for the card-entry.
//!
//! The widget only needs plain text. Connect the clipboard crate of
//! your choice by implementing [Clipboard].
//!
//! Without any setup a [LocalClipboard] is used, which only works
//! within the application.
//!

use crate::CardError;
use dyn_clone::{DynClone, clone_box};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

#[derive(Debug)]
pub struct ClipboardError;

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for ClipboardError {}

impl From<ClipboardError> for CardError {
    fn from(_value: ClipboardError) -> Self {
        CardError::Clipboard
    }
}

/// Access some clipboard.
pub trait Clipboard: DynClone + Debug {
    /// Get text from the clipboard.
    fn get_string(&self) -> Result<String, ClipboardError>;

    /// Set text to the clipboard.
    fn set_string(&self, s: &str) -> Result<(), ClipboardError>;
}

thread_local! {
    static GLOBAL_CLIPBOARD: RefCell<Box<dyn Clipboard>> =
        RefCell::new(Box::new(LocalClipboard::new()));
}

/// Get a clone of the default clipboard.
pub fn global_clipboard() -> Box<dyn Clipboard> {
    GLOBAL_CLIPBOARD.with(|c| c.borrow().clone())
}

/// Change the default clipboard.
///
/// Only widgets created afterward will use the new clipboard.
pub fn set_global_clipboard(clipboard: impl Clipboard + 'static) {
    GLOBAL_CLIPBOARD.with(|c| *c.borrow_mut() = Box::new(clipboard));
}

/// Local clipboard.
/// A string in disguise. Clones share the same text.
#[derive(Debug, Default, Clone)]
pub struct LocalClipboard {
    text: Rc<RefCell<String>>,
}

impl LocalClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for LocalClipboard {
    fn get_string(&self) -> Result<String, ClipboardError> {
        match self.text.try_borrow() {
            Ok(v) => Ok(v.clone()),
            Err(_) => Err(ClipboardError),
        }
    }

    fn set_string(&self, s: &str) -> Result<(), ClipboardError> {
        match self.text.try_borrow_mut() {
            Ok(mut v) => {
                *v = s.to_string();
                Ok(())
            }
            Err(_) => Err(ClipboardError),
        }
    }
}

impl Clone for Box<dyn Clipboard> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl Clipboard for Box<dyn Clipboard> {
    fn get_string(&self) -> Result<String, ClipboardError> {
        self.as_ref().get_string()
    }

    fn set_string(&self, s: &str) -> Result<(), ClipboardError> {
        self.as_ref().set_string(s)
    }
}
