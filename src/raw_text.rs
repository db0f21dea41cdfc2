//!
//! The canonical digits of the card-number.
//!
//! Holds only digits, never more than max_length.
//! Listeners are notified after each mutation that actually
//! changed the digits.
//!

use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Listener for completion changes. Called with (is_complete, length).
pub type PinChangeFn = Rc<dyn Fn(bool, usize)>;
/// Listener for number changes. Called with the raw digits.
pub type NumberChangeFn = Rc<dyn Fn(&str)>;

/// Raw digits.
#[derive(Clone)]
pub struct RawText {
    max_length: usize,
    text: String,
    pin_change: Vec<PinChangeFn>,
    number_change: Vec<NumberChangeFn>,
}

impl Debug for RawText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawText")
            .field("max_length", &self.max_length)
            .field("text", &self.text)
            .field("pin_change", &self.pin_change.len())
            .field("number_change", &self.number_change.len())
            .finish()
    }
}

impl RawText {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            text: String::new(),
            pin_change: Vec::new(),
            number_change: Vec::new(),
        }
    }

    /// Maximum number of digits.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Change the maximum length.
    /// Truncates the current digits, listeners are notified.
    pub fn set_max_length(&mut self, max_length: usize) -> bool {
        self.max_length = max_length;
        let text = self.text.clone();
        self.apply(&text)
    }

    /// The digits.
    #[inline]
    pub fn raw_text(&self) -> &str {
        self.text.as_str()
    }

    /// Number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// All digits entered.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.text.len() == self.max_length
    }

    /// Replace the digits with the candidate.
    ///
    /// Anything but digits is removed, the result is truncated
    /// to max_length.
    ///
    /// Returns true if the digits changed.
    pub fn apply(&mut self, candidate: &str) -> bool {
        let new_text = only_digits(candidate, self.max_length);
        if new_text == self.text {
            return false;
        }
        self.text = new_text;
        self.notify();
        true
    }

    /// Clear the digits.
    pub fn clear(&mut self) -> bool {
        self.apply("")
    }

    /// Add a listener for the completion state.
    ///
    /// The listener must not modify the widget.
    pub fn on_pin_change(&mut self, f: impl Fn(bool, usize) + 'static) {
        self.pin_change.push(Rc::new(f));
    }

    /// Add a listener for the raw digits.
    ///
    /// The listener must not modify the widget.
    pub fn on_number_change(&mut self, f: impl Fn(&str) + 'static) {
        self.number_change.push(Rc::new(f));
    }

    /// Remove all listeners.
    pub fn clear_listeners(&mut self) {
        self.pin_change.clear();
        self.number_change.clear();
    }

    fn notify(&self) {
        let complete = self.is_complete();
        let len = self.len();
        for f in &self.pin_change {
            f(complete, len);
        }
        for f in &self.number_change {
            f(self.text.as_str());
        }
    }
}

/// Only the digits of the text, truncated to max_length.
pub fn only_digits(text: &str, max_length: usize) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_length)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_apply() {
        let mut r = RawText::new(8);
        assert!(r.apply("12 34-x5"));
        assert_eq!(r.raw_text(), "12345");
        assert!(!r.is_complete());
        assert!(r.apply("1234 5678 9"));
        assert_eq!(r.raw_text(), "12345678");
        assert!(r.is_complete());
        assert!(!r.apply("1234-5678"));
    }

    #[test]
    fn test_notify_once() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut r = RawText::new(4);
        let l = log.clone();
        r.on_pin_change(move |c, n| l.borrow_mut().push(format!("{} {}", c, n)));
        let l = log.clone();
        r.on_number_change(move |s| l.borrow_mut().push(s.to_string()));

        r.apply("12");
        r.apply("12");
        r.apply("1 2");
        r.apply("12345");
        assert_eq!(
            log.borrow().as_slice(),
            &["false 2", "12", "true 4", "1234"]
        );
    }
}
