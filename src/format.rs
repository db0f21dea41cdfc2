//!
//! Display format of the card-number.
//!
//! The raw digits are split into parts of part_length digits,
//! the parts are joined with space_count spaces.
//!
//! ```
//! use rat_cardentry::format::DisplayFormatter;
//! use rat_cardentry::PartitionSpec;
//!
//! let fmt = DisplayFormatter::new(PartitionSpec::default());
//! assert_eq!(fmt.format("123456789"), "1234 5678 9");
//! assert_eq!(fmt.unformat("1234 5678 9"), "123456789");
//! assert_eq!(fmt.raw_to_display(4, 9), 5);
//! assert_eq!(fmt.display_to_raw(5, "1234 5678 9"), 4);
//! ```
//!

use crate::PartitionSpec;

/// Converts between raw digits and the display text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormatter {
    partition: PartitionSpec,
}

impl DisplayFormatter {
    pub fn new(partition: PartitionSpec) -> Self {
        Self { partition }
    }

    #[inline]
    pub fn partition(&self) -> &PartitionSpec {
        &self.partition
    }

    /// The separator between two parts.
    pub fn separator(&self) -> String {
        " ".repeat(self.partition.space_count())
    }

    /// Raw digits to display text.
    ///
    /// Doesn't check the raw text, anything goes.
    pub fn format(&self, raw: &str) -> String {
        let part_length = self.partition.part_length();
        let space_count = self.partition.space_count();

        let mut buf = String::with_capacity(self.partition.display_len(raw.len()));
        for (i, c) in raw.chars().enumerate() {
            if i > 0 && i % part_length == 0 {
                for _ in 0..space_count {
                    buf.push(' ');
                }
            }
            buf.push(c);
        }
        buf
    }

    /// Display text to raw digits.
    ///
    /// Removes the spaces and anything that is not a digit.
    pub fn unformat(&self, display: &str) -> String {
        display
            .chars()
            .filter(|c| *c != ' ')
            .filter(|c| c.is_ascii_digit())
            .collect()
    }

    /// Display text to raw digits, and reformat.
    pub fn reformat(&self, display: &str) -> String {
        self.format(&self.unformat(display))
    }

    /// Raw index to display index.
    ///
    /// The raw index i must be in the range `0..=raw_len`.
    /// The index at the start of a part maps to the position
    /// after the separator.
    pub fn raw_to_display(&self, i: usize, raw_len: usize) -> usize {
        let i = i.min(raw_len);
        let part_length = self.partition.part_length();
        let seps = (i / part_length).min(self.partition.separators(raw_len));
        i + self.partition.space_count() * seps
    }

    /// Display index to raw index.
    ///
    /// This is the number of digits before the display index.
    /// An index inside a separator maps to the start of the
    /// following part.
    pub fn display_to_raw(&self, j: usize, display: &str) -> usize {
        display
            .chars()
            .take(j)
            .filter(|c| c.is_ascii_digit())
            .count()
    }

    /// Is the display position at or inside a separator.
    /// True if the char after the position is a space.
    pub fn is_separator(&self, j: usize, display: &str) -> bool {
        display.as_bytes().get(j) == Some(&b' ')
    }
}
