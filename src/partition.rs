//!
//! How the number is split into parts.
//!

use crate::CardError;

/// Splits a number of `max_length` digits into `part_count` parts
/// of equal length. The parts are separated by `space_count` spaces
/// in the display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionSpec {
    max_length: usize,
    part_count: usize,
    space_count: usize,
}

impl Default for PartitionSpec {
    /// 16 digits, 4 parts, 1 space.
    fn default() -> Self {
        Self {
            max_length: 16,
            part_count: 4,
            space_count: 1,
        }
    }
}

impl PartitionSpec {
    /// New partition.
    ///
    /// Fails if max_length can't be divided into part_count parts of
    /// equal length.
    pub fn new(max_length: usize, part_count: usize, space_count: usize) -> Result<Self, CardError> {
        if max_length == 0 {
            return Err(CardError::ZeroLength);
        }
        if part_count == 0 {
            return Err(CardError::ZeroParts);
        }
        if max_length % part_count != 0 {
            return Err(CardError::UnevenPartition {
                max_length,
                part_count,
            });
        }
        Ok(Self {
            max_length,
            part_count,
            space_count,
        })
    }

    /// Maximum number of digits.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of parts.
    #[inline]
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    /// Number of spaces between two parts.
    #[inline]
    pub fn space_count(&self) -> usize {
        self.space_count
    }

    /// Digits per part.
    #[inline]
    pub fn part_length(&self) -> usize {
        self.max_length / self.part_count
    }

    /// Number of separators for a raw text of length n.
    ///
    /// There is no separator after the last part, even if that
    /// part is complete.
    #[inline]
    pub fn separators(&self, n: usize) -> usize {
        let n = n.min(self.max_length);
        if n == 0 {
            0
        } else {
            (n - 1) / self.part_length()
        }
    }

    /// Length of the display text for a raw text of length n.
    #[inline]
    pub fn display_len(&self, n: usize) -> usize {
        n.min(self.max_length) + self.space_count * self.separators(n)
    }

    /// Maximum length of the display text.
    #[inline]
    pub fn max_display_len(&self) -> usize {
        self.display_len(self.max_length)
    }

    /// Number of complete parts for a raw text of length n.
    #[inline]
    pub fn filled_parts(&self, n: usize) -> usize {
        n.min(self.max_length) / self.part_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(PartitionSpec::new(0, 4, 1), Err(CardError::ZeroLength));
        assert_eq!(PartitionSpec::new(16, 0, 1), Err(CardError::ZeroParts));
        assert_eq!(
            PartitionSpec::new(15, 4, 1),
            Err(CardError::UnevenPartition {
                max_length: 15,
                part_count: 4
            })
        );
        assert!(PartitionSpec::new(15, 3, 0).is_ok());
    }

    #[test]
    fn test_separators() {
        let p = PartitionSpec::default();
        assert_eq!(p.part_length(), 4);
        assert_eq!(p.separators(0), 0);
        assert_eq!(p.separators(4), 0);
        assert_eq!(p.separators(5), 1);
        assert_eq!(p.separators(16), 3);
        assert_eq!(p.display_len(16), 19);
        assert_eq!(p.max_display_len(), 19);
        assert_eq!(p.filled_parts(7), 1);
        assert_eq!(p.filled_parts(8), 2);
    }
}
