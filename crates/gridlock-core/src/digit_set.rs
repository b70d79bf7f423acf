//! A set of digits from 1 to 9, stored as a 9-bit mask.
//!
//! [`DigitSet`] backs duplicate detection on the board, the candidate domains
//! of the forward-checking strategies, and the distinct-value counts of the
//! local search evaluation function. Iteration is always ascending.
//!
//! # Examples
//!
//! ```
//! use gridlock_core::DigitSet;
//!
//! let mut set = DigitSet::EMPTY;
//! set.insert(3);
//! set.insert(7);
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(3));
//! assert!(!set.contains(4));
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 7]);
//! ```

/// A set of digits 1-9, represented as a bitmask.
///
/// Bits 0-8 of the inner `u16` represent the digits 1-9 respectively. All
/// operations are constant time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet(u16);

const MASK_ALL: u16 = 0x1ff;

fn bit(digit: u8) -> u16 {
    assert!(
        (1..=9).contains(&digit),
        "digit must be between 1 and 9, got {digit}"
    );
    1 << (digit - 1)
}

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// The set containing every digit 1-9.
    pub const FULL: Self = Self(MASK_ALL);

    /// Returns `true` if the set contains `digit`.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    #[must_use]
    pub fn contains(self, digit: u8) -> bool {
        self.0 & bit(digit) != 0
    }

    /// Inserts `digit`, returning `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    pub fn insert(&mut self, digit: u8) -> bool {
        let bit = bit(digit);
        let inserted = self.0 & bit == 0;
        self.0 |= bit;
        inserted
    }

    /// Removes `digit`, returning `true` if it was present.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-9.
    pub fn remove(&mut self, digit: u8) -> bool {
        let bit = bit(digit);
        let removed = self.0 & bit != 0;
        self.0 &= !bit;
        removed
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the digits of `self` that are not in `other`.
    #[must_use]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0 & MASK_ALL)
    }

    /// Returns the digits missing from the set.
    #[must_use]
    pub fn missing(self) -> Self {
        Self::FULL.difference(self)
    }

    /// Returns an ascending iterator over the digits in the set.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&digit| self.contains(digit))
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}
