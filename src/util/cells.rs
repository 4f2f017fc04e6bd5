use std::fmt::{Debug, Formatter};
use std::ops::{BitAnd, BitOr, Not};

use crate::util::bits::{get_nth_set_bit, BitIter};

/// The number of positions on a Morris board.
pub const CELL_COUNT: u8 = 24;

/// A set of board positions, stored as a bitmask over the 24 cells.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Cells(u32);

impl Cells {
    pub const EMPTY: Cells = Cells(0);
    pub const FULL: Cells = Cells((1 << CELL_COUNT) - 1);

    #[must_use]
    pub const fn new(bits: u32) -> Cells {
        assert!(bits & !Self::FULL.0 == 0);
        Cells(bits)
    }

    #[must_use]
    pub const fn single(pos: u8) -> Cells {
        assert!(pos < CELL_COUNT);
        Cells(1 << pos)
    }

    #[must_use]
    pub fn from_slice(positions: &[u8]) -> Cells {
        positions.iter().fold(Cells::EMPTY, |acc, &pos| acc.set(pos))
    }

    #[must_use]
    pub const fn inner(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn has(self, pos: u8) -> bool {
        pos < CELL_COUNT && (self.0 >> pos) & 1 != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[must_use]
    pub const fn count(self) -> u8 {
        self.0.count_ones() as u8
    }

    #[must_use]
    pub const fn set(self, pos: u8) -> Cells {
        Cells(self.0 | (1 << pos))
    }

    #[must_use]
    pub const fn clear(self, pos: u8) -> Cells {
        Cells(self.0 & !(1 << pos))
    }

    /// The `index`-th position in this set, in increasing order.
    #[must_use]
    pub fn get_nth(self, index: u32) -> u8 {
        assert!(index < self.count() as u32);
        get_nth_set_bit(self.0, index)
    }

    pub fn iter(self) -> BitIter<u32> {
        BitIter::new(self.0)
    }
}

impl IntoIterator for Cells {
    type Item = u8;
    type IntoIter = BitIter<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<u8> for Cells {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        iter.into_iter().fold(Cells::EMPTY, |acc, pos| acc.set(pos))
    }
}

impl BitOr for Cells {
    type Output = Cells;

    fn bitor(self, rhs: Self) -> Self::Output {
        Cells(self.0 | rhs.0)
    }
}

impl BitAnd for Cells {
    type Output = Cells;

    fn bitand(self, rhs: Self) -> Self::Output {
        Cells(self.0 & rhs.0)
    }
}

impl Not for Cells {
    type Output = Cells;

    fn not(self) -> Self::Output {
        Cells(!self.0 & Self::FULL.0)
    }
}

impl Debug for Cells {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
