//! Utilities with compact bit data structures.

use num_traits::{PrimInt, Unsigned};

#[derive(Debug)]
/// Iterator over the indices of the set bits of an integer,
/// from least to most significant.
///
/// # Example
///
/// ```
/// use morris_game::util::bits::BitIter;
/// let b = BitIter::new(0b10011u32);
/// assert_eq!(b.collect::<Vec<_>>(), vec![0, 1, 4]);
/// ```
pub struct BitIter<N: PrimInt + Unsigned> {
    left: N,
}

impl<N: PrimInt + Unsigned> BitIter<N> {
    pub fn new(left: N) -> Self {
        BitIter { left }
    }
}

impl<N: PrimInt + Unsigned> Iterator for BitIter<N> {
    type Item = u8;

    fn next(&mut self) -> Option<<Self as Iterator>::Item> {
        if self.left == N::zero() {
            None
        } else {
            let index = self.left.trailing_zeros() as u8;
            self.left = self.left & (self.left - N::one());
            Some(index)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.left.count_ones() as usize;
        (count, Some(count))
    }
}

impl<N: PrimInt + Unsigned> ExactSizeIterator for BitIter<N> {}

/// Return the index of the `n`-th set bit of `x`, counting from the least significant bit.
pub fn get_nth_set_bit<N: PrimInt + Unsigned>(mut x: N, n: u32) -> u8 {
    for _ in 0..n {
        x = x & (x - N::one());
    }
    debug_assert!(x != N::zero());
    x.trailing_zeros() as u8
}
