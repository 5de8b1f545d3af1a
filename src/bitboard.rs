//! Fixed-size grid masks packed into an unsigned integer.
//!
//! Boards keep two of these per player: which cells hold a ship and which
//! cells have already been fired upon. An `N×N` grid must fit in `T`.

use core::fmt;

use num_traits::{PrimInt, Unsigned};

use crate::ship::Cell;

/// Integer types a mask can be stored in.
pub trait MaskWord: PrimInt + Unsigned {}

impl<T: PrimInt + Unsigned> MaskWord for T {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// `cell` lies outside the `N×N` grid.
    OutOfGrid { cell: Cell, size: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::OutOfGrid { cell, size } => {
                write!(f, "Cell {} is outside the {}x{} grid", cell, size, size)
            }
        }
    }
}

impl std::error::Error for BitBoardError {}

/// Set of cells on an `N×N` grid, one bit per cell in row-major order.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T: MaskWord, const N: usize> {
    bits: T,
}

impl<T: MaskWord, const N: usize> BitBoard<T, N> {
    pub fn new() -> Self {
        Self { bits: T::zero() }
    }

    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn contains(&self, cell: Cell) -> Result<bool, BitBoardError> {
        let bit = Self::bit(cell)?;
        Ok(!(self.bits & bit).is_zero())
    }

    /// Adds `cell`. Returns `false` if it was already present.
    pub fn insert(&mut self, cell: Cell) -> Result<bool, BitBoardError> {
        let bit = Self::bit(cell)?;
        let fresh = (self.bits & bit).is_zero();
        self.bits = self.bits | bit;
        Ok(fresh)
    }

    fn bit(cell: Cell) -> Result<T, BitBoardError> {
        if cell.x >= N || cell.y >= N {
            return Err(BitBoardError::OutOfGrid { cell, size: N });
        }
        Ok(T::one() << (cell.y * N + cell.x))
    }
}

impl<T: MaskWord, const N: usize> Default for BitBoard<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MaskWord, const N: usize> fmt::Debug for BitBoard<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", N)?;
        for y in 0..N {
            for x in 0..N {
                let set = !((self.bits >> (y * N + x)) & T::one()).is_zero();
                write!(f, "{} ", if set { '■' } else { '□' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
