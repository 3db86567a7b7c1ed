//! Zobrist hashing for position identification
//!
//! Each (cell, player) pair owns a random 64-bit value; a position hashes to
//! the XOR of the values of its occupied cells. XOR makes the hash
//! order-independent and allows O(1) incremental updates.
//!
//! The side to move is not hashed: in normal play it follows from the mark
//! counts. The empty board therefore always hashes to zero.
//!
//! # Example
//!
//! ```
//! use tictac::board::{Mark, Position};
//! use tictac::search::ZobristTable;
//!
//! let zt = ZobristTable::with_seed(7);
//! let empty = Position::empty(3, Mark::X).unwrap();
//! assert_eq!(zt.hash(&empty), 0);
//!
//! let next = empty.play(4).unwrap();
//! assert_eq!(zt.update(0, 4, Mark::X), zt.hash(&next));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Mark, Position, MAX_CELLS};

/// Zobrist hash table for position hashing.
///
/// Immutable after construction; share it by reference (or `Arc`) with every
/// search that needs consistent keys.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    /// Random values for X marks at each cell
    x: [u64; MAX_CELLS],
    /// Random values for O marks at each cell
    o: [u64; MAX_CELLS],
}

impl ZobristTable {
    /// Create a table seeded from the process random source.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Create a reproducible table from a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut x = [0u64; MAX_CELLS];
        let mut o = [0u64; MAX_CELLS];
        for i in 0..MAX_CELLS {
            x[i] = nonzero(rng);
            o[i] = nonzero(rng);
        }
        Self { x, o }
    }

    #[inline]
    fn value(&self, index: usize, mark: Mark) -> u64 {
        match mark {
            Mark::X => self.x[index],
            Mark::O => self.o[index],
            Mark::Empty => 0,
        }
    }

    /// Compute the full hash of a position.
    #[must_use]
    pub fn hash(&self, position: &Position) -> u64 {
        position
            .cells()
            .iter()
            .enumerate()
            .fold(0, |h, (i, &mark)| h ^ self.value(i, mark))
    }

    /// Incrementally add (or, applied twice, remove) `mark` at `index`.
    #[inline]
    #[must_use]
    pub fn update(&self, hash: u64, index: usize, mark: Mark) -> u64 {
        hash ^ self.value(index, mark)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero would make a mark invisible to the hash.
fn nonzero<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    loop {
        let v: u64 = rng.random();
        if v != 0 {
            return v;
        }
    }
}
