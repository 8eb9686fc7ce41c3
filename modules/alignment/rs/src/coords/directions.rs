use eyre::{ensure, Result};

use super::enumerator::{DigitOrder, Enumerator};

/// A single move through the score tensor.
/// Sequence `i` consumes one residue when `bits[i] == 1` and receives a gap when `bits[i] == 0`.
/// The all-zero vector is never a valid direction.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Direction {
    bits: Vec<u8>,
}

impl Direction {
    pub fn new(bits: Vec<u8>) -> Result<Self> {
        ensure!(
            bits.iter().all(|x| *x <= 1),
            "Direction must be a binary vector, got {bits:?}"
        );
        ensure!(
            bits.iter().any(|x| *x == 1),
            "Direction must advance at least one sequence"
        );
        Ok(Self { bits })
    }

    /// Number of sequences the direction is defined for.
    pub fn rank(&self) -> usize {
        self.bits.len()
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Returns true if the sequence `dim` consumes a residue in this move.
    #[inline(always)]
    pub fn advances(&self, dim: usize) -> bool {
        self.bits[dim] == 1
    }

    /// Number of sequences that consume a residue in this move.
    pub fn advanced(&self) -> usize {
        self.bits.iter().filter(|x| **x == 1).count()
    }

    /// Coordinate from which this move leads to `coordinate`.
    /// Returns None if any component would become negative.
    pub fn predecessor(&self, coordinate: &[usize]) -> Option<Vec<usize>> {
        debug_assert_eq!(coordinate.len(), self.bits.len());
        coordinate
            .iter()
            .zip(&self.bits)
            .map(|(pos, bit)| pos.checked_sub(*bit as usize))
            .collect()
    }
}

/// All 2^R - 1 non-zero directions of rank R, ordered by their binary value with
/// the sequence 0 as the least significant bit.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Directions {
    rank: usize,
    all: Vec<Direction>,
}

impl Directions {
    pub fn new(rank: usize) -> Result<Self> {
        ensure!(
            rank < usize::BITS as usize,
            "Too many sequences to enumerate alignment directions: {rank}"
        );

        let enumerator = Enumerator::new(vec![vec![0u8, 1u8]; rank], DigitOrder::LowestFirst)?;
        // Index 0 is the all-gap move that doesn't advance any sequence
        let all = (1..enumerator.size())
            .map(|index| enumerator.encode(index).map(|bits| Direction { bits }))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rank, all })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.all.iter()
    }
}

impl<'a> IntoIterator for &'a Directions {
    type Item = &'a Direction;
    type IntoIter = std::slice::Iter<'a, Direction>;

    fn into_iter(self) -> Self::IntoIter {
        self.all.iter()
    }
}
