use itertools::Itertools;
use num::{One, Zero};

use super::{symbols, ColumnScorer};

/// Default column scorer.
/// Columns with at least one gap score the fixed `gap` value. Gapless columns score the mean
/// of the residue scores over all unordered pairs of slots, and a single-slot column scores zero.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SumOfPairs<M: symbols::Scorer> {
    pub residues: M,
    pub gap: M::Score,
}

impl<M: symbols::Scorer> SumOfPairs<M> {
    pub fn new(residues: M, gap: M::Score) -> Self {
        Self { residues, gap }
    }
}

impl<M: symbols::Scorer> ColumnScorer for SumOfPairs<M> {
    type Score = M::Score;
    type Symbol = M::Symbol;

    fn score(&self, column: &[Option<&Self::Symbol>]) -> Self::Score {
        if column.iter().any(|x| x.is_none()) {
            return self.gap;
        }

        let (mut total, mut pairs) = (M::Score::zero(), M::Score::zero());
        for (a, b) in column.iter().flatten().tuple_combinations() {
            total = total + self.residues.score(a, b);
            pairs = pairs + M::Score::one();
        }

        if pairs.is_zero() {
            M::Score::zero()
        } else {
            total / pairs
        }
    }
}
