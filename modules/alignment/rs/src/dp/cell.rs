use eyre::{ensure, Result};
use multalign_core_rs::Alignable;
use num::Zero;

use crate::coords::{Direction, Directions};
use crate::scoring::ColumnScorer;
use crate::tensor::Tensor;

/// Recurrence of the global alignment score over a tensor of shape `(L1 + 1, ..., LN + 1)`:
///
/// `score(p) = max over directions d with p - d >= 0 of score(p - d) + column(d, p)`
///
/// The origin has no valid direction and scores zero.
pub struct CellScorer<'a, A, C> {
    sequences: &'a [A],
    scorer: &'a C,
    directions: Directions,
}

impl<'a, A, C> CellScorer<'a, A, C>
where
    C: ColumnScorer,
    A: Alignable<Symbol = C::Symbol>,
{
    pub fn new(sequences: &'a [A], scorer: &'a C) -> Result<Self> {
        Ok(Self {
            sequences,
            scorer,
            directions: Directions::new(sequences.len())?,
        })
    }

    /// Number of aligned sequences.
    pub fn depth(&self) -> usize {
        self.sequences.len()
    }

    pub fn sequences(&self) -> &'a [A] {
        self.sequences
    }

    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    fn validate(&self, direction: &Direction, coordinate: &[usize]) -> Result<()> {
        ensure!(
            direction.rank() == self.depth(),
            "Direction of rank {} can't be applied to {} sequences",
            direction.rank(),
            self.depth()
        );
        ensure!(
            coordinate.len() == self.depth(),
            "Coordinate {coordinate:?} doesn't match {} sequences",
            self.depth()
        );
        Ok(())
    }

    /// Column produced by moving along the `direction` into the `coordinate`.
    /// Sequence `i` contributes its residue `coordinate[i] - 1` if it advances, and a gap otherwise.
    pub fn column(
        &self,
        direction: &Direction,
        coordinate: &[usize],
    ) -> Result<Vec<Option<&'a C::Symbol>>> {
        self.validate(direction, coordinate)?;

        let mut column = Vec::with_capacity(self.depth());
        for (dim, (sequence, pos)) in self.sequences.iter().zip(coordinate).enumerate() {
            if direction.advances(dim) {
                ensure!(
                    (1..=sequence.len()).contains(pos),
                    "Sequence {dim} has no residue before position {pos}"
                );
                column.push(Some(sequence.at(pos - 1)));
            } else {
                column.push(None);
            }
        }
        Ok(column)
    }

    pub fn column_score(&self, direction: &Direction, coordinate: &[usize]) -> Result<C::Score> {
        let column = self.column(direction, coordinate)?;
        Ok(self.scorer.score(&column))
    }

    /// Predecessor of the `coordinate` along the `direction` and the candidate score of the move.
    /// Returns None if the predecessor falls outside of the tensor.
    pub fn step(
        &self,
        tensor: &Tensor<C::Score>,
        direction: &Direction,
        coordinate: &[usize],
    ) -> Result<Option<(Vec<usize>, C::Score)>> {
        self.validate(direction, coordinate)?;
        let predecessor = match direction.predecessor(coordinate) {
            Some(predecessor) => predecessor,
            None => return Ok(None),
        };

        let score = *tensor.get(&predecessor)? + self.column_score(direction, coordinate)?;
        Ok(Some((predecessor, score)))
    }

    /// Best score over all moves ending in the `coordinate`.
    pub fn score(&self, tensor: &Tensor<C::Score>, coordinate: &[usize]) -> Result<C::Score> {
        let mut best: Option<C::Score> = None;
        for direction in &self.directions {
            if let Some((_, candidate)) = self.step(tensor, direction, coordinate)? {
                best = Some(match best {
                    Some(score) if score >= candidate => score,
                    _ => candidate,
                });
            }
        }
        Ok(best.unwrap_or_else(C::Score::zero))
    }
}
