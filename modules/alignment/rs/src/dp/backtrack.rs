use std::rc::Rc;

use eyre::{ensure, Result};
use log::trace;
use multalign_core_rs::Alignable;

use crate::alignment::{Alignment, Row, ScoredAlignment};
use crate::scoring::ColumnScorer;
use crate::tensor::Tensor;

use super::cell::CellScorer;

// Residue offset of every sequence in a column, None for gaps
type Column = Box<[Option<usize>]>;

struct Node {
    column: Column,
    next: Option<Rc<Node>>,
}

/// Columns of a partially recovered path, first column at the head.
/// Clones share their tails, so branching at a tie doesn't copy the path.
#[derive(Clone, Default)]
struct AlignmentData {
    head: Option<Rc<Node>>,
}

impl AlignmentData {
    fn prepend(&self, column: Column) -> Self {
        Self {
            head: Some(Rc::new(Node {
                column,
                next: self.head.clone(),
            })),
        }
    }

    fn columns(&self) -> impl Iterator<Item = &Column> {
        std::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
            .map(|node| &node.column)
    }
}

impl Drop for AlignmentData {
    // Unlink uniquely owned nodes one by one to keep long paths from exhausting the stack
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// Recovers every optimal path through a filled score tensor.
pub struct Backtracker<'a, A, C: ColumnScorer> {
    cell: &'a CellScorer<'a, A, C>,
    tensor: &'a Tensor<C::Score>,
    trim_flanks: bool,
}

impl<'a, A, C> Backtracker<'a, A, C>
where
    C: ColumnScorer,
    C::Symbol: Clone,
    A: Alignable<Symbol = C::Symbol>,
{
    pub fn new(cell: &'a CellScorer<'a, A, C>, tensor: &'a Tensor<C::Score>) -> Self {
        Self {
            cell,
            tensor,
            trim_flanks: true,
        }
    }

    /// Whether leading and trailing columns with gaps are removed from reported alignments.
    pub fn trim_flanks(mut self, trim_flanks: bool) -> Self {
        self.trim_flanks = trim_flanks;
        self
    }

    /// All tie-optimal alignments, each paired with the score of the final cell.
    /// Paths are explored depth-first and reported in the order they reach the origin.
    pub fn run(&self) -> Result<Vec<ScoredAlignment<C::Score, C::Symbol>>> {
        ensure!(
            self.tensor.rank() == self.cell.depth(),
            "Score tensor of rank {} doesn't match {} sequences",
            self.tensor.rank(),
            self.cell.depth()
        );
        let extents = self.tensor.shape().iter().zip(self.cell.sequences());
        for (dim, (extent, sequence)) in extents.enumerate() {
            ensure!(
                *extent == sequence.len() + 1,
                "Score tensor dimension {dim} has {extent} cells, expected {}",
                sequence.len() + 1
            );
        }

        let last = self.tensor.last();
        let score = *self.tensor.get(&last)?;

        let mut results = Vec::new();
        if is_origin(&last) {
            results.push(ScoredAlignment::new(self.convert(&AlignmentData::default())?, score));
            return Ok(results);
        }

        let mut stack = vec![(last, AlignmentData::default())];
        while let Some((coordinate, data)) = stack.pop() {
            let target = *self.tensor.get(&coordinate)?;

            let mut matched = false;
            for direction in self.cell.directions() {
                let step = self.cell.step(self.tensor, direction, &coordinate)?;
                let (predecessor, candidate) = match step {
                    Some(step) => step,
                    None => continue,
                };
                if candidate != target {
                    continue;
                }
                matched = true;

                let column = coordinate
                    .iter()
                    .enumerate()
                    .map(|(dim, pos)| direction.advances(dim).then(|| pos - 1))
                    .collect();
                let data = data.prepend(column);

                if is_origin(&predecessor) {
                    results.push(ScoredAlignment::new(self.convert(&data)?, score));
                    trace!("Recovered optimal path #{}", results.len());
                } else {
                    stack.push((predecessor, data));
                }
            }

            ensure!(
                matched,
                "No move reproduces the stored score {target:?} at {coordinate:?}"
            );
        }
        Ok(results)
    }

    fn convert(&self, data: &AlignmentData) -> Result<Alignment<C::Symbol>> {
        let columns: Vec<&Column> = data.columns().collect();

        let (start, end) = if self.trim_flanks {
            let gapless = |column: &&Column| column.iter().all(|x| x.is_some());
            match columns.iter().position(gapless) {
                Some(start) => {
                    let end = columns.len() - columns.iter().rev().position(gapless).unwrap_or(0);
                    (start, end)
                }
                None => (0, 0),
            }
        } else {
            (0, columns.len())
        };
        let window = &columns[start..end];

        let mut rows = Vec::with_capacity(self.cell.depth());
        for (dim, sequence) in self.cell.sequences().iter().enumerate() {
            let symbols: Vec<_> = window
                .iter()
                .map(|column| column[dim].map(|pos| sequence.at(pos).clone()))
                .collect();

            let mut covered = window.iter().filter_map(|column| column[dim]);
            let range = match covered.next() {
                Some(first) => first..covered.last().unwrap_or(first) + 1,
                None => 0..0,
            };
            rows.push(Row::new(symbols, range)?);
        }
        Alignment::new(rows)
    }
}

fn is_origin(coordinate: &[usize]) -> bool {
    coordinate.iter().all(|x| *x == 0)
}
