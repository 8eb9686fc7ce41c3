use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, From, Into};
use eyre::{ensure, Result};

use multalign_core_rs::num::Score;

use super::conservation::Conservation;
use super::row::Row;

/// Column-aligned set of N sequences (N is the depth of the alignment).
#[derive(Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve)]
pub struct Alignment<Symbol> {
    rows: Vec<Row<Symbol>>,
}

impl<Symbol> Alignment<Symbol> {
    pub fn new(rows: Vec<Row<Symbol>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            for (ind, row) in rows.iter().enumerate() {
                ensure!(
                    row.len() == first.len(),
                    "All aligned sequences must have the same length, row {ind} has {} columns instead of {}",
                    row.len(),
                    first.len()
                );
            }
        }
        Ok(Self { rows })
    }

    /// Number of aligned sequences.
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.rows.first().map_or(0, |x| x.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols of the given column, `None` marks a gap.
    pub fn column(&self, ind: usize) -> Option<Vec<Option<&Symbol>>> {
        if ind >= self.len() {
            return None;
        }
        Some(self.rows.iter().map(|x| x.symbols()[ind].as_ref()).collect())
    }

    pub fn columns(&self) -> impl Iterator<Item = Vec<Option<&Symbol>>> + '_ {
        (0..self.len()).map(|ind| {
            self.rows
                .iter()
                .map(|x| x.symbols()[ind].as_ref())
                .collect()
        })
    }

    /// Returns true if no column contains a gap.
    pub fn is_gapless(&self) -> bool {
        self.rows.iter().all(|x| x.gaps() == 0)
    }

    /// Per-column conservation summary.
    pub fn conservation(&self) -> Vec<Conservation>
    where
        Symbol: PartialEq,
    {
        self.columns()
            .map(|column| Conservation::classify(&column))
            .collect()
    }

    /// Conservation summary as a string, e.g. "**.-*".
    pub fn conservation_line(&self) -> String
    where
        Symbol: PartialEq,
    {
        self.conservation().iter().map(|x| x.symbol()).collect()
    }
}

impl Alignment<u8> {
    /// Text representation of every row with gaps rendered as the `gap` character.
    pub fn to_text(&self, gap: char) -> Vec<String> {
        self.rows.iter().map(|x| x.to_text(gap)).collect()
    }
}

/// An alignment together with its total score.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve, Constructor, From, Into)]
pub struct ScoredAlignment<S: Score, Symbol> {
    alignment: Alignment<Symbol>,
    score: S,
}
