use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

/// One sequence of an alignment: aligned symbols (`None` is a gap) and the half-open range
/// of the original sequence they cover.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve)]
pub struct Row<Symbol> {
    symbols: Vec<Option<Symbol>>,
    range: Range<usize>,
}

impl<Symbol> Row<Symbol> {
    pub fn new(symbols: Vec<Option<Symbol>>, range: Range<usize>) -> Result<Self> {
        let residues = symbols.iter().filter(|x| x.is_some()).count();
        ensure!(
            range.start <= range.end && range.len() == residues,
            "Row with {residues} residues can't cover the original range {range:?}"
        );
        Ok(Self { symbols, range })
    }

    /// Aligned length, including gaps.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of gap slots.
    pub fn gaps(&self) -> usize {
        self.symbols.iter().filter(|x| x.is_none()).count()
    }

    /// Non-gap symbols in alignment order.
    pub fn residues(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().flatten()
    }
}

impl Row<u8> {
    /// Text representation with gaps rendered as the `gap` character.
    pub fn to_text(&self, gap: char) -> String {
        self.symbols
            .iter()
            .map(|x| match x {
                Some(symbol) => *symbol as char,
                None => gap,
            })
            .collect()
    }
}
