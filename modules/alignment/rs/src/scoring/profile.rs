use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};
use num::Zero;

use super::symbols;
use super::Score;

/// A position described by a distribution over residues instead of a single residue.
/// Weights are normalized to sum to one.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve)]
pub struct Profile<R, S: Score> {
    values: Vec<(R, S)>,
}

impl<R, S: Score> Profile<R, S> {
    pub fn new(values: Vec<(R, S)>) -> Result<Self> {
        ensure!(!values.is_empty(), "Profile must contain at least one residue");

        let mut total = S::zero();
        for (_, weight) in &values {
            ensure!(
                weight.is_finite() && *weight >= S::zero(),
                "Profile weights must be finite and non-negative, got {weight:?}"
            );
            total = total + *weight;
        }
        ensure!(total > S::zero(), "Profile weights must not sum to zero");

        let values = values
            .into_iter()
            .map(|(residue, weight)| (residue, weight / total))
            .collect();
        Ok(Self { values })
    }

    /// Equal weight for every residue.
    pub fn uniform(residues: impl IntoIterator<Item = R>) -> Result<Self> {
        Self::new(residues.into_iter().map(|x| (x, S::one())).collect())
    }

    /// A position that is known exactly.
    pub fn singleton(residue: R) -> Self {
        Self {
            values: vec![(residue, S::one())],
        }
    }
}

impl<R, S: Score> From<R> for Profile<R, S> {
    fn from(residue: R) -> Self {
        Self::singleton(residue)
    }
}

/// Lifts a residue scorer to profile positions: the expected residue score when both
/// residues are drawn from their profile distributions.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Profiled<M> {
    pub residues: M,
}

impl<M> Profiled<M> {
    pub fn new(residues: M) -> Self {
        Self { residues }
    }
}

impl<M: symbols::Scorer> symbols::Scorer for Profiled<M> {
    type Score = M::Score;
    type Symbol = Profile<M::Symbol, M::Score>;

    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::Score {
        let mut total = M::Score::zero();
        for (ra, wa) in a.values() {
            for (rb, wb) in b.values() {
                total = total + *wa * *wb * self.residues.score(ra, rb);
            }
        }
        total
    }
}
