use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use impl_tools::autoimpl;

use crate::scoring::Score;

/// Score of aligning two residues against each other.
/// Column scorers assume the score doesn't depend on the order of arguments.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
pub trait Scorer {
    type Score: Score;
    type Symbol;

    fn score(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Self::Score;
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Equality<S: Score, Symbol> {
    pub equal: S,
    pub different: S,
    _phantom: PhantomData<Symbol>,
}

impl<S: Score, Symbol: PartialEq> Scorer for Equality<S, Symbol> {
    type Score = S;
    type Symbol = Symbol;

    #[inline(always)]
    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::Score {
        if a == b {
            self.equal
        } else {
            self.different
        }
    }
}

impl<S: Score, Symbol: PartialEq> Equality<S, Symbol> {
    pub fn new(equal: S, different: S) -> Self {
        Self {
            equal,
            different,
            _phantom: Default::default(),
        }
    }
}
