use std::rc::Rc;
use std::sync::Arc;

use impl_tools::autoimpl;

pub use matrix::SubstitutionMatrix;
pub use multalign_core_rs::num::Score;
pub use profile::{Profile, Profiled};
pub use sum_of_pairs::SumOfPairs;

mod matrix;
mod profile;
mod sum_of_pairs;
pub mod symbols;

/// Scores a single alignment column: one slot per aligned sequence, `None` marks a gap.
///
/// Implementations must be pure functions of the column. The backtracking re-evaluates
/// columns and compares the results to the stored optimum exactly.
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
pub trait ColumnScorer {
    type Score: Score;
    type Symbol;

    fn score(&self, column: &[Option<&Self::Symbol>]) -> Self::Score;
}
