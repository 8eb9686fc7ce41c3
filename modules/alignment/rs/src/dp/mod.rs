pub use backtrack::Backtracker;
pub use cell::CellScorer;
pub use fill::{fill, fill_wavefront};

pub mod backtrack;
pub mod cell;
mod fill;
