pub use aligner::{Aligner, Builder};
pub use alignment::{Alignment, Conservation, Row, ScoredAlignment};
pub use multalign_core_rs::Alignable;
pub use scoring::Score;

pub mod aligner;
pub mod alignment;
pub mod coords;
pub mod dp;
pub mod scoring;
pub mod tensor;
