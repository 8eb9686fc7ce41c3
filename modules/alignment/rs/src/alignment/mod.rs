pub use alignment::{Alignment, ScoredAlignment};
pub use conservation::Conservation;
pub use row::Row;

mod alignment;
mod conservation;
mod row;
