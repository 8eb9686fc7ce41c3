pub use alignment::Alignable;

pub mod alignment;
pub mod num;
pub mod parallelism;
