use std::fmt::Debug;

/// T values are float numbers
pub trait Float: ::num::Float + Debug + Default {}

impl<T: ::num::Float + Debug + Default> Float for T {}

/// T values are alignment scores: real numbers that can be shared between worker threads.
/// Scores are compared exactly, so any implementation must be deterministic for identical inputs.
pub trait Score: Float + Send + Sync + 'static {}

impl<T: Float + Send + Sync + 'static> Score for T {}
