pub use directions::{Direction, Directions};
pub use enumerator::{DigitOrder, Enumerator};

mod directions;
mod enumerator;
