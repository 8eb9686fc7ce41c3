use derive_getters::Getters;
use eyre::{ensure, eyre, Result};

/// Which dimension of a coordinate varies fastest when the linear index grows by one.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
pub enum DigitOrder {
    /// Dimension 0 is the least significant digit (matches the tensor memory layout).
    #[default]
    LowestFirst,
    /// The last dimension is the least significant digit.
    HighestFirst,
}

impl DigitOrder {
    /// Dimensions sorted from the least to the most significant digit.
    fn significance(&self, rank: usize) -> Vec<usize> {
        match self {
            DigitOrder::LowestFirst => (0..rank).collect(),
            DigitOrder::HighestFirst => (0..rank).rev().collect(),
        }
    }
}

/// Bijection between linear indices `[0, size)` and coordinates whose i-th component
/// is drawn from the i-th alphabet. Linear indices are a mixed-radix number with one digit
/// per dimension, where a digit is the position of the component inside its alphabet.
#[derive(Clone, Eq, PartialEq, Debug, Getters)]
pub struct Enumerator<T> {
    alphabets: Vec<Vec<T>>,
    order: DigitOrder,
    #[getter(skip)]
    weights: Vec<usize>,
    #[getter(skip)]
    size: usize,
}

impl<T: Clone + PartialEq> Enumerator<T> {
    /// Alphabets must be non-empty and must not repeat values.
    pub fn new(alphabets: Vec<Vec<T>>, order: DigitOrder) -> Result<Self> {
        for (dim, alphabet) in alphabets.iter().enumerate() {
            for (ind, value) in alphabet.iter().enumerate() {
                ensure!(
                    !alphabet[..ind].contains(value),
                    "Alphabet of the dimension {dim} lists the value at position {ind} more than once"
                );
            }
        }
        Self::assemble(alphabets, order)
    }

    // Alphabets are assumed to hold distinct values
    fn assemble(alphabets: Vec<Vec<T>>, order: DigitOrder) -> Result<Self> {
        for (dim, alphabet) in alphabets.iter().enumerate() {
            ensure!(
                !alphabet.is_empty(),
                "Alphabet of the dimension {dim} must not be empty"
            );
        }

        let mut weights = vec![0; alphabets.len()];
        let mut size: usize = 1;
        for dim in order.significance(alphabets.len()) {
            weights[dim] = size;
            size = size.checked_mul(alphabets[dim].len()).ok_or_else(|| {
                eyre!(
                    "Coordinate space of {} dimensions doesn't fit into usize",
                    alphabets.len()
                )
            })?;
        }

        Ok(Self {
            alphabets,
            order,
            weights,
            size,
        })
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.alphabets.len()
    }

    /// Number of distinct coordinates.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The largest valid linear index.
    pub fn max(&self) -> usize {
        self.size - 1
    }

    /// Coordinate with the given linear index.
    pub fn encode(&self, index: usize) -> Result<Vec<T>> {
        ensure!(
            index < self.size,
            "Linear index {index} is out of range [0, {})",
            self.size
        );
        Ok(self.encode_unchecked(index))
    }

    /// Linear index of the given coordinate.
    pub fn decode(&self, coordinate: &[T]) -> Result<usize> {
        ensure!(
            coordinate.len() == self.rank(),
            "Coordinate of rank {} can't be decoded by an enumerator of rank {}",
            coordinate.len(),
            self.rank()
        );

        let mut index = 0;
        for (dim, value) in coordinate.iter().enumerate() {
            let digit = self.alphabets[dim]
                .iter()
                .position(|x| x == value)
                .ok_or_else(|| eyre!("Coordinate value at dimension {dim} is not in its alphabet"))?;
            index += digit * self.weights[dim];
        }
        Ok(index)
    }

    /// All coordinates in ascending linear index order.
    pub fn iter(&self) -> impl Iterator<Item = Vec<T>> + '_ {
        (0..self.size).map(move |index| self.encode_unchecked(index))
    }

    fn encode_unchecked(&self, index: usize) -> Vec<T> {
        self.alphabets
            .iter()
            .zip(&self.weights)
            .map(|(alphabet, weight)| alphabet[(index / weight) % alphabet.len()].clone())
            .collect()
    }
}

impl Enumerator<usize> {
    /// Enumerator over every cell of a grid with the given shape, dimension `i` spans `0..shape[i]`.
    pub fn grid(shape: &[usize], order: DigitOrder) -> Result<Self> {
        // Ranges never repeat values
        Self::assemble(shape.iter().map(|&size| (0..size).collect()).collect(), order)
    }
}
