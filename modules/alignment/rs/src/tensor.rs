use std::ops::{Index, IndexMut};

use derive_getters::Getters;
use eyre::{ensure, eyre, Result};

/// Dense rank-N array with a fixed shape. Dimension 0 is the fastest-varying one in memory,
/// i.e. the offset of a coordinate equals its linear index under `DigitOrder::LowestFirst`.
#[derive(Clone, PartialEq, Debug, Getters)]
pub struct Tensor<T> {
    shape: Vec<usize>,
    #[getter(skip)]
    strides: Vec<usize>,
    #[getter(skip)]
    data: Vec<T>,
}

impl<T: Clone> Tensor<T> {
    /// Creates a tensor with every cell set to `value`.
    pub fn new(shape: Vec<usize>, value: T) -> Result<Self> {
        let mut strides = Vec::with_capacity(shape.len());
        let mut size: usize = 1;
        for (dim, extent) in shape.iter().enumerate() {
            ensure!(*extent > 0, "Tensor dimension {dim} must not be empty");
            strides.push(size);
            size = size
                .checked_mul(*extent)
                .ok_or_else(|| eyre!("Tensor of shape {shape:?} doesn't fit into memory"))?;
        }

        Ok(Self {
            shape,
            strides,
            data: vec![value; size],
        })
    }
}

impl<T> Tensor<T> {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The coordinate with every component at its maximum.
    pub fn last(&self) -> Vec<usize> {
        self.shape.iter().map(|x| x - 1).collect()
    }

    /// Offset of the coordinate in the backing store.
    pub fn offset(&self, coordinate: &[usize]) -> Result<usize> {
        ensure!(
            coordinate.len() == self.rank(),
            "Coordinate {coordinate:?} doesn't match the tensor rank {}",
            self.rank()
        );

        let mut offset = 0;
        for ((pos, extent), stride) in coordinate.iter().zip(&self.shape).zip(&self.strides) {
            ensure!(
                pos < extent,
                "Coordinate {coordinate:?} is out of bounds for the tensor of shape {:?}",
                self.shape
            );
            offset += pos * stride;
        }
        Ok(offset)
    }

    pub fn get(&self, coordinate: &[usize]) -> Result<&T> {
        let offset = self.offset(coordinate)?;
        Ok(&self.data[offset])
    }

    pub fn get_mut(&mut self, coordinate: &[usize]) -> Result<&mut T> {
        let offset = self.offset(coordinate)?;
        Ok(&mut self.data[offset])
    }

    pub fn set(&mut self, coordinate: &[usize], value: T) -> Result<()> {
        *self.get_mut(coordinate)? = value;
        Ok(())
    }

    /// Cells in memory order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<&[usize]> for Tensor<T> {
    type Output = T;

    fn index(&self, coordinate: &[usize]) -> &Self::Output {
        match self.offset(coordinate) {
            Ok(offset) => &self.data[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<&[usize]> for Tensor<T> {
    fn index_mut(&mut self, coordinate: &[usize]) -> &mut Self::Output {
        match self.offset(coordinate) {
            Ok(offset) => &mut self.data[offset],
            Err(err) => panic!("{err}"),
        }
    }
}
