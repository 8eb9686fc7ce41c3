use eyre::Result;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::coords::{DigitOrder, Enumerator};
use crate::tensor::Tensor;

/// Assigns every cell of the tensor in ascending linear-index order.
///
/// The cell function may read any cell that is component-wise <= the current coordinate,
/// all of them are already written when it's called. The first error aborts the fill.
pub fn fill<T, F>(tensor: &mut Tensor<T>, mut f: F) -> Result<()>
where
    F: FnMut(&Tensor<T>, &[usize]) -> Result<T>,
{
    let enumerator = Enumerator::grid(tensor.shape(), DigitOrder::LowestFirst)?;
    for coordinate in enumerator.iter() {
        let value = f(tensor, &coordinate)?;
        tensor.set(&coordinate, value)?;
    }
    Ok(())
}

/// Same as [`fill`], but cells with equal coordinate sum (a wavefront) are computed
/// concurrently on the given thread pool. Fronts are processed in ascending sum, so every
/// predecessor of a cell belongs to an earlier front.
pub fn fill_wavefront<T, F>(tensor: &mut Tensor<T>, pool: &ThreadPool, f: F) -> Result<()>
where
    T: Send + Sync,
    F: Fn(&Tensor<T>, &[usize]) -> Result<T> + Sync,
{
    let enumerator = Enumerator::grid(tensor.shape(), DigitOrder::LowestFirst)?;
    let depth = tensor.shape().iter().map(|x| x - 1).sum::<usize>();

    // Fronts hold linear indices, coordinates are decoded only while their front is computed
    let mut fronts: Vec<Vec<usize>> = vec![Vec::new(); depth + 1];
    for (index, coordinate) in enumerator.iter().enumerate() {
        fronts[coordinate.iter().sum::<usize>()].push(index);
    }

    for front in fronts {
        let values = {
            let snapshot: &Tensor<T> = tensor;
            let enumerator = &enumerator;
            pool.install(|| {
                front
                    .par_iter()
                    .map(|index| -> Result<(Vec<usize>, T)> {
                        let coordinate = enumerator.encode(*index)?;
                        let value = f(snapshot, &coordinate)?;
                        Ok((coordinate, value))
                    })
                    .collect::<Result<Vec<_>>>()
            })?
        };
        for (coordinate, value) in values {
            tensor.set(&coordinate, value)?;
        }
    }
    Ok(())
}
