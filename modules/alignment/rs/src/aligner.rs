use eyre::{ensure, Result};
use log::{debug, warn};
use multalign_core_rs::{parallelism, Alignable};
use num::Zero;
use rayon::ThreadPool;

use crate::alignment::ScoredAlignment;
use crate::dp::{fill, fill_wavefront, Backtracker, CellScorer};
use crate::scoring::ColumnScorer;
use crate::tensor::Tensor;

/// Exact global aligner of N sequences that reports every optimal alignment.
pub struct Aligner<C> {
    scorer: C,
    thread_pool: Option<ThreadPool>,
    budget: Option<usize>,
    trim_flanks: bool,
}

impl<C: ColumnScorer> Aligner<C> {
    pub fn new(scorer: C) -> Self {
        Self::builder(scorer).build()
    }

    pub fn builder(scorer: C) -> Builder<C> {
        Builder::new(scorer)
    }

    pub fn scorer(&self) -> &C {
        &self.scorer
    }

    pub fn align_pair<A>(&self, a: A, b: A) -> Result<Vec<ScoredAlignment<C::Score, C::Symbol>>>
    where
        A: Alignable<Symbol = C::Symbol>,
        C::Symbol: Clone,
    {
        self.align_multiple(&[a, b])
    }

    /// Every tie-optimal global alignment of the sequences, in the order they were recovered.
    /// The score tensor is filled on the calling thread.
    pub fn align_multiple<A>(
        &self,
        sequences: &[A],
    ) -> Result<Vec<ScoredAlignment<C::Score, C::Symbol>>>
    where
        A: Alignable<Symbol = C::Symbol>,
        C::Symbol: Clone,
    {
        if self.thread_pool.is_some() {
            debug!("The thread pool is only used by par_align_multiple, filling sequentially");
        }
        self.align_with(sequences, |cell, tensor| {
            debug!("Sequential fill");
            fill(tensor, |tensor, coordinate| cell.score(tensor, coordinate))
        })
    }

    pub fn par_align_pair<A>(
        &self,
        a: A,
        b: A,
    ) -> Result<Vec<ScoredAlignment<C::Score, C::Symbol>>>
    where
        A: Alignable<Symbol = C::Symbol> + Sync,
        C: Sync,
        C::Symbol: Clone + Sync,
    {
        self.par_align_multiple(&[a, b])
    }

    /// Same as `align_multiple`, but the score tensor is filled one wavefront at a time on
    /// the configured thread pool. Without a pool it falls back to the sequential fill.
    pub fn par_align_multiple<A>(
        &self,
        sequences: &[A],
    ) -> Result<Vec<ScoredAlignment<C::Score, C::Symbol>>>
    where
        A: Alignable<Symbol = C::Symbol> + Sync,
        C: Sync,
        C::Symbol: Clone + Sync,
    {
        self.align_with(sequences, |cell, tensor| match &self.thread_pool {
            Some(pool) => {
                if cell.depth() < 2 {
                    warn!(
                        "A thread pool was supplied to align {} sequence(s), the fill can't benefit from it",
                        cell.depth()
                    );
                }
                debug!("Wavefront fill on {} threads", pool.current_num_threads());
                fill_wavefront(tensor, pool, |tensor, coordinate| {
                    cell.score(tensor, coordinate)
                })
            }
            None => {
                debug!("Sequential fill, no thread pool was supplied");
                fill(tensor, |tensor, coordinate| cell.score(tensor, coordinate))
            }
        })
    }

    fn align_with<A, F>(
        &self,
        sequences: &[A],
        fill_tensor: F,
    ) -> Result<Vec<ScoredAlignment<C::Score, C::Symbol>>>
    where
        A: Alignable<Symbol = C::Symbol>,
        C::Symbol: Clone,
        F: FnOnce(&CellScorer<'_, A, C>, &mut Tensor<C::Score>) -> Result<()>,
    {
        if sequences.is_empty() {
            debug!("Nothing to align");
            return Ok(Vec::new());
        }

        let shape: Vec<usize> = sequences.iter().map(|x| x.len() + 1).collect();
        if let Some(budget) = self.budget {
            let work = estimate(&shape);
            ensure!(
                work.is_some_and(|x| x <= budget),
                "Aligning sequences of lengths {:?} requires {} work units, exceeding the budget of {budget}",
                sequences.iter().map(|x| x.len()).collect::<Vec<_>>(),
                work.map_or_else(|| "more than usize::MAX".to_string(), |x| x.to_string())
            );
        }

        let cell = CellScorer::new(sequences, &self.scorer)?;
        let mut tensor = Tensor::new(shape, C::Score::zero())?;
        debug!(
            "Filling the score tensor of shape {:?} ({} cells, {} moves per cell)",
            tensor.shape(),
            tensor.size(),
            cell.directions().len()
        );
        fill_tensor(&cell, &mut tensor)?;

        let results = Backtracker::new(&cell, &tensor)
            .trim_flanks(self.trim_flanks)
            .run()?;
        debug!(
            "Recovered {} optimal alignment(s) with score {:?}",
            results.len(),
            results.first().map(|x| *x.score())
        );
        Ok(results)
    }
}

// Cells times moves per cell, None on overflow
fn estimate(shape: &[usize]) -> Option<usize> {
    let cells = shape
        .iter()
        .try_fold(1usize, |total, extent| total.checked_mul(*extent))?;
    let moves = u32::try_from(shape.len())
        .ok()
        .and_then(|rank| 1usize.checked_shl(rank))?;
    cells.checked_mul(moves)
}

pub struct Builder<C> {
    scorer: C,
    thread_pool: Option<ThreadPool>,
    budget: Option<usize>,
    trim_flanks: bool,
}

impl<C: ColumnScorer> Builder<C> {
    pub fn new(scorer: C) -> Self {
        Self {
            scorer,
            thread_pool: None,
            budget: None,
            trim_flanks: true,
        }
    }

    /// Pool for the wavefront fill of `par_align_multiple` and `par_align_pair`.
    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    /// Same as `set_thread_pool` with a pool of the requested size. 0 means a single thread,
    /// negative values leave |threads| - 1 of the available threads idle.
    pub fn set_threads(self, threads: isize) -> Result<Self> {
        let pool = parallelism::pool(threads)?;
        Ok(self.set_thread_pool(pool))
    }

    /// Maximum number of work units (tensor cells times moves per cell) of a single alignment.
    pub fn set_budget(mut self, budget: usize) -> Result<Self> {
        ensure!(budget > 0, "Alignment budget must be positive");
        self.budget = Some(budget);
        Ok(self)
    }

    pub fn set_trim_flanks(mut self, trim_flanks: bool) -> Self {
        self.trim_flanks = trim_flanks;
        self
    }

    pub fn build(self) -> Aligner<C> {
        Aligner {
            scorer: self.scorer,
            thread_pool: self.thread_pool,
            budget: self.budget,
            trim_flanks: self.trim_flanks,
        }
    }
}
