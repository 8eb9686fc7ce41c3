use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::thread::available_parallelism;

use eyre::{Result, WrapErr};
use rayon::{ThreadPool, ThreadPoolBuilder};

// Requested thread counts follow the usual convention:
// * 0 -> a single thread
// * N > 0 -> N threads, but never more than the machine offers
// * N < 0 -> all available threads except |N| - 1 of them, at least one
fn normalize(requested: isize, available: NonZeroUsize) -> NonZeroUsize {
    let available = available.get() as isize;
    let threads = match requested.cmp(&0) {
        Ordering::Less => (available + requested + 1).max(1),
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(available),
    };
    NonZeroUsize::new(threads as usize).unwrap_or(NonZeroUsize::MIN)
}

/// Number of worker threads to use for the requested thread count.
pub fn available(requested: isize) -> Result<NonZeroUsize> {
    let available = available_parallelism().wrap_err("Failed to query available parallelism")?;
    Ok(normalize(requested, available))
}

/// Thread pool with the normalized number of worker threads.
pub fn pool(requested: isize) -> Result<ThreadPool> {
    let threads = available(requested)?;
    ThreadPoolBuilder::new()
        .num_threads(threads.get())
        .thread_name(|ind| format!("multalign-{ind}"))
        .build()
        .wrap_err_with(|| format!("Failed to build a thread pool with {threads} threads"))
}
