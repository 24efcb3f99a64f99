//! Rayon-based parallelisation utilities.
//!
//! Centrality algorithms that run one independent pass per source node use
//! these helpers to map every source to a partial contribution vector and
//! reduce the partials by element-wise summation.
//!
//! # Performance Targets
//!
//! - Sequential below [`ParallelConfig::parallel_threshold`] nodes, where
//!   thread hand-off costs more than the traversal itself
//! - One allocation per source in the hot path

use rayon::prelude::*;

/// Minimum number of sources handed to a single Rayon task.
///
/// Each source costs a full BFS, so small batches already amortise scheduling.
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Default node count from which per-source work is parallelised.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum sources per Rayon task
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Sums per-source contribution vectors of length `width`.
///
/// `contribution(s)` must return a vector of exactly `width` entries. The
/// sources `0..n_sources` are mapped in parallel when `config` allows it,
/// otherwise folded in order.
///
/// # Examples
/// ```
/// use structure_network::parallel::{sum_contributions, ParallelConfig};
///
/// let total = sum_contributions(3, 2, &ParallelConfig::default(), |s| vec![s as f64, 1.0]);
/// assert_eq!(total, vec![3.0, 3.0]);
/// ```
pub fn sum_contributions<F>(
    n_sources: usize,
    width: usize,
    config: &ParallelConfig,
    contribution: F,
) -> Vec<f64>
where
    F: Fn(usize) -> Vec<f64> + Sync + Send,
{
    if config.should_parallelize(n_sources) {
        (0..n_sources)
            .into_par_iter()
            .with_min_len(config.batch_size)
            .map(&contribution)
            .reduce(|| vec![0.0; width], add_assign)
    } else {
        (0..n_sources)
            .map(contribution)
            .fold(vec![0.0; width], add_assign)
    }
}

#[inline]
fn add_assign(mut acc: Vec<f64>, partial: Vec<f64>) -> Vec<f64> {
    for (a, p) in acc.iter_mut().zip(partial) {
        *a += p;
    }
    acc
}
