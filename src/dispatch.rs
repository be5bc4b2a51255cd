// SPDX-License-Identifier: Apache-2.0

//! # Descend dispatch framework
//!
//! This module contains the dispatch layer used across the crate: it chooses
//! between the scalar batch drivers and the rayon-backed parallel drivers in
//! `traverse.rs`, based on the caller's [`ExecutionStrategy`] and the batch size.
//!
//! Every strategy produces identical results for the same input. The strategy only
//! decides where the work runs.

use std::ops::Range;

use log::{debug, trace};

use crate::sorted::SortedView;
use crate::traverse;
use crate::types::{DescendError, ExecutionStrategy, Result, SearchConfig};

// =============================================================================
//  EXECUTION CAPABILITIES
// =============================================================================

/// Parallel execution resources visible to the dispatch layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionCapabilities {
    /// Worker threads in rayon's global pool.
    pub worker_threads: usize,
    /// Hardware threads reported by the OS (1 if unknown).
    pub available_parallelism: usize,
}

impl ExecutionCapabilities {
    #[inline]
    pub fn detect() -> Self {
        ExecutionCapabilities {
            worker_threads: rayon::current_num_threads(),
            available_parallelism: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// Get information about available parallel execution resources
#[inline]
pub fn get_exec_capabilities() -> ExecutionCapabilities {
    ExecutionCapabilities::detect()
}

/// Resolve `strategy` to a concrete `Sequential` or `Parallel` for a batch of `work`
/// elements. Never returns `Auto`.
///
/// `Auto` goes parallel only when the batch reaches `threshold` and rayon's global
/// pool has more than one worker.
///
/// ```rust
/// use descend::{resolve_strategy, ExecutionStrategy};
///
/// assert_eq!(
///     resolve_strategy(ExecutionStrategy::Auto, 10, 4096),
///     ExecutionStrategy::Sequential
/// );
/// assert_eq!(
///     resolve_strategy(ExecutionStrategy::Parallel, 10, 4096),
///     ExecutionStrategy::Parallel
/// );
/// ```
#[inline]
pub fn resolve_strategy(
    strategy: ExecutionStrategy,
    work: usize,
    threshold: usize,
) -> ExecutionStrategy {
    resolve_with_workers(strategy, work, threshold, get_exec_capabilities().worker_threads)
}

#[inline]
fn resolve_with_workers(
    strategy: ExecutionStrategy,
    work: usize,
    threshold: usize,
    workers: usize,
) -> ExecutionStrategy {
    match strategy {
        ExecutionStrategy::Sequential => ExecutionStrategy::Sequential,
        ExecutionStrategy::Parallel => ExecutionStrategy::Parallel,
        ExecutionStrategy::Auto => {
            if work >= threshold && workers > 1 {
                ExecutionStrategy::Parallel
            } else {
                ExecutionStrategy::Sequential
            }
        }
    }
}

#[inline]
fn check_output_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(DescendError::LengthMismatch { expected, actual });
    }
    Ok(())
}

// =============================================================================
//  EXECUTOR
// =============================================================================

/// Runs batch searches and fills under a [`SearchConfig`].
///
/// When `num_threads` is set the executor owns a dedicated rayon pool and all
/// parallel work is installed into it; otherwise the global pool is used.
pub struct Executor {
    config: SearchConfig,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::with_strategy(ExecutionStrategy::Auto)
    }
}

impl Executor {
    /// Build an executor from `config`.
    ///
    /// # Errors
    /// * `InvalidConfig` if a threshold, the chunk size, or `num_threads` is zero
    /// * `ThreadPool` if the dedicated pool cannot be spawned
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let pool = match config.num_threads {
            Some(num_threads) => {
                debug!("Building dedicated search pool with {} threads", num_threads);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|i| format!("descend-worker-{}", i))
                    .build()?;
                Some(pool)
            }
            None => None,
        };

        Ok(Self { config, pool })
    }

    /// Executor on the global pool with default thresholds and the given strategy.
    #[inline]
    pub fn with_strategy(strategy: ExecutionStrategy) -> Self {
        Self {
            config: SearchConfig::with_strategy(strategy),
            pool: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Worker threads parallel work will run on.
    #[inline]
    pub fn worker_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    #[inline]
    fn resolve(&self, work: usize, threshold: usize) -> ExecutionStrategy {
        resolve_with_workers(self.config.strategy, work, threshold, self.worker_threads())
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn dispatch_batch<T, O, K>(&self, name: &str, queries: &[T], out: &mut [O], kernel: K)
    where
        T: Sync,
        O: Send,
        K: Fn(&T) -> O + Send + Sync,
    {
        if queries.is_empty() {
            return;
        }

        let strategy = self.resolve(queries.len(), self.config.parallel_threshold_search);
        trace!(
            "{} DISPATCH: queries.len()={}, strategy={:?}",
            name,
            queries.len(),
            strategy
        );

        match strategy {
            ExecutionStrategy::Parallel => {
                let min_chunk = self.config.min_parallel_chunk;
                self.install(|| traverse::search_batch_parallel(queries, out, kernel, min_chunk));
            }
            _ => traverse::search_batch_scalar(queries, out, kernel),
        }
    }

    /// Lower bound of every query in `view`.
    pub fn lower_bound<T, F>(&self, view: &SortedView<'_, T, F>, queries: &[T]) -> Vec<usize>
    where
        T: Sync,
        F: Fn(&T, &T) -> bool + Sync,
    {
        let mut out = vec![0usize; queries.len()];
        self.dispatch_batch("LOWER_BOUND", queries, &mut out, |q| view.lower_bound(q));
        out
    }

    /// Upper bound of every query in `view`.
    pub fn upper_bound<T, F>(&self, view: &SortedView<'_, T, F>, queries: &[T]) -> Vec<usize>
    where
        T: Sync,
        F: Fn(&T, &T) -> bool + Sync,
    {
        let mut out = vec![0usize; queries.len()];
        self.dispatch_batch("UPPER_BOUND", queries, &mut out, |q| view.upper_bound(q));
        out
    }

    /// Membership of every query in `view`.
    pub fn contains<T, F>(&self, view: &SortedView<'_, T, F>, queries: &[T]) -> Vec<bool>
    where
        T: Sync,
        F: Fn(&T, &T) -> bool + Sync,
    {
        let mut out = vec![false; queries.len()];
        self.dispatch_batch("CONTAINS", queries, &mut out, |q| view.contains(q));
        out
    }

    /// `lower..upper` range of every query in `view`.
    pub fn equal_range<T, F>(
        &self,
        view: &SortedView<'_, T, F>,
        queries: &[T],
    ) -> Vec<Range<usize>>
    where
        T: Sync,
        F: Fn(&T, &T) -> bool + Sync,
    {
        let mut out = vec![0..0; queries.len()];
        self.dispatch_batch("EQUAL_RANGE", queries, &mut out, |q| view.equal_range(q));
        out
    }

    /// Write the lower bound of `queries[i]` to `out[i]`.
    ///
    /// # Errors
    /// * `LengthMismatch` if `out.len() != queries.len()`; `out` is left untouched
    pub fn lower_bound_into<T, F>(
        &self,
        view: &SortedView<'_, T, F>,
        queries: &[T],
        out: &mut [usize],
    ) -> Result<()>
    where
        T: Sync,
        F: Fn(&T, &T) -> bool + Sync,
    {
        check_output_len(queries.len(), out.len())?;
        self.dispatch_batch("LOWER_BOUND_INTO", queries, out, |q| view.lower_bound(q));
        Ok(())
    }

    /// Write the upper bound of `queries[i]` to `out[i]`.
    ///
    /// # Errors
    /// * `LengthMismatch` if `out.len() != queries.len()`; `out` is left untouched
    pub fn upper_bound_into<T, F>(
        &self,
        view: &SortedView<'_, T, F>,
        queries: &[T],
        out: &mut [usize],
    ) -> Result<()>
    where
        T: Sync,
        F: Fn(&T, &T) -> bool + Sync,
    {
        check_output_len(queries.len(), out.len())?;
        self.dispatch_batch("UPPER_BOUND_INTO", queries, out, |q| view.upper_bound(q));
        Ok(())
    }

    /// Write membership of `queries[i]` to `out[i]`.
    ///
    /// Any `From<bool>` output works, so integer buffers receive `1` or `0`.
    ///
    /// # Errors
    /// * `LengthMismatch` if `out.len() != queries.len()`; `out` is left untouched
    pub fn contains_into<T, F, O>(
        &self,
        view: &SortedView<'_, T, F>,
        queries: &[T],
        out: &mut [O],
    ) -> Result<()>
    where
        T: Sync,
        F: Fn(&T, &T) -> bool + Sync,
        O: From<bool> + Send,
    {
        check_output_len(queries.len(), out.len())?;
        self.dispatch_batch("CONTAINS_INTO", queries, out, |q| O::from(view.contains(q)));
        Ok(())
    }

    /// Set `out[i] = f(i)` for every slot.
    pub fn tabulate<T, G>(&self, out: &mut [T], f: G)
    where
        T: Send,
        G: Fn(usize) -> T + Send + Sync,
    {
        if out.is_empty() {
            return;
        }

        let strategy = self.resolve(out.len(), self.config.parallel_threshold_tabulate);
        trace!(
            "TABULATE DISPATCH: out.len()={}, strategy={:?}",
            out.len(),
            strategy
        );

        match strategy {
            ExecutionStrategy::Parallel => {
                let min_chunk = self.config.min_parallel_chunk;
                self.install(|| traverse::tabulate_parallel(out, f, min_chunk));
            }
            _ => traverse::tabulate_scalar(out, f),
        }
    }
}

// =============================================================================
//  DESCENDING SEARCH FUNCTIONS
// =============================================================================

/// Lower bound of each query in a descending sequence
///
/// **Requires:** `sequence` sorted so that `greater(a[i + 1], a[i])` never holds.
/// Debug builds verify this and panic on violation; release builds trust it.
///
/// For each query `q`, returns the number of elements strictly greater than `q`,
/// i.e. the first position where `q` could be inserted keeping the order.
///
/// # Arguments
/// * `sequence` - Elements in descending order under `greater`
/// * `greater` - Strict order defining "descending"
/// * `queries` - Values to look up, in any order
///
/// # Returns
/// * `Vec<usize>` - One index in `[0, sequence.len()]` per query
///
/// # Examples
/// ```rust
/// use descend::descending_lower_bound;
///
/// let sequence = [8, 7, 5, 2, 0];
/// let queries: Vec<i32> = (0..10).collect();
/// let indices = descending_lower_bound(&sequence, |a: &i32, b: &i32| a > b, &queries);
/// assert_eq!(indices, vec![4, 4, 3, 3, 3, 2, 2, 1, 0, 0]);
///
/// // Empty sequence
/// let empty: [i32; 0] = [];
/// assert_eq!(descending_lower_bound(&empty, |a: &i32, b: &i32| a > b, &[3]), vec![0]);
/// ```
///
/// # Performance
/// - O(log n) per query, O(m log n) per batch
/// - Batches of at least PARALLEL_THRESHOLD_SEARCH queries run on the rayon pool
#[inline]
pub fn descending_lower_bound<T, F>(sequence: &[T], greater: F, queries: &[T]) -> Vec<usize>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    descending_lower_bound_with(sequence, greater, queries, ExecutionStrategy::Auto)
}

/// [`descending_lower_bound`] with an explicit execution strategy.
#[inline]
pub fn descending_lower_bound_with<T, F>(
    sequence: &[T],
    greater: F,
    queries: &[T],
    strategy: ExecutionStrategy,
) -> Vec<usize>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    trace!(
        "DESCENDING_LOWER_BOUND DISPATCH: sequence.len()={}, queries.len()={}, strategy={:?}",
        sequence.len(),
        queries.len(),
        strategy
    );
    lower_bound_by(sequence, greater, queries, strategy)
}

/// Upper bound of each query in a descending sequence
///
/// **Requires:** `sequence` sorted descending under `greater` (see
/// [`descending_lower_bound`]).
///
/// For each query `q`, returns the number of elements not strictly less than `q`,
/// i.e. the last position where `q` could be inserted keeping the order.
///
/// # Examples
/// ```rust
/// use descend::descending_upper_bound;
///
/// let sequence = [8, 7, 5, 2, 0];
/// let queries: Vec<i32> = (0..10).collect();
/// let indices = descending_upper_bound(&sequence, |a: &i32, b: &i32| a > b, &queries);
/// assert_eq!(indices, vec![5, 4, 4, 3, 3, 3, 2, 2, 1, 0]);
/// ```
#[inline]
pub fn descending_upper_bound<T, F>(sequence: &[T], greater: F, queries: &[T]) -> Vec<usize>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    descending_upper_bound_with(sequence, greater, queries, ExecutionStrategy::Auto)
}

/// [`descending_upper_bound`] with an explicit execution strategy.
#[inline]
pub fn descending_upper_bound_with<T, F>(
    sequence: &[T],
    greater: F,
    queries: &[T],
    strategy: ExecutionStrategy,
) -> Vec<usize>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    trace!(
        "DESCENDING_UPPER_BOUND DISPATCH: sequence.len()={}, queries.len()={}, strategy={:?}",
        sequence.len(),
        queries.len(),
        strategy
    );
    upper_bound_by(sequence, greater, queries, strategy)
}

/// Membership of each query in a descending sequence
///
/// **Requires:** `sequence` sorted descending under `greater`.
///
/// A query is present iff some element is neither greater nor less than it.
///
/// # Examples
/// ```rust
/// use descend::descending_contains;
///
/// let sequence = [8, 7, 5, 2, 0];
/// let found = descending_contains(&sequence, |a: &i32, b: &i32| a > b, &[5, 6]);
/// assert_eq!(found, vec![true, false]);
/// ```
#[inline]
pub fn descending_contains<T, F>(sequence: &[T], greater: F, queries: &[T]) -> Vec<bool>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    descending_contains_with(sequence, greater, queries, ExecutionStrategy::Auto)
}

/// [`descending_contains`] with an explicit execution strategy.
#[inline]
pub fn descending_contains_with<T, F>(
    sequence: &[T],
    greater: F,
    queries: &[T],
    strategy: ExecutionStrategy,
) -> Vec<bool>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    trace!(
        "DESCENDING_CONTAINS DISPATCH: sequence.len()={}, queries.len()={}, strategy={:?}",
        sequence.len(),
        queries.len(),
        strategy
    );
    binary_search_by(sequence, greater, queries, strategy)
}

/// Range of elements equal to each query in a descending sequence
///
/// # Examples
/// ```rust
/// use descend::descending_equal_range;
///
/// let sequence = [9, 4, 4, 4, 1];
/// let ranges = descending_equal_range(&sequence, |a: &i32, b: &i32| a > b, &[4, 3]);
/// assert_eq!(ranges, vec![1..4, 4..4]);
/// ```
#[inline]
pub fn descending_equal_range<T, F>(
    sequence: &[T],
    greater: F,
    queries: &[T],
) -> Vec<Range<usize>>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    descending_equal_range_with(sequence, greater, queries, ExecutionStrategy::Auto)
}

/// [`descending_equal_range`] with an explicit execution strategy.
#[inline]
pub fn descending_equal_range_with<T, F>(
    sequence: &[T],
    greater: F,
    queries: &[T],
    strategy: ExecutionStrategy,
) -> Vec<Range<usize>>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    trace!(
        "DESCENDING_EQUAL_RANGE DISPATCH: sequence.len()={}, queries.len()={}, strategy={:?}",
        sequence.len(),
        queries.len(),
        strategy
    );
    let view = SortedView::new(sequence, greater);
    Executor::with_strategy(strategy).equal_range(&view, queries)
}

// =============================================================================
//  ORDER-GENERIC SEARCH FUNCTIONS
// =============================================================================

/// Lower bound of each query in a sequence sorted under `order`.
///
/// ```rust
/// use descend::{lower_bound_by, ExecutionStrategy};
///
/// let ascending = [1, 3, 3, 5];
/// let indices = lower_bound_by(&ascending, |a: &i32, b: &i32| a < b, &[3, 4], ExecutionStrategy::Sequential);
/// assert_eq!(indices, vec![1, 3]);
/// ```
pub fn lower_bound_by<T, F>(
    sequence: &[T],
    order: F,
    queries: &[T],
    strategy: ExecutionStrategy,
) -> Vec<usize>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    let view = SortedView::new(sequence, order);
    Executor::with_strategy(strategy).lower_bound(&view, queries)
}

/// Upper bound of each query in a sequence sorted under `order`.
pub fn upper_bound_by<T, F>(
    sequence: &[T],
    order: F,
    queries: &[T],
    strategy: ExecutionStrategy,
) -> Vec<usize>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    let view = SortedView::new(sequence, order);
    Executor::with_strategy(strategy).upper_bound(&view, queries)
}

/// Membership of each query in a sequence sorted under `order`.
pub fn binary_search_by<T, F>(
    sequence: &[T],
    order: F,
    queries: &[T],
    strategy: ExecutionStrategy,
) -> Vec<bool>
where
    T: Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    let view = SortedView::new(sequence, order);
    Executor::with_strategy(strategy).contains(&view, queries)
}

// =============================================================================
//  TABULATE
// =============================================================================

/// Fill `out` so that `out[i] == f(i)`
///
/// # Examples
/// ```rust
/// use descend::tabulate;
///
/// let mut v = vec![0i64; 5];
/// tabulate(&mut v, |i| (i as i64).pow(3));
/// assert_eq!(v, vec![0, 1, 8, 27, 64]);
/// ```
#[inline]
pub fn tabulate<T, G>(out: &mut [T], f: G)
where
    T: Send,
    G: Fn(usize) -> T + Send + Sync,
{
    tabulate_with(out, f, ExecutionStrategy::Auto)
}

/// [`tabulate`] with an explicit execution strategy.
#[inline]
pub fn tabulate_with<T, G>(out: &mut [T], f: G, strategy: ExecutionStrategy)
where
    T: Send,
    G: Fn(usize) -> T + Send + Sync,
{
    Executor::with_strategy(strategy).tabulate(out, f)
}
