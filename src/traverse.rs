// SPDX-License-Identifier: Apache-2.0

//! Search and fill kernels
//!
//! This module contains the per-element kernels (bound searches over a sorted
//! slice) and the batch drivers that apply a kernel to every query, either on the
//! calling thread or across the rayon pool. Callers pick the driver; the dispatch
//! layer in `dispatch.rs` decides which one to use.
//!
//! ## Ordering convention
//! Every kernel takes a strict order `comp(a, b)` meaning "a goes before b". For an
//! ascending slice that is `<`; for a descending slice it is `>` (the `greater`
//! predicate). The slice must already be sorted under `comp`. This is not checked
//! here, see `SortedView` for the checked entry point.
//!
//! ## Performance notes
//! The batch drivers write each result straight into its own output slot. Slots are
//! disjoint so the parallel driver needs no synchronization beyond rayon's join.

use std::ops::Range;

use rayon::prelude::*;

// =============================================================================
//  SINGLE-QUERY KERNELS
// =============================================================================

/// First index `i` such that `comp(seq[i], value)` is false.
///
/// With `comp = greater` over a descending slice this is the number of elements
/// strictly greater than `value`.
#[inline]
pub fn lower_bound_by<T, F>(seq: &[T], value: &T, comp: &F) -> usize
where
  F: Fn(&T, &T) -> bool,
{
  let mut left = 0;
  let mut right = seq.len();

  while left < right {
    let mid = left + (right - left) / 2;
    if comp(&seq[mid], value) {
      left = mid + 1;
    } else {
      right = mid;
    }
  }

  left
}

/// First index `i` such that `comp(value, seq[i])` is true.
///
/// With `comp = greater` over a descending slice this is the number of elements
/// not strictly less than `value`.
#[inline]
pub fn upper_bound_by<T, F>(seq: &[T], value: &T, comp: &F) -> usize
where
  F: Fn(&T, &T) -> bool,
{
  let mut left = 0;
  let mut right = seq.len();

  while left < right {
    let mid = left + (right - left) / 2;
    if !comp(value, &seq[mid]) {
      left = mid + 1; // seq[mid] is equivalent to or before value
    } else {
      right = mid;
    }
  }

  left
}

/// Whether `seq` holds an element equivalent to `value` under `comp`.
///
/// One lower-bound probe plus a single comparison at the probe position.
#[inline]
pub fn contains_by<T, F>(seq: &[T], value: &T, comp: &F) -> bool
where
  F: Fn(&T, &T) -> bool,
{
  let idx = lower_bound_by(seq, value, comp);
  idx < seq.len() && !comp(value, &seq[idx])
}

/// Range of elements equivalent to `value` under `comp`.
#[inline]
pub fn equal_range_by<T, F>(seq: &[T], value: &T, comp: &F) -> Range<usize>
where
  F: Fn(&T, &T) -> bool,
{
  let lower = lower_bound_by(seq, value, comp);
  // Everything before `lower` is strictly before `value`, so the upper bound
  // only needs to be searched in the tail.
  let upper = lower + upper_bound_by(&seq[lower..], value, comp);
  lower..upper
}

/// First index `i` such that `comp(seq[i + 1], seq[i])`, i.e. the first adjacent
/// pair that is out of order. `None` if the slice is sorted under `comp`.
pub fn first_unsorted_index<T, F>(seq: &[T], comp: &F) -> Option<usize>
where
  F: Fn(&T, &T) -> bool,
{
  seq.windows(2).position(|pair| comp(&pair[1], &pair[0]))
}

// =============================================================================
//  BATCH DRIVERS
// =============================================================================

/// Apply `kernel` to every query on the calling thread.
///
/// `queries` and `out` must have the same length; the dispatch layer checks this.
#[inline]
pub fn search_batch_scalar<T, O, K>(queries: &[T], out: &mut [O], kernel: K)
where
  K: Fn(&T) -> O,
{
  debug_assert_eq!(queries.len(), out.len());

  for (slot, query) in out.iter_mut().zip(queries.iter()) {
    *slot = kernel(query);
  }
}

/// Apply `kernel` to every query across the current rayon pool.
///
/// Returns once every slot has been written.
pub fn search_batch_parallel<T, O, K>(queries: &[T], out: &mut [O], kernel: K, min_chunk: usize)
where
  T: Sync,
  O: Send,
  K: Fn(&T) -> O + Sync,
{
  debug_assert_eq!(queries.len(), out.len());

  out
    .par_iter_mut()
    .zip(queries.par_iter())
    .with_min_len(min_chunk.max(1))
    .for_each(|(slot, query)| *slot = kernel(query));
}

/// Set `out[i] = f(i)` on the calling thread.
#[inline]
pub fn tabulate_scalar<T, F>(out: &mut [T], f: F)
where
  F: Fn(usize) -> T,
{
  for (i, slot) in out.iter_mut().enumerate() {
    *slot = f(i);
  }
}

/// Set `out[i] = f(i)` across the current rayon pool.
pub fn tabulate_parallel<T, F>(out: &mut [T], f: F, min_chunk: usize)
where
  T: Send,
  F: Fn(usize) -> T + Sync,
{
  out
    .par_iter_mut()
    .enumerate()
    .with_min_len(min_chunk.max(1))
    .for_each(|(i, slot)| *slot = f(i));
}
