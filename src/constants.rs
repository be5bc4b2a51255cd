// SPDX-License-Identifier: Apache-2.0

//! Common constants used across implementations
//!
//! This module centralizes the thresholds used by the dispatch layer to choose
//! between scalar and parallel execution.

// =============================================================================
// PARALLEL DISPATCH THRESHOLDS
// =============================================================================

/// Minimum number of queries in a batch before `Auto` runs the search in parallel.
/// Each query is only O(log n), so small batches are cheaper on the calling thread.
pub const PARALLEL_THRESHOLD_SEARCH: usize = 4096;

/// Minimum output length before `Auto` runs tabulate in parallel.
pub const PARALLEL_THRESHOLD_TABULATE: usize = 16384;

// =============================================================================
// PARALLEL WORK SPLITTING
// =============================================================================

/// Smallest number of elements a single rayon task will process.
pub const MIN_PARALLEL_CHUNK: usize = 256;
