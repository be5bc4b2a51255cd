// SPDX-License-Identifier: Apache-2.0

// types.rs for descend
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MIN_PARALLEL_CHUNK, PARALLEL_THRESHOLD_SEARCH, PARALLEL_THRESHOLD_TABULATE};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescendError {
    #[error("Length mismatch: expected {expected} output slots, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Sequence not sorted under the given order at index {index}")]
    NotSorted { index: usize },
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<rayon::ThreadPoolBuildError> for DescendError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        DescendError::ThreadPool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DescendError>;

/// How a batch operation is executed.
///
/// `Sequential` and `Parallel` are honoured as given. `Auto` picks one of them per
/// call based on the batch size and the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStrategy {
    Sequential,
    Parallel,
    #[default]
    Auto,
}

/// Dispatch configuration for an [`Executor`](crate::dispatch::Executor).
///
/// Every field has a default, so a partial document deserializes cleanly:
///
/// ```rust
/// use descend::{ExecutionStrategy, SearchConfig};
///
/// let config: SearchConfig = serde_json::from_str(r#"{ "strategy": "parallel" }"#).unwrap();
/// assert_eq!(config.strategy, ExecutionStrategy::Parallel);
/// assert_eq!(config.num_threads, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: ExecutionStrategy,
    pub parallel_threshold_search: usize,
    pub parallel_threshold_tabulate: usize,
    pub min_parallel_chunk: usize,
    /// Size of a dedicated worker pool. `None` runs on rayon's global pool.
    pub num_threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::Auto,
            parallel_threshold_search: PARALLEL_THRESHOLD_SEARCH,
            parallel_threshold_tabulate: PARALLEL_THRESHOLD_TABULATE,
            min_parallel_chunk: MIN_PARALLEL_CHUNK,
            num_threads: None,
        }
    }
}

impl SearchConfig {
    #[inline]
    pub fn with_strategy(strategy: ExecutionStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold_search == 0 {
            return Err(DescendError::InvalidConfig(
                "parallel_threshold_search must be non-zero".to_string(),
            ));
        }
        if self.parallel_threshold_tabulate == 0 {
            return Err(DescendError::InvalidConfig(
                "parallel_threshold_tabulate must be non-zero".to_string(),
            ));
        }
        if self.min_parallel_chunk == 0 {
            return Err(DescendError::InvalidConfig(
                "min_parallel_chunk must be non-zero".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(DescendError::InvalidConfig(
                "num_threads must be non-zero when set".to_string(),
            ));
        }
        Ok(())
    }
}
