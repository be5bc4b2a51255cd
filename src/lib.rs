// SPDX-License-Identifier: Apache-2.0

//! Descend library
//!
//! Batch binary search over sequences sorted under a caller-supplied order, with a
//! focus on descending sequences (sorted under a `greater` predicate), plus a
//! parallel `tabulate` fill. Every batch operation runs either on the calling
//! thread or across a rayon pool, and both paths produce identical results.
//!
//! - Descending lower bound, upper bound, membership and equal range
//! - The same searches for any strict order
//! - A typed [`SortedView`] that checks sortedness once, at construction
//! - Explicit [`ExecutionStrategy`] selection, or `Auto` by batch size
//!
//! ## Usage
//!
//! ```rust
//! use descend::{descending_contains, descending_lower_bound, descending_upper_bound};
//!
//! let greater = |a: &i32, b: &i32| a > b;
//! let sequence = [8, 7, 5, 2, 0];
//! let queries = [0, 5, 6];
//!
//! assert_eq!(descending_lower_bound(&sequence, greater, &queries), vec![4, 2, 2]);
//! assert_eq!(descending_upper_bound(&sequence, greater, &queries), vec![5, 3, 2]);
//! assert_eq!(descending_contains(&sequence, greater, &queries), vec![true, true, false]);
//!
//! // Check available parallel resources
//! let caps = descend::get_exec_capabilities();
//! println!("Worker threads: {}", caps.worker_threads);
//! ```

pub mod constants;
pub mod dispatch;
pub mod sorted;
pub mod traverse;
pub mod types;

pub use dispatch::*;
pub use sorted::SortedView;
pub use types::*;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
#[path = "tests/traverse_tests.rs"]
mod traverse_tests;
#[cfg(test)]
#[path = "tests/sorted_tests.rs"]
mod sorted_tests;
#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod dispatch_tests;
#[cfg(test)]
#[path = "tests/tabulate_tests.rs"]
mod tabulate_tests;
#[cfg(test)]
#[path = "tests/property_tests.rs"]
mod property_tests;
