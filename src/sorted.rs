// SPDX-License-Identifier: Apache-2.0

//! Typed view over a slice that is sorted under a known order.
//!
//! The bound searches trust their input: running them over an unsorted slice
//! returns an arbitrary index rather than an error. `SortedView` moves the
//! sortedness check to construction time so it runs at most once per slice, and
//! the searches never re-validate.

use std::ops::Range;

use crate::traverse;
use crate::types::{DescendError, Result};

/// A borrowed slice paired with the strict order it is sorted under.
///
/// For a descending sequence the order is `greater`:
///
/// ```rust
/// use descend::SortedView;
///
/// let data = [8, 7, 5, 2, 0];
/// let view = SortedView::new(&data, |a: &i32, b: &i32| a > b);
///
/// assert_eq!(view.lower_bound(&5), 2);
/// assert_eq!(view.upper_bound(&5), 3);
/// assert!(view.contains(&5));
/// assert!(!view.contains(&6));
/// ```
#[derive(Clone, Copy)]
pub struct SortedView<'a, T, F> {
    data: &'a [T],
    order: F,
}

impl<'a, T, F> SortedView<'a, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Wrap `data` without checking it in release builds.
    ///
    /// Debug builds verify sortedness and panic on violation; an unsorted slice is
    /// a caller bug, not a runtime condition.
    #[inline]
    pub fn new(data: &'a [T], order: F) -> Self {
        debug_assert!(
            traverse::first_unsorted_index(data, &order).is_none(),
            "SortedView::new: slice is not sorted under the given order"
        );
        Self { data, order }
    }

    /// Wrap `data` after an O(n) sortedness check.
    pub fn try_new(data: &'a [T], order: F) -> Result<Self> {
        if let Some(index) = traverse::first_unsorted_index(data, &order) {
            return Err(DescendError::NotSorted { index });
        }
        Ok(Self { data, order })
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn order(&self) -> &F {
        &self.order
    }

    /// Number of leading elements that go strictly before `value`.
    #[inline]
    pub fn lower_bound(&self, value: &T) -> usize {
        traverse::lower_bound_by(self.data, value, &self.order)
    }

    /// Number of leading elements that do not go strictly after `value`.
    #[inline]
    pub fn upper_bound(&self, value: &T) -> usize {
        traverse::upper_bound_by(self.data, value, &self.order)
    }

    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        traverse::contains_by(self.data, value, &self.order)
    }

    #[inline]
    pub fn equal_range(&self, value: &T) -> Range<usize> {
        traverse::equal_range_by(self.data, value, &self.order)
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for SortedView<'_, T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedView").field("data", &self.data).finish_non_exhaustive()
    }
}
