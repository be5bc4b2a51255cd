// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
mod tests {
    use log::debug;

    use crate::test_utils::{config_test_logger, count_greater, count_not_less};
    use crate::traverse::{
        contains_by, equal_range_by, first_unsorted_index, lower_bound_by, search_batch_parallel,
        search_batch_scalar, upper_bound_by,
    };

    fn greater(a: &i32, b: &i32) -> bool {
        a > b
    }

    fn less(a: &i32, b: &i32) -> bool {
        a < b
    }

    // =============================================================================
    //  SINGLE-QUERY KERNELS
    // =============================================================================

    /// Check every kernel for `target` against the counting reference.
    fn check_descending_kernels(array: &[i32], target: i32, test_name: &str) {
        let lower = lower_bound_by(array, &target, &greater);
        let upper = upper_bound_by(array, &target, &greater);

        assert_eq!(
            lower,
            count_greater(array, &target),
            "{}: lower bound of {} in {:?}",
            test_name,
            target,
            array
        );
        assert_eq!(
            upper,
            count_not_less(array, &target),
            "{}: upper bound of {} in {:?}",
            test_name,
            target,
            array
        );
        assert!(lower <= upper, "{}: lower={} > upper={}", test_name, lower, upper);
        assert_eq!(
            contains_by(array, &target, &greater),
            lower != upper,
            "{}: contains({}) disagrees with bounds",
            test_name,
            target
        );
        assert_eq!(equal_range_by(array, &target, &greater), lower..upper, "{}", test_name);

        if lower < array.len() {
            assert!(
                array[lower] <= target,
                "{}: array[{}]={} should be <= target={}",
                test_name,
                lower,
                array[lower],
                target
            );
        }
        if lower > 0 {
            assert!(
                array[lower - 1] > target,
                "{}: array[{}]={} should be > target={}",
                test_name,
                lower - 1,
                array[lower - 1],
                target
            );
        }
    }

    #[test]
    fn test_descending_bounds_simple() {
        config_test_logger();

        let array = [8, 7, 5, 2, 0];
        let lower: Vec<usize> = (0..10).map(|q| lower_bound_by(&array, &q, &greater)).collect();
        let upper: Vec<usize> = (0..10).map(|q| upper_bound_by(&array, &q, &greater)).collect();
        let found: Vec<bool> = (0..10).map(|q| contains_by(&array, &q, &greater)).collect();

        assert_eq!(lower, vec![4, 4, 3, 3, 3, 2, 2, 1, 0, 0]);
        assert_eq!(upper, vec![5, 4, 4, 3, 3, 3, 2, 2, 1, 0]);
        assert_eq!(
            found,
            vec![true, false, true, false, false, true, false, true, true, false]
        );
    }

    #[test]
    fn test_descending_kernels_patterns() {
        config_test_logger();

        let values = vec![500, 400, 300, 200, 100];
        for target in [600, 500, 450, 300, 250, 100, 50] {
            check_descending_kernels(&values, target, "distinct");
        }

        let duplicates = vec![3000, 2000, 2000, 2000, 1000];
        for target in [3000, 2000, 1500, 1000, 0] {
            check_descending_kernels(&duplicates, target, "duplicates");
        }
    }

    #[test]
    fn test_descending_kernels_edge_cases() {
        config_test_logger();

        // Empty array
        for target in [i32::MIN, 0, i32::MAX] {
            check_descending_kernels(&[], target, "empty_array");
            assert_eq!(lower_bound_by(&[], &target, &greater), 0);
            assert_eq!(upper_bound_by(&[], &target, &greater), 0);
            assert!(!contains_by(&[], &target, &greater));
        }

        // Single element
        check_descending_kernels(&[500], 500, "single_equal");
        check_descending_kernels(&[500], 600, "single_larger");
        check_descending_kernels(&[500], 400, "single_smaller");

        // All equal
        let all_equal = [4, 4, 4];
        assert_eq!(lower_bound_by(&all_equal, &4, &greater), 0);
        assert_eq!(upper_bound_by(&all_equal, &4, &greater), 3);
        assert!(contains_by(&all_equal, &4, &greater));
        check_descending_kernels(&all_equal, 5, "all_equal_above");
        check_descending_kernels(&all_equal, 3, "all_equal_below");

        // Extremes of the value range
        let extremes = [i32::MAX, 0, i32::MIN];
        for target in [i32::MAX, i32::MAX - 1, 0, i32::MIN + 1, i32::MIN] {
            check_descending_kernels(&extremes, target, "extremes");
        }
    }

    #[test]
    fn test_descending_kernels_large_array() {
        config_test_logger();

        let large: Vec<i32> = (0..1000).rev().map(|i| i * 1000).collect(); // [999000, ..., 1000, 0]
        for target in [-1, 0, 1, 500_000, 500_001, 999_000, 1_500_000] {
            check_descending_kernels(&large, target, "large");
        }
    }

    #[test]
    fn test_ascending_kernels_match_partition_point() {
        config_test_logger();

        let ascending = vec![1, 3, 3, 3, 7, 9, 9, 12];
        for target in -1..14 {
            assert_eq!(
                lower_bound_by(&ascending, &target, &less),
                ascending.partition_point(|x| *x < target),
                "lower bound of {}",
                target
            );
            assert_eq!(
                upper_bound_by(&ascending, &target, &less),
                ascending.partition_point(|x| *x <= target),
                "upper bound of {}",
                target
            );
            assert_eq!(
                contains_by(&ascending, &target, &less),
                ascending.binary_search(&target).is_ok(),
                "contains {}",
                target
            );
        }
    }

    #[test]
    fn test_first_unsorted_index() {
        config_test_logger();

        assert_eq!(first_unsorted_index::<i32, _>(&[], &greater), None);
        assert_eq!(first_unsorted_index(&[1], &greater), None);
        assert_eq!(first_unsorted_index(&[5, 5, 3, 3, 1], &greater), None);
        assert_eq!(first_unsorted_index(&[1, 3, 2], &greater), Some(0));
        assert_eq!(first_unsorted_index(&[9, 8, 8, 10], &greater), Some(2));
        assert_eq!(first_unsorted_index(&[1, 2, 2, 3], &less), None);
    }

    // =============================================================================
    //  BATCH DRIVERS
    // =============================================================================

    #[test]
    fn test_batch_drivers_agree() {
        config_test_logger();

        let array: Vec<i32> = (0..5000).rev().map(|i| i / 3).collect();
        let queries: Vec<i32> = (-10..1700).collect();

        let mut scalar = vec![0usize; queries.len()];
        let mut parallel = vec![usize::MAX; queries.len()];

        search_batch_scalar(&queries, &mut scalar, |q| lower_bound_by(&array, q, &greater));
        search_batch_parallel(
            &queries,
            &mut parallel,
            |q| lower_bound_by(&array, q, &greater),
            64,
        );

        debug!("batch drivers: {} queries over {} elements", queries.len(), array.len());
        assert_eq!(scalar, parallel);
        for (q, idx) in queries.iter().zip(scalar.iter()) {
            assert_eq!(*idx, count_greater(&array, q), "query {}", q);
        }
    }

    #[test]
    fn test_batch_parallel_zero_chunk_is_clamped() {
        config_test_logger();

        let array = [8, 7, 5, 2, 0];
        let queries: Vec<i32> = (0..10).collect();
        let mut out = vec![false; queries.len()];

        search_batch_parallel(&queries, &mut out, |q| contains_by(&array, q, &greater), 0);

        assert_eq!(
            out,
            vec![true, false, true, false, false, true, false, true, true, false]
        );
    }
}
