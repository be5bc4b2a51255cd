// SPDX-License-Identifier: Apache-2.0

//! Test-only helpers.

use rand::distributions::uniform::SampleUniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Route `log` output through the test harness. Safe to call from every test.
pub fn config_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Input sizes that cover empty, tiny, odd, power-of-two, and past the parallel threshold.
pub fn get_sizes() -> Vec<usize> {
    vec![0, 1, 2, 12, 63, 64, 211, 256, 344, 999, 1023, 1024, 4096, 8191]
}

/// `size` values uniformly drawn from `[min, max]`, reproducible per `seed`.
pub fn get_random_data<T>(size: usize, min: T, max: T, seed: u64) -> Vec<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size).map(|_| rng.gen_range(min..=max)).collect()
}

/// Random data sorted descending.
pub fn get_random_descending<T>(size: usize, min: T, max: T, seed: u64) -> Vec<T>
where
    T: SampleUniform + Ord + Copy,
{
    let mut data = get_random_data(size, min, max, seed);
    data.sort_unstable_by(|a, b| b.cmp(a));
    data
}

/// Reference lower bound for a descending slice: elements strictly greater than `q`.
pub fn count_greater<T: PartialOrd>(data: &[T], q: &T) -> usize {
    data.iter().filter(|x| *x > q).count()
}

/// Reference upper bound for a descending slice: elements not strictly less than `q`.
pub fn count_not_less<T: PartialOrd>(data: &[T], q: &T) -> usize {
    data.iter().filter(|x| *x >= q).count()
}
