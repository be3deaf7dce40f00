//! Random discovery sampling without replacement.

use std::collections::BTreeSet;

use rand::Rng;

/// Draw up to `count` indices of `0..pool_len` that are not in `exclude`,
/// recording each draw in `exclude`. An exhausted pool yields fewer indices.
pub fn sample_indices<R: Rng + ?Sized>(
    pool_len: usize,
    count: usize,
    exclude: &mut BTreeSet<usize>,
    rng: &mut R,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..pool_len).filter(|i| !exclude.contains(i)).collect();
    let take = count.min(candidates.len());

    // partial Fisher-Yates: the first `take` slots end up a uniform sample
    for i in 0..take {
        let j = rng.gen_range(i..candidates.len());
        candidates.swap(i, j);
    }
    candidates.truncate(take);
    exclude.extend(candidates.iter().copied());
    candidates
}
