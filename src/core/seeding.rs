use rand::Rng;

use crate::core::distance::DistanceMatrix;
use crate::core::metrics::OpCounter;
use crate::error::{GroupingError, Result};

/// Pick `k` well-separated anchor persons (maximin / farthest-point)
///
/// The first anchor is drawn uniformly from `rng`. Each following anchor is
/// the unselected person whose nearest already-chosen anchor is farthest
/// away; ties go to the lowest index.
pub fn pick_seeds<R: Rng + ?Sized>(
    k: usize,
    matrix: &DistanceMatrix,
    rng: &mut R,
    ops: &mut OpCounter,
) -> Result<Vec<usize>> {
    let n = matrix.len();
    if k == 0 || k > n {
        return Err(GroupingError::InvalidGroupCount { groups: k, persons: n });
    }

    let mut seeds = Vec::with_capacity(k);
    let mut selected = vec![false; n];
    // Distance from each person to its nearest seed so far
    let mut nearest = vec![u32::MAX; n];

    let first = rng.random_range(0..n);
    seeds.push(first);
    selected[first] = true;
    update_nearest(&mut nearest, matrix.row(first));

    while seeds.len() < k {
        let mut best: Option<(usize, u32)> = None;
        for i in 0..n {
            ops.tick();
            if selected[i] {
                continue;
            }
            let score = nearest[i];
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }

        // k <= n guarantees an unselected candidate remains
        let Some((next, _)) = best else { break };
        seeds.push(next);
        selected[next] = true;
        update_nearest(&mut nearest, matrix.row(next));
    }

    tracing::trace!("Seeds: {:?}", seeds);
    Ok(seeds)
}

#[inline]
fn update_nearest(nearest: &mut [u32], row: &[u32]) {
    for (n, &d) in nearest.iter_mut().zip(row) {
        *n = (*n).min(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    // Points on a line at 0, 1, 2, 10, 11, 20
    fn line_matrix() -> DistanceMatrix {
        let pos: [i64; 6] = [0, 1, 2, 10, 11, 20];
        let rows: Vec<Vec<u32>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).unsigned_abs() as u32).collect())
            .collect();
        DistanceMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_seeds_are_distinct() {
        let m = line_matrix();
        let mut rng = StdRng::seed_from_u64(7);
        let seeds = pick_seeds(6, &m, &mut rng, &mut OpCounter::disabled()).unwrap();

        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_seeds_spread_apart() {
        let m = line_matrix();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let seeds = pick_seeds(3, &m, &mut rng, &mut OpCounter::disabled()).unwrap();

            // Whatever the first pick, the three anchors land in the three clusters
            let clusters: Vec<u8> = seeds
                .iter()
                .map(|&s| match s {
                    0..=2 => 0,
                    3 | 4 => 1,
                    _ => 2,
                })
                .collect();
            let mut unique = clusters.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), 3, "seed {} picked {:?}", seed, seeds);
        }
    }

    #[test]
    fn test_same_rng_seed_same_anchors() {
        let m = line_matrix();
        let a = pick_seeds(4, &m, &mut StdRng::seed_from_u64(3), &mut OpCounter::disabled()).unwrap();
        let b = pick_seeds(4, &m, &mut StdRng::seed_from_u64(3), &mut OpCounter::disabled()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_many_seeds() {
        let m = line_matrix();
        let mut rng = StdRng::seed_from_u64(1);
        let err = pick_seeds(7, &m, &mut rng, &mut OpCounter::disabled()).unwrap_err();
        assert!(matches!(err, GroupingError::InvalidGroupCount { groups: 7, persons: 6 }));
    }
}
