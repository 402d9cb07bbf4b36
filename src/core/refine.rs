use crate::core::distance::DistanceMatrix;
use crate::core::metrics::OpCounter;
use crate::models::Partition;

/// Default cap on scan passes
pub const DEFAULT_MAX_ITERS: usize = 5000;

/// What the hill climb did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineStats {
    /// Scan passes started
    pub passes: usize,
    /// Improving swaps applied
    pub swaps: usize,
    /// Sum of all applied deltas (always <= 0)
    pub gain: i64,
}

/// First-improvement hill climbing over single member swaps
///
/// Scans group pairs (g1 < g2), then members a in g1 and b in g2. The first
/// swap that strictly lowers cost(g1) + cost(g2) is applied and the scan
/// starts over. Stops after a pass with no improvement or after
/// `max_iters` passes. Group sizes never change.
pub fn improve_by_swaps(
    groups: &mut Partition,
    matrix: &DistanceMatrix,
    max_iters: usize,
    ops: &mut OpCounter,
) -> RefineStats {
    let mut stats = RefineStats::default();

    while stats.passes < max_iters {
        stats.passes += 1;

        let Some((g1, a, g2, b, delta)) = first_improving_swap(groups, matrix, ops) else {
            break;
        };

        let pa = groups[g1][a];
        let pb = groups[g2][b];
        groups[g1][a] = pb;
        groups[g2][b] = pa;

        stats.swaps += 1;
        stats.gain += delta;
        tracing::trace!(
            "Swapped person {} (group {}) with person {} (group {}), delta {}",
            pa,
            g1 + 1,
            pb,
            g2 + 1,
            delta
        );
    }

    stats
}

fn first_improving_swap(
    groups: &Partition,
    matrix: &DistanceMatrix,
    ops: &mut OpCounter,
) -> Option<(usize, usize, usize, usize, i64)> {
    for g1 in 0..groups.len() {
        for g2 in (g1 + 1)..groups.len() {
            let (left, right) = (&groups[g1], &groups[g2]);
            for (a_idx, &a) in left.iter().enumerate() {
                for (b_idx, &b) in right.iter().enumerate() {
                    ops.tick();
                    let delta = swap_delta(left, a, right, b, matrix);
                    if delta < 0 {
                        return Some((g1, a_idx, g2, b_idx, delta));
                    }
                }
            }
        }
    }
    None
}

/// Change of cost(left) + cost(right) if `a` (in left) and `b` (in right) trade places
#[inline]
pub fn swap_delta(left: &[usize], a: usize, right: &[usize], b: usize, matrix: &DistanceMatrix) -> i64 {
    let (row_a, row_b) = (matrix.row(a), matrix.row(b));
    let mut delta = 0i64;

    for &x in left {
        if x != a {
            delta += row_b[x] as i64 - row_a[x] as i64;
        }
    }
    for &y in right {
        if y != b {
            delta += row_a[y] as i64 - row_b[y] as i64;
        }
    }

    delta
}
