use crate::core::cost::marginal_cost;
use crate::core::distance::DistanceMatrix;
use crate::core::metrics::OpCounter;
use crate::models::{Degradation, Partition};

/// Result of the greedy pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub groups: Partition,
    /// Persons seated after every group had reached `max_size`
    pub overflow: Vec<Degradation>,
}

/// Seat every non-seed person in the group where they add the least cost
///
/// Persons are visited in decreasing order of their total distance to
/// everyone else, so outliers choose first. Groups at `max_size` are
/// skipped; if all groups are full the person goes to the cheapest group
/// anyway and the overflow is recorded.
pub fn greedy_fill(
    seeds: &[usize],
    max_size: usize,
    matrix: &DistanceMatrix,
    ops: &mut OpCounter,
) -> Assignment {
    let n = matrix.len();
    let mut groups: Partition = seeds.iter().map(|&s| vec![s]).collect();
    let mut overflow = Vec::new();

    let mut is_seed = vec![false; n];
    for &s in seeds {
        is_seed[s] = true;
    }

    // Same order as the average distance, without the division
    let spread: Vec<u64> = (0..n)
        .map(|i| matrix.row(i).iter().map(|&d| d as u64).sum())
        .collect();

    let mut unassigned: Vec<usize> = (0..n).filter(|&i| !is_seed[i]).collect();
    unassigned.sort_by(|&a, &b| spread[b].cmp(&spread[a]));

    for person in unassigned {
        let mut best: Option<(usize, u64)> = None;
        for (gi, group) in groups.iter().enumerate() {
            ops.tick();
            if group.len() >= max_size {
                continue;
            }
            ops.count(group.len());
            let delta = marginal_cost(group, person, matrix);
            if best.map_or(true, |(_, d)| delta < d) {
                best = Some((gi, delta));
            }
        }

        let target = match best {
            Some((gi, _)) => gi,
            None => {
                let gi = cheapest_group(&groups, person, matrix, ops);
                tracing::warn!(
                    "All groups full, placing person {} in group {} above max size {}",
                    person,
                    gi + 1,
                    max_size
                );
                overflow.push(Degradation::CapacityOverflow { person, group: gi });
                gi
            }
        };

        groups[target].push(person);
    }

    Assignment { groups, overflow }
}

/// Group with the smallest marginal cost, ignoring capacity
fn cheapest_group(
    groups: &Partition,
    person: usize,
    matrix: &DistanceMatrix,
    ops: &mut OpCounter,
) -> usize {
    let mut best = (0, u64::MAX);
    for (gi, group) in groups.iter().enumerate() {
        ops.count(group.len());
        let delta = marginal_cost(group, person, matrix);
        if delta < best.1 {
            best = (gi, delta);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two tight clusters {0,1,2} and {3,4,5} far apart
    fn two_clusters() -> DistanceMatrix {
        let pos: [i64; 6] = [0, 1, 2, 50, 51, 52];
        let rows: Vec<Vec<u32>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).unsigned_abs() as u32).collect())
            .collect();
        DistanceMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_fills_by_marginal_cost() {
        let m = two_clusters();
        let result = greedy_fill(&[0, 5], 3, &m, &mut OpCounter::disabled());

        let mut g0 = result.groups[0].clone();
        let mut g1 = result.groups[1].clone();
        g0.sort_unstable();
        g1.sort_unstable();
        assert_eq!(g0, vec![0, 1, 2]);
        assert_eq!(g1, vec![3, 4, 5]);
        assert!(result.overflow.is_empty());
    }

    #[test]
    fn test_every_person_seated_once() {
        let m = two_clusters();
        let result = greedy_fill(&[2, 3], 4, &m, &mut OpCounter::disabled());

        let mut all: Vec<usize> = result.groups.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_respects_max_size() {
        let m = two_clusters();
        // Seeds both in the first cluster: the far cluster must split
        let result = greedy_fill(&[0, 1], 3, &m, &mut OpCounter::disabled());

        for group in &result.groups {
            assert!(group.len() <= 3);
        }
        assert!(result.overflow.is_empty());
    }

    #[test]
    fn test_overflow_when_all_groups_full() {
        let m = two_clusters();
        let result = greedy_fill(&[0, 3], 2, &m, &mut OpCounter::disabled());

        let seated: usize = result.groups.iter().map(|g| g.len()).sum();
        assert_eq!(seated, 6);
        assert_eq!(result.overflow.len(), 2);
        for d in &result.overflow {
            assert!(matches!(d, Degradation::CapacityOverflow { .. }));
        }
    }

    #[test]
    fn test_peripheral_persons_first() {
        let m = DistanceMatrix::from_rows(&[
            vec![0, 1, 1, 9],
            vec![1, 0, 1, 9],
            vec![1, 1, 0, 9],
            vec![9, 9, 9, 0],
        ])
        .unwrap();
        // Outlier 3 picks first and takes the first of two equally bad slots
        let result = greedy_fill(&[0, 1], 2, &m, &mut OpCounter::disabled());
        assert_eq!(result.groups, vec![vec![0, 3], vec![1, 2]]);
        assert!(result.overflow.is_empty());
    }
}
