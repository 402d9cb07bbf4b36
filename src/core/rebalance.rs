use crate::core::cost::{marginal_cost, removal_cost};
use crate::core::distance::DistanceMatrix;
use crate::core::metrics::OpCounter;
use crate::models::{Degradation, Partition};

/// A single member transfer between groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Move {
    donor: usize,
    slot: usize,
    receiver: usize,
    delta: i64,
}

/// Lift groups below `min_size` by pulling in members from larger groups
///
/// For each undersized group the cheapest valid move is applied, where
/// cost = (marginal cost in the receiver) - (cost saved in the donor).
/// A donor must stay at or above `min_size` and the receiver must stay at
/// or below `max_size`. Passes repeat until nothing is undersized or no
/// move was possible; groups that could not be fixed are returned.
pub fn rebalance(
    groups: &mut Partition,
    min_size: usize,
    max_size: usize,
    matrix: &DistanceMatrix,
    ops: &mut OpCounter,
) -> Vec<Degradation> {
    let mut changed = true;
    while changed {
        changed = false;

        let small: Vec<usize> = undersized(groups, min_size).collect();
        if small.is_empty() {
            break;
        }

        for receiver in small {
            if !groups.iter().any(|g| g.len() > min_size) {
                break;
            }

            let Some(mv) = best_move(groups, receiver, min_size, max_size, matrix, ops) else {
                continue;
            };

            let person = groups[mv.donor].remove(mv.slot);
            groups[mv.receiver].push(person);
            changed = true;

            tracing::trace!(
                "Moved person {} from group {} to group {} (delta {})",
                person,
                mv.donor + 1,
                mv.receiver + 1,
                mv.delta
            );
        }
    }

    let left: Vec<Degradation> = groups
        .iter()
        .enumerate()
        .filter(|(_, g)| g.len() < min_size)
        .map(|(gi, g)| Degradation::Undersized {
            group: gi,
            size: g.len(),
            min_size,
        })
        .collect();

    for d in &left {
        tracing::warn!("Rebalancing left {}", d);
    }

    left
}

fn undersized(groups: &Partition, min_size: usize) -> impl Iterator<Item = usize> + '_ {
    groups
        .iter()
        .enumerate()
        .filter(move |(_, g)| g.len() < min_size)
        .map(|(gi, _)| gi)
}

fn best_move(
    groups: &Partition,
    receiver: usize,
    min_size: usize,
    max_size: usize,
    matrix: &DistanceMatrix,
    ops: &mut OpCounter,
) -> Option<Move> {
    let target = &groups[receiver];
    let mut best: Option<Move> = None;

    for (donor, group) in groups.iter().enumerate() {
        if donor == receiver || group.len() <= min_size {
            continue;
        }
        for (slot, &person) in group.iter().enumerate() {
            ops.tick();

            if group.len() - 1 < min_size || target.len() + 1 > max_size {
                continue;
            }

            ops.count(target.len() + group.len());
            let add = marginal_cost(target, person, matrix) as i64;
            let remove = removal_cost(group, person, matrix) as i64;
            let delta = add - remove;

            if best.map_or(true, |b| delta < b.delta) {
                best = Some(Move { donor, slot, receiver, delta });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(pos: &[i64]) -> DistanceMatrix {
        let rows: Vec<Vec<u32>> = pos
            .iter()
            .map(|a| pos.iter().map(|b| (a - b).unsigned_abs() as u32).collect())
            .collect();
        DistanceMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_moves_cheapest_member() {
        // Person 3 sits closest to the small group {4}
        let m = line(&[0, 1, 2, 8, 10]);
        let mut groups = vec![vec![0, 1, 2, 3], vec![4]];

        let left = rebalance(&mut groups, 2, 4, &m, &mut OpCounter::disabled());

        assert!(left.is_empty());
        assert_eq!(groups, vec![vec![0, 1, 2], vec![4, 3]]);
    }

    #[test]
    fn test_fills_multiple_small_groups() {
        let m = line(&[0, 1, 2, 3, 4, 5, 20, 40]);
        let mut groups = vec![vec![0, 1, 2, 3, 4, 5], vec![6], vec![7]];

        let left = rebalance(&mut groups, 2, 6, &m, &mut OpCounter::disabled());

        assert!(left.is_empty());
        for g in &groups {
            assert!(g.len() >= 2);
        }
        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_never_drains_donor_below_min() {
        let m = line(&[0, 1, 2, 3, 10]);
        let mut groups = vec![vec![0, 1], vec![2, 3], vec![4]];

        let left = rebalance(&mut groups, 2, 3, &m, &mut OpCounter::disabled());

        // No group has a spare member
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3], vec![4]]);
        assert_eq!(
            left,
            vec![Degradation::Undersized { group: 2, size: 1, min_size: 2 }]
        );
    }

    #[test]
    fn test_respects_receiver_max() {
        let m = line(&[0, 1, 2, 3, 4, 5]);
        let mut groups = vec![vec![0, 1, 2, 3, 4], vec![5]];

        // Receiver may not exceed max_size = 1
        let left = rebalance(&mut groups, 2, 1, &m, &mut OpCounter::disabled());
        assert_eq!(groups[1], vec![5]);
        assert_eq!(left.len(), 1);
    }

    #[test]
    fn test_no_op_when_balanced() {
        let m = line(&[0, 1, 2, 3]);
        let mut groups = vec![vec![0, 1], vec![2, 3]];
        let left = rebalance(&mut groups, 2, 2, &m, &mut OpCounter::disabled());
        assert!(left.is_empty());
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
    }
}
