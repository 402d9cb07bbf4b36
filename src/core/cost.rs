//! Partition cost: lookups into the distance matrix, no hidden state.

use crate::core::distance::DistanceMatrix;

/// Sum of distances over all unordered member pairs
#[inline]
pub fn group_cost(group: &[usize], matrix: &DistanceMatrix) -> u64 {
    let mut cost = 0u64;
    for (i, &a) in group.iter().enumerate() {
        for &b in &group[i + 1..] {
            cost += matrix.get(a, b) as u64;
        }
    }
    cost
}

/// Sum of `group_cost` over every group
pub fn total_cost<G: AsRef<[usize]>>(groups: &[G], matrix: &DistanceMatrix) -> u64 {
    groups.iter().map(|g| group_cost(g.as_ref(), matrix)).sum()
}

/// Cost added by seating `person` in `group`, without modifying it
#[inline]
pub fn marginal_cost(group: &[usize], person: usize, matrix: &DistanceMatrix) -> u64 {
    let row = matrix.row(person);
    group.iter().map(|&x| row[x] as u64).sum()
}

/// Cost saved by taking `person` out of `group`
#[inline]
pub fn removal_cost(group: &[usize], person: usize, matrix: &DistanceMatrix) -> u64 {
    let row = matrix.row(person);
    group
        .iter()
        .filter(|&&x| x != person)
        .map(|&x| row[x] as u64)
        .sum()
}
