use rand::{rngs::StdRng, SeedableRng};

use crate::core::{
    assign::greedy_fill,
    cost::{group_cost, total_cost},
    distance::{DistanceMatrix, DistanceModel},
    metrics::OpCounter,
    rebalance::rebalance,
    refine::improve_by_swaps,
    seeding::pick_seeds,
};
use crate::error::{GroupingError, Result};
use crate::models::{Degradation, GroupingParams, Partition, Person};

/// Smallest survey the grouping problem is considered well-posed for
pub const MIN_PERSONS: usize = 20;

/// Reject populations too small to group sensibly
pub fn check_population(found: usize, required: usize) -> Result<()> {
    if found < required {
        return Err(GroupingError::TooFewPersons { found, required });
    }
    Ok(())
}

/// Best partition found across all restarts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingOutcome {
    pub groups: Partition,
    pub cost: u64,
    pub group_costs: Vec<u64>,
    /// Constraint violations accepted in the returned partition
    pub degradations: Vec<Degradation>,
    /// Restart index that produced `groups`
    pub best_restart: u32,
    pub restarts: u32,
    /// Total operations over matrix build and all restarts (0 unless diagnostics)
    pub ops: u64,
}

/// Partition produced by a single seeded restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartOutcome {
    pub groups: Partition,
    pub cost: u64,
    pub degradations: Vec<Degradation>,
}

/// Restart orchestrator
///
/// # Pipeline per restart
/// 1. Maximin seeding (random first anchor)
/// 2. Greedy fill by marginal cost
/// 3. Rebalance undersized groups
/// 4. Swap-based hill climbing
///
/// The lowest-cost partition over all restarts wins; earlier restarts win ties.
#[derive(Debug, Clone)]
pub struct Grouper {
    params: GroupingParams,
    model: DistanceModel,
    diagnostics: bool,
}

impl Grouper {
    pub fn new(params: GroupingParams, model: DistanceModel) -> Self {
        Self {
            params,
            model,
            diagnostics: false,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(GroupingParams::default(), DistanceModel::default())
    }

    /// Count operations while running
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn params(&self) -> &GroupingParams {
        &self.params
    }

    pub fn model(&self) -> &DistanceModel {
        &self.model
    }

    fn counter(&self) -> OpCounter {
        if self.diagnostics {
            OpCounter::enabled()
        } else {
            OpCounter::disabled()
        }
    }

    /// Build the distance matrix for `persons` and run all restarts
    pub fn group(&self, persons: &[Person]) -> Result<GroupingOutcome> {
        let mut ops = self.counter();
        let matrix = DistanceMatrix::build(persons, &self.model, &mut ops)?;

        let mut outcome = self.group_with_matrix(&matrix)?;
        outcome.ops += ops.total();
        Ok(outcome)
    }

    /// Run all restarts over a prebuilt matrix
    pub fn group_with_matrix(&self, matrix: &DistanceMatrix) -> Result<GroupingOutcome> {
        self.params.check()?;

        let n = matrix.len();
        let k = self.params.group_count(n);
        if k > n {
            return Err(GroupingError::InvalidGroupCount { groups: k, persons: n });
        }

        tracing::info!(
            "Grouping {} persons into {} groups ({} restarts, seed {})",
            n,
            k,
            self.params.restarts,
            self.params.random_seed
        );

        let mut ops = self.counter();
        let mut best: Option<(u32, RestartOutcome)> = None;

        for r in 0..self.params.restarts {
            ops.tick();
            let mut restart_ops = ops.fork();
            let outcome = self.run_restart(matrix, k, r, &mut restart_ops)?;
            ops.merge(restart_ops);

            tracing::debug!("Restart {}: cost {}", r, outcome.cost);

            if best.as_ref().map_or(true, |(_, b)| outcome.cost < b.cost) {
                best = Some((r, outcome));
            }
        }

        // restarts >= 1 is validated above
        let (best_restart, best) = best.ok_or_else(|| {
            GroupingError::InvalidParameters("restarts must be at least 1".to_string())
        })?;

        let group_costs: Vec<u64> = best.groups.iter().map(|g| group_cost(g, matrix)).collect();

        tracing::info!(
            "Best partition from restart {} with cost {}",
            best_restart,
            best.cost
        );
        for d in &best.degradations {
            tracing::warn!("Result degraded: {}", d);
        }

        Ok(GroupingOutcome {
            groups: best.groups,
            cost: best.cost,
            group_costs,
            degradations: best.degradations,
            best_restart,
            restarts: self.params.restarts,
            ops: ops.total(),
        })
    }

    /// One seeded restart: seed, fill, rebalance, refine
    ///
    /// The random source is seeded with `random_seed + restart`.
    pub fn run_restart(
        &self,
        matrix: &DistanceMatrix,
        k: usize,
        restart: u32,
        ops: &mut OpCounter,
    ) -> Result<RestartOutcome> {
        let mut rng = StdRng::seed_from_u64(self.params.random_seed.wrapping_add(restart as u64));
        let GroupingParams { min_size, max_size, max_iters, .. } = self.params;

        let seeds = pick_seeds(k, matrix, &mut rng, ops)?;
        let assignment = greedy_fill(&seeds, max_size, matrix, ops);
        let mut groups = assignment.groups;
        let mut degradations = assignment.overflow;

        degradations.extend(rebalance(&mut groups, min_size, max_size, matrix, ops));

        let stats = improve_by_swaps(&mut groups, matrix, max_iters, ops);
        tracing::trace!(
            "Restart {}: {} swaps over {} passes",
            restart,
            stats.swaps,
            stats.passes
        );

        degradations.extend(
            groups
                .iter()
                .enumerate()
                .filter(|(_, g)| g.len() > max_size)
                .map(|(gi, g)| Degradation::Oversized {
                    group: gi,
                    size: g.len(),
                    max_size,
                }),
        );

        let cost = total_cost(&groups, matrix);
        Ok(RestartOutcome { groups, cost, degradations })
    }
}

impl Default for Grouper {
    fn default() -> Self {
        Self::with_defaults()
    }
}
