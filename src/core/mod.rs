// Core algorithm exports
pub mod assign;
pub mod cost;
pub mod distance;
pub mod grouper;
pub mod metrics;
pub mod rebalance;
pub mod refine;
pub mod seeding;

pub use assign::{greedy_fill, Assignment};
pub use cost::{group_cost, marginal_cost, removal_cost, total_cost};
pub use distance::{DistanceMatrix, DistanceModel};
pub use grouper::{check_population, Grouper, GroupingOutcome, RestartOutcome, MIN_PERSONS};
pub use metrics::OpCounter;
pub use rebalance::rebalance;
pub use refine::{improve_by_swaps, swap_delta, RefineStats};
pub use seeding::pick_seeds;
