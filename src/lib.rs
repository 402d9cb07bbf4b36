//! Group Algo - balanced small-group builder for survey respondents
//!
//! This library partitions respondents into groups of similar people, given
//! their Likert-scale answers and one categorical answer. It combines maximin
//! seeding, greedy assignment, size rebalancing and swap-based hill climbing
//! over several seeded restarts.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DistanceMatrix, DistanceModel, Grouper, GroupingOutcome, OpCounter};
pub use crate::error::{GroupingError, LoadError};
pub use crate::models::{Degradation, GroupingParams, GroupingReport, Partition, Person};
