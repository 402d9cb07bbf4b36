use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::GroupingError;

/// Parameters for one grouping run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_size_bounds"))]
pub struct GroupingParams {
    #[validate(range(min = 1))]
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    #[validate(range(min = 1))]
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    #[validate(range(min = 1))]
    #[serde(default = "default_target_size")]
    pub target_size: usize,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    #[validate(range(min = 1))]
    #[serde(default = "default_restarts")]
    pub restarts: u32,
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
}

fn default_min_size() -> usize { 4 }
fn default_max_size() -> usize { 6 }
fn default_target_size() -> usize { 5 }
fn default_random_seed() -> u64 { 42 }
fn default_restarts() -> u32 { 50 }
fn default_max_iters() -> usize { 5000 }

impl Default for GroupingParams {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_size: default_max_size(),
            target_size: default_target_size(),
            random_seed: default_random_seed(),
            restarts: default_restarts(),
            max_iters: default_max_iters(),
        }
    }
}

impl GroupingParams {
    /// Run field and cross-field validation, mapping failures into the engine's error type
    ///
    /// `target_size` only steers the group count and may sit outside
    /// `[min_size, max_size]`; the resulting size problems surface as
    /// degradations.
    pub fn check(&self) -> Result<(), GroupingError> {
        self.validate()
            .map_err(|errors| GroupingError::InvalidParameters(errors.to_string()))
    }

    /// Number of groups to form for `n` persons
    ///
    /// `n / target_size` rounded half-to-even, never less than one.
    pub fn group_count(&self, n: usize) -> usize {
        let k = (n as f64 / self.target_size as f64).round_ties_even() as usize;
        k.max(1)
    }
}

fn validate_size_bounds(params: &GroupingParams) -> Result<(), ValidationError> {
    if params.min_size > params.max_size {
        return Err(ValidationError::new("min_size_exceeds_max_size"));
    }
    Ok(())
}
