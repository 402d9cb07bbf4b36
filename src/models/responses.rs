use serde::{Deserialize, Serialize};
use crate::models::domain::Degradation;

/// Serializable result of a grouping run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingReport {
    pub run_id: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub total_cost: u64,
    pub best_restart: u32,
    pub restarts: u32,
    pub groups: Vec<GroupReport>,
    #[serde(default)]
    pub degradations: Vec<Degradation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// One group in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    pub index: usize,
    pub size: usize,
    pub cost: u64,
    pub members: Vec<MemberReport>,
}

/// One member line in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberReport {
    pub person: usize,
    pub name: String,
    pub category: String,
}

/// Optional performance information
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Diagnostics {
    pub operations: u64,
    pub elapsed_secs: f64,
}
