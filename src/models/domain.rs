use serde::{Deserialize, Serialize};

/// A single survey respondent
///
/// `likert` holds the ordinal answers in question order, `category` the
/// nominal answer. Records are never mutated once loaded; the engine only
/// refers to them by their index in the input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub likert: Vec<u8>,
    #[serde(alias = "kategorie")]
    pub category: String,
}

impl Person {
    pub fn new(name: impl Into<String>, likert: Vec<u8>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            likert,
            category: category.into(),
        }
    }
}

/// Indices into the person list that form one group
pub type Group = Vec<usize>;

/// Disjoint groups covering the person list
pub type Partition = Vec<Group>;

/// Constraint violations the heuristic accepts instead of failing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// Every group was full when this person had to be seated.
    CapacityOverflow { person: usize, group: usize },
    /// No valid donor move could lift this group to `min_size`.
    Undersized {
        group: usize,
        size: usize,
        min_size: usize,
    },
    /// Group ended above `max_size`.
    Oversized {
        group: usize,
        size: usize,
        max_size: usize,
    },
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Degradation::CapacityOverflow { person, group } => {
                write!(f, "person {} placed in full group {}", person, group + 1)
            }
            Degradation::Undersized { group, size, min_size } => {
                write!(f, "group {} has {} members (min {})", group + 1, size, min_size)
            }
            Degradation::Oversized { group, size, max_size } => {
                write!(f, "group {} has {} members (max {})", group + 1, size, max_size)
            }
        }
    }
}
