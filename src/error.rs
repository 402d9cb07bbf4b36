use thiserror::Error;

/// Errors raised by the grouping engine before or while it runs
#[derive(Debug, Error)]
pub enum GroupingError {
    #[error("too few persons: found {found}, at least {required} required")]
    TooFewPersons { found: usize, required: usize },

    #[error("person {person} has {found} ratings, expected {expected}")]
    LikertLengthMismatch {
        person: usize,
        expected: usize,
        found: usize,
    },

    #[error("cannot form {groups} groups from {persons} persons")]
    InvalidGroupCount { groups: usize, persons: usize },

    #[error("invalid grouping parameters: {0}")]
    InvalidParameters(String),
}

/// Errors that can occur while reading survey answers
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: expected {expected} ratings, found {found}")]
    WrongRatingCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column {column}: '{value}' is not an integer rating")]
    InvalidRating {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("row {row}, column {column}: rating {value} outside scale {min}..={max}")]
    RatingOutOfScale {
        row: usize,
        column: usize,
        value: i64,
        min: u8,
        max: u8,
    },

    #[error(transparent)]
    Grouping(#[from] GroupingError),
}

pub type Result<T, E = GroupingError> = std::result::Result<T, E>;
