use thiserror::Error;

/// Fatal conditions that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("location '{location}' has {available} rows but its quota is {quota}")]
    UndersizedLocation {
        location: String,
        available: usize,
        quota: usize,
    },

    #[error("need {expected} ranked locations, found {found}")]
    NotEnoughLocations { expected: usize, found: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
