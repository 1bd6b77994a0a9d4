use thiserror::Error;

#[derive(Debug, Error)]
pub enum DuesError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("week index {index} is out of range (expected 0..{weeks})")]
    WeekOutOfRange { index: usize, weeks: usize },

    #[error("A roster is already stored under {key}; pass --force to replace it")]
    AlreadyStored { key: String },

    #[error("Missing API key for the advisory service")]
    MissingCredential,

    #[error("Advisory service error: {0}")]
    Service(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type DuesResult<T> = Result<T, DuesError>;
