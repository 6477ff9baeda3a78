use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected {expected} payload, found {found}")]
    PayloadShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("record {location} is not an object")]
    RecordShape { location: String },
    #[error("row {index} has no group value (looked for {fields})")]
    MissingGroup { index: usize, fields: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
