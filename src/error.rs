use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynergyError {
    /// Invalid catalog, level table or search parameters.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer failure during export.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed catalog JSON or result serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
