use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("dataset has no activity array (expected a list or one of: {})", .0.join(", "))]
    MissingRecords(Vec<String>),

    #[error("unknown area: {0}")]
    UnknownArea(String),

    #[error("unknown equipment: {0}")]
    UnknownEquipment(String),

    #[error("invalid date '{0}' (expected dd/mm/yyyy or yyyy-mm-dd)")]
    InvalidDate(String),

    #[error("invalid month '{0}' (expected 1-12)")]
    InvalidMonth(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
