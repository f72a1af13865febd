use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run. Row-level failures never surface
/// here; they travel inside `GenerationResult`.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid placeholder definitions: {0}")]
    InvalidDefinitions(#[from] docbatch_core::Error),
    #[error("required columns missing from spreadsheet: {}", .0.join(", "))]
    MissingRequiredColumns(Vec<String>),
    #[error("invalid job configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported spreadsheet format: {}", .0.display())]
    UnsupportedSpreadsheet(PathBuf),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),
    #[error("cannot create output folder {}: {source}", path.display())]
    OutputFolder {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("worker pool error: {0}")]
    WorkerPool(String),
    #[error("excel error: {0}")]
    Calamine(#[from] calamine::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
