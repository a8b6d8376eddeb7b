use thiserror::Error;

/// Reasons an export file could not be loaded
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Export does not contain any trade records")]
    NoRecords,
}

pub type Result<T> = std::result::Result<T, ExportError>;
