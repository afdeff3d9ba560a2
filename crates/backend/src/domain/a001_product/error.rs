use thiserror::Error;

/// Ошибка обработки одной строки CSV. Never escapes the import: each one
/// becomes a `FailedRow`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("{0}")]
    MalformedRow(String),

    #[error("{0}")]
    Validation(String),
}

/// Ошибка всей загрузки целиком
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("CSV file is empty or has no header.")]
    EmptyFile,

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to store products: {0}")]
    Store(anyhow::Error),
}
