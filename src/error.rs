use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extractor failure. Carries a generic message only; provider detail is logged.
    #[error("Service error: {0}")]
    Service(String),

    #[error("No tracks found for the given mood")]
    EmptyResult,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Jamendo API error: {0}")]
    CatalogApi(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Query not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
