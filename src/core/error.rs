use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Symptom not found: {0}")]
    SymptomNotFound(String),

    #[error("Please select at least one symptom to report.")]
    EmptyReport,

    #[error("AI provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HealthError>;
