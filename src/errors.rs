use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelloError {
    #[error("Failed to build response: {0}")]
    InternalProcessing(String),

    #[error("Failed to record telemetry: {0}")]
    Telemetry(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for HelloError {
    fn from(error: serde_json::Error) -> Self {
        HelloError::InternalProcessing(format!("Failed to serialize body: {}", error))
    }
}

impl From<prometheus::Error> for HelloError {
    fn from(error: prometheus::Error) -> Self {
        HelloError::Telemetry(error.to_string())
    }
}
