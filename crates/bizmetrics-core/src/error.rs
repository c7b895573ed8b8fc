use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Invalid period '{period}': expected YYYY-MM")]
    InvalidPeriodFormat { period: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MetricsError {
    fn from(e: serde_json::Error) -> Self {
        MetricsError::SerializationError(e.to_string())
    }
}
