pub mod dashboard;
pub mod error;
pub mod period;
pub mod registry;
pub mod sales;
pub mod status;
pub mod types;

pub use error::MetricsError;
pub use types::*;

/// Standard result type for all bizmetrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
