use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The backend could not be read or written
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    /// Reference data a pipeline cannot run without is absent
    #[error("Missing reference data: {0}")]
    MissingReference(String),

    /// Configuration rejected at load time
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        let message = match error {
            polars::error::PolarsError::NoData(_) => format!("No data: {}", error),
            polars::error::PolarsError::ShapeMismatch(_) => format!("Shape mismatch: {}", error),
            polars::error::PolarsError::SchemaMismatch(_) => format!("Schema mismatch: {}", error),
            polars::error::PolarsError::ColumnNotFound(_) => format!("Column not found: {}", error),
            _ => error.to_string(),
        };
        let err = ComputeError::DataFrame(message);
        error!(?err, "DataFrame error");
        err
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
