use thiserror::Error;

/// Failures talking to the backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request never got an answer (connection, TLS, timeout).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered, but rejected the query.
    #[error("Backend rejected query on `{table}` with {status}: {body}")]
    Status {
        table: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A row did not have the expected shape.
    #[error("Unexpected row shape in `{table}`: {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid source configuration: {0}")]
    Config(String),
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
