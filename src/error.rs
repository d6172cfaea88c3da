use thiserror::Error;

/// Convenience result type for data source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Error type returned when fetching records from a data source.
///
/// The query pipeline and the debounce have no error states; failures only come from loading the
/// raw records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid JSON, or a record does not match the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but is not a list of records.
    #[error("invalid payload: {message}")]
    InvalidPayload { message: String },
}
