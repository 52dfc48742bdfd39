use thiserror::Error;

/// Top-level error type for Nael.
#[derive(Debug, Error)]
pub enum NaelError {
    /// The packaged quote catalog is missing or malformed.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Settings could not be read or written.
    #[error("config error: {0}")]
    Config(String),

    /// A quote id has no entry in the mechanic mapping.
    #[error("quote {0} has no mechanic mapping")]
    UnmappedQuote(u32),

    /// Error from a chat source or presenter.
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
