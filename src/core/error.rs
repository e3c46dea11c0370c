//! Error types for the dispatch core

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Empty provider type list handed to the initializer
    #[error("empty provider list")]
    EmptyProviders,

    /// Provider type name with no registered constructor
    #[error("unregistered provider type: {name}")]
    UnregisteredProvider { name: String },

    /// Provider options payload failed to deserialize
    #[error("invalid options for provider '{provider}': {source}")]
    InvalidOptions {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid level string
    #[error("invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink-specific write error
    #[error("writer error: {0}")]
    Writer(String),

    /// Partial delivery inside a mix provider
    #[error("{failed} of {total} providers failed to accept the record")]
    MixWriteFailures { failed: usize, total: usize },
}

impl DispatchError {
    /// Create an unregistered-provider configuration error
    pub fn unregistered(name: impl Into<String>) -> Self {
        DispatchError::UnregisteredProvider { name: name.into() }
    }

    /// Create an invalid-options configuration error
    pub fn invalid_options(provider: &'static str, source: serde_json::Error) -> Self {
        DispatchError::InvalidOptions { provider, source }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        DispatchError::Writer(msg.into())
    }
}
