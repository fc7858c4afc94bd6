//! Error types for the trace log store
//!
//! The write path never fails. Errors only surface from configuration
//! loading and from serializing a dump.

pub type Result<T> = std::result::Result<T, TracelogError>;

#[derive(Debug, thiserror::Error)]
pub enum TracelogError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON serialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl TracelogError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        TracelogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TracelogError::Other(msg.into())
    }
}
