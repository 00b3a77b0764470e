#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "manta_client::client";
pub const TRACING_TARGET_OBJECTS: &str = "manta_client::objects";
pub const TRACING_TARGET_TRANSPORT: &str = "manta_client::transport";

pub mod client;
pub mod operations;
pub mod transport;
pub mod types;

// Re-export for convenience
pub use crate::client::{MantaClient, MantaConfig};
pub use crate::operations::ObjectOperations;
pub use crate::transport::{
    HttpExecutor, MockExecutor, RequestExecutor, TransportRequest, TransportResponse,
};
pub use crate::types::{GetObjectOutput, METADATA_PREFIX, ObjectReader};

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for Manta storage operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// This includes invalid configuration parameters, missing required
    /// settings, or malformed endpoint URLs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying transport failure.
    ///
    /// This covers network errors, authentication failures, and non-success
    /// HTTP statuses surfaced by the request executor. The original error is
    /// preserved as the source where available.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// The underlying error, if any.
        #[source]
        source: Option<BoxedError>,
    },

    /// An operation failed while executing its request.
    ///
    /// Wraps a transport failure with the name of the failing operation,
    /// preserving the full message chain of the cause.
    #[error("Error executing {operation} request: {source}")]
    Request {
        /// Name of the failing operation (e.g. "GetObject").
        operation: &'static str,
        /// The wrapped cause.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a transport error from a message alone.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error preserving its cause.
    pub fn transport_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps a transport failure with the name of the failing operation.
    pub(crate) fn request(operation: &'static str, source: Error) -> Self {
        Error::Request {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns whether this error indicates a configuration issue.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns whether this error originated in the transport layer,
    /// looking through any operation wrapper.
    pub fn is_transport_error(&self) -> bool {
        match self {
            Error::Transport { .. } => true,
            Error::Request { source, .. } => source.is_transport_error(),
            Error::Config(_) => false,
        }
    }

    /// Returns the name of the failing operation, if this error wraps one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::Request { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Connection failed".to_string()
        } else {
            err.to_string()
        };

        Error::transport_with(message, err)
    }
}

/// Specialized [`Result`] type for Manta operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let config = Error::Config("missing account".into());
        assert!(config.is_config_error());
        assert!(!config.is_transport_error());

        let transport = Error::transport("connection reset");
        assert!(transport.is_transport_error());
        assert!(!transport.is_config_error());
    }

    #[test]
    fn test_request_wrapper_preserves_chain() {
        let cause = Error::transport("connection reset");
        let wrapped = Error::request("GetObject", cause);

        assert_eq!(wrapped.operation(), Some("GetObject"));
        assert!(wrapped.is_transport_error());
        assert_eq!(
            wrapped.to_string(),
            "Error executing GetObject request: Transport error: connection reset"
        );

        let source = std::error::Error::source(&wrapped).unwrap();
        assert_eq!(source.to_string(), "Transport error: connection reset");
    }
}
