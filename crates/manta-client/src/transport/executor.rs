//! Request executor trait and its request/response types.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::Result;
use crate::types::ObjectReader;

/// Executes a single HTTP request against the storage endpoint.
///
/// Implementations are expected to be safe for concurrent use; each call is
/// independent and carries no state between requests.
#[async_trait::async_trait]
pub trait RequestExecutor: Send + Sync + 'static {
    /// Issues the request and returns the raw response.
    ///
    /// A non-success outcome is reported as an error; in that case no body
    /// stream is handed back to the caller.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// A request to be issued by a [`RequestExecutor`].
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, absolute from the endpoint root.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Additional request headers.
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// Creates a request with no query, headers, or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a request header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}

/// The raw response handed back by a [`RequestExecutor`].
#[derive(Debug)]
pub struct TransportResponse {
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body stream. Dropping it releases the underlying connection.
    pub body: ObjectReader,
}

impl TransportResponse {
    /// Creates a response from headers and a body stream.
    pub fn new(headers: HeaderMap, body: ObjectReader) -> Self {
        Self { headers, body }
    }
}
