//! Reqwest-backed request executor.

use futures::TryStreamExt;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use super::{RequestExecutor, TransportRequest, TransportResponse};
use crate::client::MantaConfig;
use crate::types::ObjectReader;
use crate::{Error, Result, TRACING_TARGET_TRANSPORT};

/// Plain HTTP request executor built on reqwest.
///
/// Issues requests directly against the configured endpoint. Authentication
/// is not handled here; callers that need it can attach pre-computed header
/// values (e.g. `Authorization`) via [`with_default_header`], or supply their
/// own [`RequestExecutor`] entirely.
///
/// [`with_default_header`]: HttpExecutor::with_default_header
pub struct HttpExecutor {
    http: Client,
    endpoint: String,
    default_headers: HeaderMap,
}

impl HttpExecutor {
    /// Creates an executor from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &MantaConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
            default_headers: HeaderMap::new(),
        })
    }

    /// Attaches a header to every request issued by this executor.
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.append(name, value);
        self
    }

    /// Resolves a request path against the endpoint.
    ///
    /// Plain string concatenation, matching the path formatting of the
    /// service: escaping of object paths is the caller's responsibility.
    fn request_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = self.request_url(&request.path);

        debug!(
            target: TRACING_TARGET_TRANSPORT,
            method = %request.method,
            url = %url,
            "Executing request"
        );

        let mut builder = self
            .http
            .request(request.method, url)
            .headers(self.default_headers.clone())
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        // A non-success status is surfaced as an error here; the response is
        // consumed in the process, so no body ever reaches the caller on the
        // failure path.
        let response = builder.send().await?.error_for_status()?;

        let headers = response.headers().clone();
        let body = ObjectReader::from_stream(response.bytes_stream().map_err(Error::from));

        Ok(TransportResponse::new(headers, body))
    }
}
