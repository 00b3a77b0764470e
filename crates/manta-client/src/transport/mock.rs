//! Scripted request executor for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use reqwest::Method;
use reqwest::header::HeaderMap;

use super::{RequestExecutor, TransportRequest, TransportResponse};
use crate::types::ObjectReader;
use crate::{Error, Result};

/// A request observed by a [`MockExecutor`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method of the request.
    pub method: Method,
    /// Request path as issued.
    pub path: String,
    /// Query parameters of the request.
    pub query: Vec<(String, String)>,
}

/// Request executor that records every request and replays queued outcomes.
///
/// Outcomes are consumed in FIFO order; executing with an empty queue yields
/// a transport error.
#[derive(Debug, Default)]
pub struct MockExecutor {
    outcomes: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockExecutor {
    /// Creates an executor with no scripted outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn push_response(&self, headers: HeaderMap, body: ObjectReader) {
        self.push_outcome(Ok(TransportResponse::new(headers, body)));
    }

    /// Queues a failure.
    pub fn push_error(&self, error: Error) {
        self.push_outcome(Err(error));
    }

    /// Queues a raw outcome.
    pub fn push_outcome(&self, outcome: Result<TransportResponse>) {
        self.outcomes.lock().expect("mock lock").push_back(outcome);
    }

    /// Returns a copy of every request observed so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock").clone()
    }

    /// Returns the number of requests observed so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("mock lock").len()
    }
}

#[async_trait::async_trait]
impl RequestExecutor for MockExecutor {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests
            .lock()
            .expect("mock lock")
            .push(RecordedRequest {
                method: request.method,
                path: request.path,
                query: request.query,
            });

        self.outcomes
            .lock()
            .expect("mock lock")
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport("no scripted outcome")))
    }
}
