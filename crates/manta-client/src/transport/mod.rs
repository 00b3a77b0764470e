//! Request execution seam between the operations and the wire.
//!
//! Operations describe what to send through [`TransportRequest`] and receive
//! raw response headers plus a body stream through [`TransportResponse`]. The
//! authenticated transport (request signing, connection management, TLS) lives
//! behind the [`RequestExecutor`] trait: [`HttpExecutor`] issues plain
//! reqwest-backed requests, while [`MockExecutor`] replays scripted responses
//! for tests.

mod executor;
mod http_executor;
mod mock;

pub use executor::{RequestExecutor, TransportRequest, TransportResponse};
pub use http_executor::HttpExecutor;
pub use mock::{MockExecutor, RecordedRequest};
