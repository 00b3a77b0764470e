//! Object retrieval and deletion.

use std::collections::HashMap;

use reqwest::Method;
use reqwest::header::{AsHeaderName, CONTENT_LENGTH, CONTENT_TYPE, ETAG, HeaderMap, LAST_MODIFIED};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, error, info, instrument};

use crate::transport::{TransportRequest, TransportResponse};
use crate::types::{GetObjectOutput, METADATA_PREFIX};
use crate::{Error, MantaClient, Result, TRACING_TARGET_OBJECTS};

/// HTTP-date (RFC 1123) format of the `Last-Modified` header,
/// e.g. "Tue, 15 Nov 1994 08:12:31 GMT".
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Object operations bound to a Manta client.
#[derive(Debug, Clone)]
pub struct ObjectOperations {
    client: MantaClient,
}

impl ObjectOperations {
    /// Creates new ObjectOperations with a Manta client.
    pub fn new(client: MantaClient) -> Self {
        Self { client }
    }

    /// Retrieves an object, returning its content metadata and a live byte
    /// stream over its content.
    ///
    /// The returned [`GetObjectOutput::reader`] is owned by the caller;
    /// dropping it releases the underlying connection. Metadata headers are
    /// parsed best-effort: a missing or malformed `Last-Modified` or
    /// `Content-Length` leaves the field at its default instead of failing
    /// the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport call fails; the cause is preserved
    /// in the error source chain.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(account = %self.client.account(), path = %object_path))]
    pub async fn get_object(&self, object_path: &str) -> Result<GetObjectOutput> {
        let path = self.client.storage_path(object_path);

        debug!(
            target: TRACING_TARGET_OBJECTS,
            path = %path,
            "Retrieving object"
        );

        let response = self
            .client
            .execute(TransportRequest::new(Method::GET, path.clone()))
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    path = %path,
                    error = %e,
                    "Failed to retrieve object"
                );
                Error::request("GetObject", e)
            })?;

        let TransportResponse { headers, body } = response;

        let output = GetObjectOutput {
            content_length: content_length(&headers),
            content_type: header_string(&headers, CONTENT_TYPE),
            content_md5: header_string(&headers, "content-md5"),
            etag: header_string(&headers, ETAG),
            last_modified: last_modified(&headers),
            metadata: custom_metadata(&headers),
            reader: body,
        };

        info!(
            target: TRACING_TARGET_OBJECTS,
            path = %path,
            content_length = output.content_length,
            "Object retrieved"
        );

        Ok(output)
    }

    /// Requests deletion of an object.
    ///
    /// Any response body returned by the transport is released here; the
    /// caller never receives a stream from this operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport call fails; the cause is preserved
    /// in the error source chain. Delete-of-nonexistent semantics are
    /// delegated to the server.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(account = %self.client.account(), path = %object_path))]
    pub async fn delete_object(&self, object_path: &str) -> Result<()> {
        let path = self.client.storage_path(object_path);

        debug!(
            target: TRACING_TARGET_OBJECTS,
            path = %path,
            "Deleting object"
        );

        let response = self
            .client
            .execute(TransportRequest::new(Method::DELETE, path.clone()))
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    path = %path,
                    error = %e,
                    "Failed to delete object"
                );
                Error::request("DeleteObject", e)
            })?;

        // The response body is never exposed; dropping it here releases the
        // underlying connection.
        drop(response);

        info!(
            target: TRACING_TARGET_OBJECTS,
            path = %path,
            "Object deleted"
        );

        Ok(())
    }
}

/// Copies a header value verbatim, if present and valid UTF-8.
fn header_string(headers: &HeaderMap, name: impl AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

/// Parses `Content-Length`; zero if missing or unparseable.
fn content_length(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Parses `Last-Modified` as an HTTP-date; `None` if missing or malformed.
fn last_modified(headers: &HeaderMap) -> Option<OffsetDateTime> {
    let value = headers.get(LAST_MODIFIED)?.to_str().ok()?;

    PrimitiveDateTime::parse(value, HTTP_DATE)
        .ok()
        .map(|dt| dt.assume_utc())
}

/// Collects every `m-`-prefixed response header into a metadata map,
/// comma-joining repeated values.
fn custom_metadata(headers: &HeaderMap) -> HashMap<String, String> {
    let mut metadata = HashMap::new();

    for name in headers.keys() {
        if !name.as_str().starts_with(METADATA_PREFIX) {
            continue;
        }

        let joined = headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");

        metadata.insert(name.as_str().to_string(), joined);
    }

    metadata
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::task::{Context, Poll};

    use bytes::Bytes;
    use futures::Stream;
    use reqwest::header::{HeaderName, HeaderValue};
    use time::macros::datetime;
    use url::Url;

    use super::*;
    use crate::transport::MockExecutor;
    use crate::types::ObjectReader;
    use crate::MantaConfig;

    fn test_client(executor: Arc<MockExecutor>) -> MantaClient {
        let endpoint = Url::parse("https://us-east.manta.example.com").unwrap();
        let config = MantaConfig::new(endpoint, "alice").unwrap();
        MantaClient::new(config, executor).unwrap()
    }

    fn header_map(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        headers
    }

    /// Empty body stream that flags its own drop.
    struct TrackedBody {
        released: Arc<AtomicBool>,
    }

    impl Stream for TrackedBody {
        type Item = Result<Bytes>;

        fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            Poll::Ready(None)
        }
    }

    impl Drop for TrackedBody {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_get_object_issues_single_get() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(HeaderMap::new(), ObjectReader::empty());
        let ops = test_client(executor.clone()).object_operations();

        ops.get_object("reports/2026-08.csv").await.unwrap();

        let requests = executor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/alice/stor/reports/2026-08.csv");
        assert!(requests[0].query.is_empty());
    }

    #[tokio::test]
    async fn test_get_object_maps_headers() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(
            header_map(&[
                ("content-length", "42"),
                ("content-type", "text/plain"),
                ("content-md5", "Qra9OK4sdThpAkVcmD+FwQ=="),
                ("etag", "d7d6c9ea-7d01-4b4c-8571-4c26ffa7aa05"),
                ("last-modified", "Tue, 15 Nov 1994 08:12:31 GMT"),
            ]),
            ObjectReader::empty(),
        );
        let ops = test_client(executor).object_operations();

        let output = ops.get_object("report.txt").await.unwrap();

        assert_eq!(output.content_length, 42);
        assert_eq!(output.content_type.as_deref(), Some("text/plain"));
        assert_eq!(
            output.content_md5.as_deref(),
            Some("Qra9OK4sdThpAkVcmD+FwQ==")
        );
        assert_eq!(
            output.etag.as_deref(),
            Some("d7d6c9ea-7d01-4b4c-8571-4c26ffa7aa05")
        );
        assert_eq!(
            output.last_modified,
            Some(datetime!(1994-11-15 08:12:31 UTC))
        );
    }

    #[tokio::test]
    async fn test_get_object_tolerates_missing_headers() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(HeaderMap::new(), ObjectReader::empty());
        let ops = test_client(executor).object_operations();

        let output = ops.get_object("report.txt").await.unwrap();

        assert_eq!(output.content_length, 0);
        assert!(output.content_type.is_none());
        assert!(output.content_md5.is_none());
        assert!(output.etag.is_none());
        assert!(output.last_modified.is_none());
        assert!(output.metadata.is_empty());
    }

    #[tokio::test]
    async fn test_get_object_tolerates_garbled_headers() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(
            header_map(&[
                ("content-length", "not-a-number"),
                ("last-modified", "yesterday-ish"),
            ]),
            ObjectReader::empty(),
        );
        let ops = test_client(executor).object_operations();

        let output = ops.get_object("report.txt").await.unwrap();

        assert_eq!(output.content_length, 0);
        assert!(output.last_modified.is_none());
    }

    #[tokio::test]
    async fn test_get_object_collects_custom_metadata() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(
            header_map(&[
                ("content-type", "text/plain"),
                ("m-owner", "alice"),
                ("m-project", "x, y"),
            ]),
            ObjectReader::empty(),
        );
        let ops = test_client(executor).object_operations();

        let output = ops.get_object("report.txt").await.unwrap();

        assert_eq!(output.metadata.len(), 2);
        assert_eq!(output.metadata.get("m-owner"), Some(&"alice".to_string()));
        assert_eq!(output.metadata.get("m-project"), Some(&"x, y".to_string()));
        assert!(!output.metadata.contains_key("content-type"));
    }

    #[tokio::test]
    async fn test_get_object_joins_repeated_metadata_headers() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(
            header_map(&[("m-tag", "alpha"), ("m-tag", "beta")]),
            ObjectReader::empty(),
        );
        let ops = test_client(executor).object_operations();

        let output = ops.get_object("report.txt").await.unwrap();

        assert_eq!(
            output.metadata.get("m-tag"),
            Some(&"alpha, beta".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_object_streams_body() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(
            HeaderMap::new(),
            ObjectReader::from_bytes(Bytes::from("object content")),
        );
        let ops = test_client(executor).object_operations();

        let output = ops.get_object("report.txt").await.unwrap();
        let data = output.reader.bytes().await.unwrap();

        assert_eq!(data, Bytes::from("object content"));
    }

    #[tokio::test]
    async fn test_get_object_wraps_transport_error() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_error(Error::transport("connection refused"));
        let ops = test_client(executor).object_operations();

        let err = ops.get_object("report.txt").await.unwrap_err();

        assert_eq!(err.operation(), Some("GetObject"));
        assert!(err.is_transport_error());
        assert!(err.to_string().contains("GetObject"));
        assert!(
            std::error::Error::source(&err)
                .unwrap()
                .to_string()
                .contains("connection refused")
        );
    }

    #[tokio::test]
    async fn test_delete_object_issues_single_delete() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(HeaderMap::new(), ObjectReader::empty());
        let ops = test_client(executor.clone()).object_operations();

        ops.delete_object("reports/2026-08.csv").await.unwrap();

        let requests = executor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].path, "/alice/stor/reports/2026-08.csv");
    }

    #[tokio::test]
    async fn test_delete_object_releases_response_body() {
        let released = Arc::new(AtomicBool::new(false));
        let executor = Arc::new(MockExecutor::new());
        executor.push_response(
            HeaderMap::new(),
            ObjectReader::from_stream(TrackedBody {
                released: released.clone(),
            }),
        );
        let ops = test_client(executor).object_operations();

        ops.delete_object("report.txt").await.unwrap();

        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_delete_object_wraps_transport_error() {
        let executor = Arc::new(MockExecutor::new());
        executor.push_error(Error::transport("connection refused"));
        let ops = test_client(executor).object_operations();

        let err = ops.delete_object("report.txt").await.unwrap_err();

        assert_eq!(err.operation(), Some("DeleteObject"));
        assert!(err.is_transport_error());
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let get_executor = Arc::new(MockExecutor::new());
        get_executor.push_response(
            header_map(&[("content-length", "5")]),
            ObjectReader::from_bytes(Bytes::from("hello")),
        );
        let delete_executor = Arc::new(MockExecutor::new());
        delete_executor.push_response(HeaderMap::new(), ObjectReader::empty());

        let get_ops = test_client(get_executor.clone()).object_operations();
        let delete_ops = test_client(delete_executor.clone()).object_operations();

        let (get_result, delete_result) =
            futures::join!(get_ops.get_object("one.txt"), delete_ops.delete_object("two.txt"));

        let output = get_result.unwrap();
        assert_eq!(output.content_length, 5);
        delete_result.unwrap();

        assert_eq!(get_executor.requests()[0].path, "/alice/stor/one.txt");
        assert_eq!(delete_executor.requests()[0].path, "/alice/stor/two.txt");
    }

    #[test]
    fn test_last_modified_parsing() {
        let headers = header_map(&[("last-modified", "Tue, 15 Nov 1994 08:12:31 GMT")]);
        assert_eq!(
            last_modified(&headers),
            Some(datetime!(1994-11-15 08:12:31 UTC))
        );

        // Missing GMT suffix and non-HTTP formats are rejected, not errors.
        let headers = header_map(&[("last-modified", "1994-11-15T08:12:31Z")]);
        assert!(last_modified(&headers).is_none());
    }
}
