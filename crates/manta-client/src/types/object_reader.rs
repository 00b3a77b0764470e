//! Streaming reader over a live HTTP response body.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};

use crate::Result;

/// A byte stream bound to a live HTTP response.
///
/// On a successful retrieval the reader is owned exclusively by the caller.
/// Dropping it releases the underlying connection, so it is safe to abandon a
/// partially consumed read; there is no separate close step.
pub struct ObjectReader {
    inner: BoxStream<'static, Result<Bytes>>,
}

impl ObjectReader {
    /// Wraps an arbitrary byte stream (boxed to avoid generic parameters).
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
        }
    }

    /// Creates a reader over a single in-memory chunk.
    pub fn from_bytes(data: Bytes) -> Self {
        Self::from_stream(futures::stream::once(async move { Ok(data) }))
    }

    /// Creates a reader that yields no data.
    pub fn empty() -> Self {
        Self::from_stream(futures::stream::empty())
    }

    /// Consumes the reader and collects the remaining content into memory.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.inner.try_next().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

impl Stream for ObjectReader {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl std::fmt::Debug for ObjectReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectReader").finish_non_exhaustive()
    }
}
