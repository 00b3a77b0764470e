//! Result type for object retrieval.

use std::collections::HashMap;

use time::OffsetDateTime;

use super::ObjectReader;

/// Result of a successful object retrieval.
///
/// Content metadata is populated best-effort from the response headers:
/// absent or malformed values degrade to their defaults rather than failing
/// the call. The reader is bound to the live response and must be consumed or
/// dropped by the caller.
#[derive(Debug)]
pub struct GetObjectOutput {
    /// Object size in bytes, from `Content-Length`; zero if unparseable.
    pub content_length: u64,
    /// MIME content type, if the response provides one.
    pub content_type: Option<String>,
    /// MD5 digest of the content, if the response provides one.
    pub content_md5: Option<String>,
    /// ETag of the object, if the response provides one.
    pub etag: Option<String>,
    /// Last modification time, from `Last-Modified` in HTTP-date format;
    /// `None` when absent or malformed.
    pub last_modified: Option<OffsetDateTime>,
    /// User-supplied custom metadata: every `m-`-prefixed response header
    /// mapped to its comma-joined values.
    pub metadata: HashMap<String, String>,
    /// Byte stream over the object content.
    pub reader: ObjectReader,
}
