//! Types and data structures for Manta storage operations.

mod object_output;
mod object_reader;

pub use object_output::GetObjectOutput;
pub use object_reader::ObjectReader;

/// Case-sensitive header-name prefix marking user-supplied custom metadata.
///
/// Header names in the response map are always lowercase, so the match is
/// effectively exact.
pub const METADATA_PREFIX: &str = "m-";
