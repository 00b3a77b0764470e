//! Operations on Manta storage objects.
//!
//! This module provides the account-scoped object operations: retrieval with
//! content metadata and a streamed body, and deletion. Each operation is a
//! single request/response mapping with structured tracing and wrapped
//! transport errors.

mod object_operations;

pub use object_operations::ObjectOperations;
