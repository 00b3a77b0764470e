//! Manta client with configuration management and operations.
//!
//! This module provides the high-level interface for talking to a Manta
//! object-storage endpoint: client construction with a pluggable request
//! executor, configuration with validation and defaults, and access to the
//! object operations bound to the configured account.

mod manta_client;
mod manta_config;

pub use manta_client::MantaClient;
pub use manta_config::MantaConfig;
