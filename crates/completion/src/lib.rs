//! Completion endpoint clients for askhound.
//!
//! Every client implements `askhound_core::CompletionClient`; the rest of
//! the system never sees which backend is configured.

pub mod azure;

pub use azure::{AzureOpenAiClient, DEFAULT_API_VERSION};
