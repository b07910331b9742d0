//! # Askhound Core
//!
//! Domain types, traits, and error definitions for the askhound
//! question-answering service. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! The only trait seam is [`completion::CompletionClient`]: the hosted LLM
//! endpoint is the one collaborator worth swapping (for tests, or for a
//! different chat-completions host). Everything else is plain data.

pub mod completion;
pub mod document;
pub mod error;
pub mod history;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use completion::{CompletionClient, CompletionRequest, CompletionResponse, Usage};
pub use document::{Document, DocumentStats};
pub use error::{CompletionError, Error, Result};
pub use history::HistoryEntry;
pub use message::{Message, Role};
