//! Conversation history types.
//!
//! One entry per completed exchange. The session layer appends entries
//! after each answer; the assembler only ever reads the trailing window.
//!
//! Both fields default to the empty string when deserialized from external
//! input, so an absent field becomes "" instead of failing the request or
//! smuggling a null into the completion call.

use serde::{Deserialize, Serialize};

/// One completed (query, answer) exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What the user asked.
    #[serde(default)]
    pub query: String,

    /// What the assistant answered.
    #[serde(default)]
    pub answer: String,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
        }
    }
}
