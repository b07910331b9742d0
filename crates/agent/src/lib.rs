//! The question-answering pipeline — retrieval, assembly, completion.
//!
//! One exchange flows through three steps:
//!
//! 1. **Retrieve** the best-matching documents from the store
//! 2. **Assemble** the context block and the full message sequence
//! 3. **Complete** via the configured endpoint and package the answer
//!    with its cited sources
//!
//! The assembler is a pure transform and independently usable; the
//! [`QueryAgent`] wires it to a store and a completion client.

pub mod assembler;
pub mod query;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assembler::{AnswerPackage, ConversationAssembler, NO_DOCUMENTS_MARKER, SYSTEM_PROMPT};
pub use query::QueryAgent;
