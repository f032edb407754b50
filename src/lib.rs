//! Lexical word completion over a line-addressed text buffer.
//!
//! The completion core (`host`, `address`, `lexer`, `vocabulary`,
//! `completion`) knows nothing about terminals: it talks to any
//! [`host::HostBuffer`] through single-step movement and edit primitives.
//! `buffer` supplies an in-memory host, and `controller`/`view` wrap the
//! core in a small crossterm editor.

pub mod address;
pub mod buffer;
pub mod completion;
pub mod controller;
pub mod host;
pub mod keywords;
pub mod lexer;
pub mod view;
pub mod vocabulary;

pub use address::TextAddress;
pub use buffer::EditBuffer;
pub use completion::{CompletionCandidate, CompletionEngine, CompletionResult};
pub use host::{CursorMove, HostBuffer};
pub use vocabulary::VocabularyIndex;
