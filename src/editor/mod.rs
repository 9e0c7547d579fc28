//! Editor module for the list edit bridge
//!
//! This module contains the source document addressing types, the contract
//! the bridge uses to drive the host's text editor, and an in-memory
//! implementation of that contract.

mod buffer;
mod document;
mod position;

pub use buffer::TextBuffer;
pub use document::SourceEditor;
pub use position::{Position, SourceRange};
