//! Markdown handling for list item editing
//!
//! This module provides the markdown knowledge the bridge needs:
//! - a list-line grammar that splits a source line into marker, checkbox,
//!   and content
//! - fenced code detection (via comrak) so code never counts as a list
//! - rendering of list items the way the preview shows them
//! - conversion of edited item HTML back to markdown
//!
//! # Example
//! ```ignore
//! use crate::markdown::{ListGrammar, ListLine, mask_code_fences};
//!
//! let grammar = ListGrammar::default();
//! if let ListLine::Matched(item) = grammar.parse("- [x] done") {
//!     assert_eq!(item.continuation_prefix(true), "- [ ] ");
//! }
//! let masked = mask_code_fences("```\n- not a list\n```");
//! ```

mod html;
mod list_line;
mod parser;

pub use html::{InlineHtmlConverter, MarkdownEngine};
pub use list_line::{Checkbox, CheckboxState, ListGrammar, ListLine, ListLineMatch};
pub use parser::{
    fenced_code_lines, mask_code_fences, render_list_items, render_list_items_with_options,
    MarkdownOptions, RenderedListItem,
};
