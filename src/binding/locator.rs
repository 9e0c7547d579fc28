//! Locator: map a rendered list item back to its source line
//!
//! The preview and the source list items are aligned by ordinal. The clicked
//! item's position among all rendered items picks the n-th list line of the
//! source, skipping anything inside fenced code blocks.

use crate::editor::SourceRange;
use crate::error::{Error, Result};
use crate::markdown::{mask_code_fences, ListGrammar};
use crate::preview::NodeId;
use log::debug;
use std::borrow::Cow;

/// Find the source span of `item`'s content.
///
/// `items` is every rendered list item in document order.
pub fn locate(
    item: NodeId,
    items: &[NodeId],
    source: &str,
    grammar: &ListGrammar,
    skip_code_fences: bool,
) -> Result<SourceRange> {
    let ordinal = items
        .iter()
        .position(|&candidate| candidate == item)
        .ok_or(Error::ItemNotRendered { node: item })?;

    locate_ordinal(ordinal, source, grammar, skip_code_fences)
}

/// Find the content span of the `ordinal`-th list line of `source`.
pub fn locate_ordinal(
    ordinal: usize,
    source: &str,
    grammar: &ListGrammar,
    skip_code_fences: bool,
) -> Result<SourceRange> {
    let scanned = if skip_code_fences {
        mask_code_fences(source)
    } else {
        Cow::Borrowed(source)
    };

    let mut list_lines = 0;
    for (line_idx, line) in scanned.split('\n').enumerate() {
        let Some(item) = grammar.parse(line).matched() else {
            continue;
        };

        if list_lines == ordinal {
            let span = item.content_span(line_idx);
            debug!("List item #{} is on line {}: {}", ordinal, line_idx, span);
            return Ok(span);
        }
        list_lines += 1;
    }

    Err(Error::ListLineNotFound {
        ordinal,
        list_lines,
    })
}
