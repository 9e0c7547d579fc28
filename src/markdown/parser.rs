//! Markdown structure queries using comrak
//!
//! This module wraps comrak's parser for the two structural questions the
//! bridge asks about a document: which lines are fenced code, and what the
//! rendered list items look like.

use comrak::{
    format_html,
    nodes::{AstNode, NodeValue},
    parse_document, Arena, Options,
};
use std::borrow::Cow;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing and rendering.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tasklist: true,
            strikethrough: true,
            tables: true,
            autolink: true,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();
        options.extension.tasklist = self.tasklist;
        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Code Fences
// ─────────────────────────────────────────────────────────────────────────────

/// Zero-based, inclusive line ranges covered by fenced code blocks.
///
/// Covers the opening and closing fence lines. An unclosed fence runs to the
/// end of the document, as comrak parses it.
pub fn fenced_code_lines(source: &str) -> Vec<RangeInclusive<usize>> {
    let arena = Arena::new();
    let options = MarkdownOptions::default().to_comrak_options();
    let root = parse_document(&arena, source, &options);

    root.descendants()
        .filter_map(|node| {
            let ast = node.data.borrow();
            match &ast.value {
                NodeValue::CodeBlock(block) if block.fenced => {
                    let start = ast.sourcepos.start.line.saturating_sub(1);
                    let end = ast.sourcepos.end.line.saturating_sub(1).max(start);
                    Some(start..=end)
                }
                _ => None,
            }
        })
        .collect()
}

/// Blank every line inside a fenced code block.
///
/// The line count is preserved so indices into the result address the same
/// lines as indices into `source`.
pub fn mask_code_fences(source: &str) -> Cow<'_, str> {
    let fenced = fenced_code_lines(source);
    if fenced.is_empty() {
        return Cow::Borrowed(source);
    }

    let mut masked = String::with_capacity(source.len());
    for (idx, line) in source.split('\n').enumerate() {
        if idx > 0 {
            masked.push('\n');
        }
        if !fenced.iter().any(|range| range.contains(&idx)) {
            masked.push_str(line);
        }
    }
    Cow::Owned(masked)
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendered List Items
// ─────────────────────────────────────────────────────────────────────────────

/// One list item as the preview renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedListItem {
    /// Inner HTML of the item's text paragraph
    pub html: String,
    /// Zero-based source line the item starts on
    pub line: usize,
}

/// Render every list item of `source`, in document order.
pub fn render_list_items(source: &str) -> Result<Vec<RenderedListItem>> {
    render_list_items_with_options(source, &MarkdownOptions::default())
}

/// Render every list item of `source` with custom options.
pub fn render_list_items_with_options(
    source: &str,
    options: &MarkdownOptions,
) -> Result<Vec<RenderedListItem>> {
    let arena = Arena::new();
    let comrak_options = options.to_comrak_options();
    let root = parse_document(&arena, source, &comrak_options);

    let mut items = Vec::new();
    for node in root.descendants() {
        let (is_item, line) = {
            let ast = node.data.borrow();
            let is_item = matches!(ast.value, NodeValue::Item(_) | NodeValue::TaskItem(..));
            (is_item, ast.sourcepos.start.line.saturating_sub(1))
        };
        if !is_item {
            continue;
        }

        let html = match first_paragraph(node) {
            Some(paragraph) => render_paragraph(paragraph, &comrak_options)?,
            None => String::new(),
        };
        items.push(RenderedListItem { html, line });
    }
    Ok(items)
}

/// The paragraph holding an item's own text (not a nested list's).
fn first_paragraph<'a>(item: &'a AstNode<'a>) -> Option<&'a AstNode<'a>> {
    item.children()
        .find(|child| matches!(child.data.borrow().value, NodeValue::Paragraph))
}

/// Render a paragraph node and strip the `<p>` wrapper loose lists get.
fn render_paragraph<'a>(paragraph: &'a AstNode<'a>, options: &Options) -> Result<String> {
    let mut output = Vec::new();
    format_html(paragraph, options, &mut output).map_err(|e| Error::Render {
        message: e.to_string(),
    })?;
    let html = String::from_utf8(output).map_err(|e| Error::Render {
        message: e.to_string(),
    })?;

    let html = html.trim_end_matches('\n');
    let html = html
        .strip_prefix("<p>")
        .and_then(|h| h.strip_suffix("</p>"))
        .unwrap_or(html);
    Ok(html.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
