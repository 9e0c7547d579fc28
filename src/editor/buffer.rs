//! In-memory source document
//!
//! `TextBuffer` implements [`SourceEditor`] over a vector of lines. It backs
//! headless hosts and the session tests, and follows CodeMirror's rules for
//! the details the bridge depends on:
//! - positions are clamped into the document
//! - the cursor is the head of the selection
//! - after `replace_range`, positions inside or at the end of the replaced
//!   span move to the end of the inserted text; later positions shift with it

use super::{Position, SourceEditor, SourceRange};
use crate::string_utils::{char_len, column_to_byte, slice_columns};
use log::trace;

/// A plain-text markdown document with a selection and a focus flag.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Document lines; never empty
    lines: Vec<String>,
    /// Fixed end of the selection
    anchor: Position,
    /// Moving end of the selection (the cursor)
    head: Position,
    /// Whether the editor currently holds input focus
    focused: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextBuffer {
    /// Create a buffer holding `text` with the cursor at the start.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            anchor: Position::default(),
            head: Position::default(),
            focused: false,
        }
    }

    /// Number of lines (an empty document has one empty line).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The current selection, ordered.
    pub fn selection(&self) -> SourceRange {
        SourceRange::new(self.anchor, self.head)
    }

    /// Text covered by the current selection.
    pub fn selected_text(&self) -> String {
        self.text_in(self.selection())
    }

    /// Text covered by `range`, with `\n` between lines.
    pub fn text_in(&self, range: SourceRange) -> String {
        let from = self.clamp(range.from);
        let to = self.clamp(range.to);

        if from.line == to.line {
            return slice_columns(&self.lines[from.line], from.column, to.column).to_string();
        }

        let mut parts = Vec::with_capacity(to.line - from.line + 1);
        let first = &self.lines[from.line];
        parts.push(slice_columns(first, from.column, char_len(first)));
        for line in &self.lines[from.line + 1..to.line] {
            parts.push(line.as_str());
        }
        parts.push(slice_columns(&self.lines[to.line], 0, to.column));
        parts.join("\n")
    }

    /// Whether the editor currently holds input focus.
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Drop input focus (the user clicked into the preview).
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Clamp `pos` to an existing line and a column within it.
    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        let column = pos.column.min(char_len(&self.lines[line]));
        Position::new(line, column)
    }

    /// Map a position through a replacement of `from..to` ending at `end`.
    fn map_through_change(pos: Position, from: Position, to: Position, end: Position) -> Position {
        if pos < from {
            pos
        } else if pos <= to {
            end
        } else if pos.line == to.line {
            Position::new(end.line, end.column + (pos.column - to.column))
        } else {
            Position::new(pos.line + end.line - to.line, pos.column)
        }
    }
}

impl SourceEditor for TextBuffer {
    fn value(&self) -> String {
        self.lines.join("\n")
    }

    fn line(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn cursor(&self) -> Position {
        self.head
    }

    fn set_cursor(&mut self, pos: Position) {
        let pos = self.clamp(pos);
        self.anchor = pos;
        self.head = pos;
    }

    fn set_selection(&mut self, from: Position, to: Position) {
        self.anchor = self.clamp(from);
        self.head = self.clamp(to);
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) {
        let from = self.clamp(from);
        let to = to.map(|p| self.clamp(p)).unwrap_or(from);
        let SourceRange { from, to } = SourceRange::new(from, to);

        let first_line = &self.lines[from.line];
        let last_line = &self.lines[to.line];
        let before = first_line[..column_to_byte(first_line, from.column)].to_string();
        let after = last_line[column_to_byte(last_line, to.column)..].to_string();

        let inserted: Vec<&str> = text.split('\n').collect();
        let last_index = inserted.len() - 1;
        let end = if last_index == 0 {
            Position::new(from.line, from.column + char_len(inserted[0]))
        } else {
            Position::new(from.line + last_index, char_len(inserted[last_index]))
        };

        let mut replacement: Vec<String> = inserted.iter().map(|s| s.to_string()).collect();
        replacement[0].insert_str(0, &before);
        replacement[last_index].push_str(&after);

        self.lines.splice(from.line..=to.line, replacement);

        self.anchor = Self::map_through_change(self.anchor, from, to, end);
        self.head = Self::map_through_change(self.head, from, to, end);
        trace!("Replaced {}..{} with {:?}", from, to, text);
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
