//! Line-Break Handler: continue the list in the source
//!
//! Enter inside a rendered item never splits it. Instead a fresh, empty item
//! with the same marker is appended after the cursor line in the source, and
//! the cursor moves into it.

use crate::config::ListEditSettings;
use crate::editor::{Position, SourceEditor};
use crate::markdown::ListGrammar;
use crate::string_utils::char_len;
use log::info;

/// What a line break wrote into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreakInsertion {
    /// Line the text was appended to
    pub line: usize,
    /// Inserted text, starting with the newline
    pub text: String,
    /// Cursor requested after the insertion (the editor may clamp it)
    pub cursor: Position,
}

/// The text appended after `line_text` to start a new list item.
pub fn insertion_text(
    line_text: &str,
    grammar: &ListGrammar,
    settings: &ListEditSettings,
) -> String {
    let prefix = match grammar.parse(line_text).matched() {
        Some(item) => item.continuation_prefix(settings.demote_checked_tasks),
        None => settings.default_marker.clone(),
    };
    format!("\n{}", prefix)
}

/// Append a new list item after the cursor line and move the cursor into it.
pub fn insert_list_item(
    editor: &mut dyn SourceEditor,
    grammar: &ListGrammar,
    settings: &ListEditSettings,
) -> LineBreakInsertion {
    let line = editor.cursor().line;
    let line_text = editor.line(line).unwrap_or_default();
    let text = insertion_text(&line_text, grammar, settings);

    let end_of_line = Position::new(line, char_len(&line_text));
    editor.replace_range(&text, end_of_line, None);

    let cursor = Position::new(line + 1, char_len(&text) + 1);
    editor.set_cursor(cursor);
    editor.focus();

    info!("Continued list after line {} with {:?}", line, text);
    LineBreakInsertion { line, text, cursor }
}
