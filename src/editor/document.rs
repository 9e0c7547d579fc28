//! The text-editing component contract
//!
//! The list edit bridge never owns the source buffer. It drives whatever
//! editor the host embeds through this trait, which mirrors the small
//! CodeMirror-style surface the bridge needs.

use super::Position;

/// Line/cursor addressed access to the source document.
///
/// Implementations clamp out-of-range positions into the document rather
/// than failing; the bridge relies on that for the line-break cursor move.
pub trait SourceEditor {
    /// The whole document text, lines joined by `\n`.
    fn value(&self) -> String;

    /// Text of line `line`, without its line terminator.
    fn line(&self, line: usize) -> Option<String>;

    /// The cursor, i.e. the head of the current selection.
    fn cursor(&self) -> Position;

    /// Place a collapsed cursor at `pos`.
    fn set_cursor(&mut self, pos: Position);

    /// Select `from..to`; the cursor ends up at `to`.
    fn set_selection(&mut self, from: Position, to: Position);

    /// Replace `from..to` with `text`. `to = None` inserts at `from`.
    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>);

    /// Give input focus to the editor.
    fn focus(&mut self);
}
