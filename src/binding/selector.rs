//! Selector: show the located span in the source editor

use super::session::EditSession;
use crate::editor::{SourceEditor, SourceRange};
use log::debug;

/// Select `range` in the editor and remember it for the commit.
pub fn select(editor: &mut dyn SourceEditor, session: &mut EditSession, range: SourceRange) {
    editor.set_selection(range.from, range.to);
    session.selected_range = Some(range);
    session.cursor_position = Some(editor.cursor());
    debug!("Selected {} for {}", range, session.target);
}
