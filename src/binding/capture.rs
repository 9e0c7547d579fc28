//! Edit Capture: react to input and focus loss on the editable item
//!
//! Ordinary typing is left to the preview's native editing. Only two signals
//! matter here: a line break, which is handed to the line-break handler, and
//! focus loss, which writes the item's HTML back into the source as markdown.

use super::host::EditHost;
use super::line_break::{insert_list_item, LineBreakInsertion};
use super::session::{EditSession, SessionPhase};
use super::teardown::teardown;
use crate::config::ListEditSettings;
use crate::editor::SourceRange;
use crate::markdown::ListGrammar;
use crate::preview::{ElementKind, FocusEvent, InputEvent, NodeId};
use log::{debug, info, warn};

/// What an input event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not from the item's paragraph, or the session is over
    Ignored,
    /// Left to native editing
    Native,
    /// A new list item was started in the source; the session ended
    LineBreak(LineBreakInsertion),
}

/// What a focus-out event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Not from the item's paragraph, or the session is over
    Ignored,
    /// `markdown` replaced `range` in the source
    Committed { range: SourceRange, markdown: String },
    /// No source span was known, so the edit was dropped
    Discarded { markdown: String },
}

/// Only the item's text paragraph carries edits worth acting on.
fn is_edit_paragraph(session: &EditSession, host: &EditHost<'_>, target: NodeId) -> bool {
    session.is_editing() && host.preview.kind(target) == Some(ElementKind::Paragraph)
}

pub fn on_input(
    session: &mut EditSession,
    event: &mut InputEvent,
    host: &mut EditHost<'_>,
    grammar: &ListGrammar,
    settings: &ListEditSettings,
) -> InputOutcome {
    event.stop_propagation();
    event.prevent_default();

    if !is_edit_paragraph(session, host, event.target) {
        return InputOutcome::Ignored;
    }
    if !event.input_type.is_line_break() {
        return InputOutcome::Native;
    }

    debug!(
        "{} on {}, continuing the list",
        event.input_type.dom_name(),
        event.target
    );
    let inserted = insert_list_item(&mut *host.editor, grammar, settings);
    session.advance(SessionPhase::LineBroken);
    teardown(session, host);
    InputOutcome::LineBreak(inserted)
}

pub fn on_focus_out(
    session: &mut EditSession,
    event: &mut FocusEvent,
    host: &mut EditHost<'_>,
) -> FocusOutcome {
    event.stop_propagation();
    event.prevent_default();

    if !is_edit_paragraph(session, host, event.target) {
        return FocusOutcome::Ignored;
    }

    let html = host.preview.inner_html(event.target).unwrap_or_default();
    let markdown = host.engine.html_to_markdown(&html);

    let outcome = match session.selected_range {
        Some(range) => {
            host.editor.replace_range(&markdown, range.from, Some(range.to));
            info!("Committed {} as {:?}", range, markdown);
            session.advance(SessionPhase::Committed);
            FocusOutcome::Committed { range, markdown }
        }
        None => {
            warn!(
                "No source span for {}, discarding edit {:?}",
                session.target, markdown
            );
            if let Some(cursor) = session.cursor_position {
                host.editor.set_cursor(cursor);
            }
            session.advance(SessionPhase::Discarded);
            FocusOutcome::Discarded { markdown }
        }
    };

    teardown(session, host);
    outcome
}
