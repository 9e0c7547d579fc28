//! Borrowed access to the bridge's collaborators
//!
//! The binding owns only session state. Every call that needs the editor,
//! the preview, or the markdown engine receives them through an `EditHost`
//! for the duration of that call.

use crate::editor::SourceEditor;
use crate::markdown::MarkdownEngine;
use crate::preview::{BubbleSurface, PreviewPane};

/// The external components a session works against.
pub struct EditHost<'a> {
    pub editor: &'a mut dyn SourceEditor,
    pub preview: &'a mut dyn PreviewPane,
    pub engine: &'a dyn MarkdownEngine,
    /// Popup shown next to the edited item, if the host has one
    pub bubble: Option<&'a mut dyn BubbleSurface>,
}

impl<'a> EditHost<'a> {
    pub fn new(
        editor: &'a mut dyn SourceEditor,
        preview: &'a mut dyn PreviewPane,
        engine: &'a dyn MarkdownEngine,
    ) -> Self {
        Self {
            editor,
            preview,
            engine,
            bubble: None,
        }
    }

    pub fn with_bubble(mut self, bubble: &'a mut dyn BubbleSurface) -> Self {
        self.bubble = Some(bubble);
        self
    }
}
