//! In-place list item editing
//!
//! A `ListEditBinding` is created when the user clicks a rendered list item in
//! the preview. It makes the item editable, finds the item's line in the
//! markdown source and selects its content there, and then waits for one of
//! three endings:
//! - focus leaves the item: its HTML is converted back to markdown and
//!   replaces the selected content
//! - Enter is pressed: a new, empty list item is started in the source
//! - the host sends `BindingCommand::Remove`
//!
//! Each ending tears the session down. The binding never holds on to the
//! editor, preview, or engine; they are lent per call through [`EditHost`].
//!
//! # Example
//! ```ignore
//! let mut host = EditHost::new(&mut buffer, &mut preview, &engine);
//! let mut binding = ListEditBinding::new(TriggerMode::Click, paragraph, &mut host, settings);
//! binding.dispatch(&mut DomEvent::FocusOut(FocusEvent::new(paragraph)), &mut host);
//! ```

mod capture;
mod host;
mod line_break;
mod locator;
mod selector;
mod session;
mod teardown;

pub use capture::{FocusOutcome, InputOutcome};
pub use host::EditHost;
pub use line_break::{insert_list_item, insertion_text, LineBreakInsertion};
pub use locator::{locate, locate_ordinal};
pub use selector::select;
pub use session::{EditSession, ListenerRegistry, SessionPhase, TriggerMode};

use crate::config::{load_config, load_config_from, ListEditSettings};
use crate::error::{Error, ResultExt};
use crate::markdown::ListGrammar;
use crate::preview::{DomEvent, EventKind, FocusEvent, InputEvent, NodeId};
use log::{info, trace, warn};
use std::path::Path;

/// Commands the surrounding UI can send to a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingCommand {
    /// End the session without committing
    Remove,
}

/// One editing session over one rendered list item.
#[derive(Debug, Clone)]
pub struct ListEditBinding {
    session: EditSession,
    grammar: ListGrammar,
    settings: ListEditSettings,
}

impl ListEditBinding {
    /// Start editing the rendered text node `target`.
    ///
    /// `target` is the item's paragraph; its parent is the list item that is
    /// looked up among the preview's list items. A failed lookup is logged
    /// and the session carries on without a source span.
    pub fn new(
        trigger: TriggerMode,
        target: NodeId,
        host: &mut EditHost<'_>,
        settings: ListEditSettings,
    ) -> Self {
        info!("Starting list edit session on {} ({:?})", target, trigger);
        let mut session = EditSession::new(trigger, target, host.editor.cursor());

        for kind in [EventKind::Input, EventKind::FocusOut] {
            match host.preview.add_listener(target, kind) {
                Some(id) => session.listeners.register(kind, id),
                None => warn!("Could not attach {:?} listener to {}", kind, target),
            }
        }
        host.preview.set_editable(target, true);

        let grammar = ListGrammar::from_settings(&settings);
        let located = host
            .preview
            .parent(target)
            .ok_or(Error::ItemNotRendered { node: target })
            .and_then(|item| {
                locate(
                    item,
                    &host.preview.list_items(),
                    &host.editor.value(),
                    &grammar,
                    settings.skip_code_fences,
                )
            })
            .ok_or_warn("Failed to locate list item in source");

        match located {
            Some(range) => {
                select(&mut *host.editor, &mut session, range);
                session.advance(SessionPhase::Located);
            }
            None => {
                session.advance(SessionPhase::LocateFailed);
            }
        }
        session.advance(SessionPhase::Editing);

        Self {
            session,
            grammar,
            settings,
        }
    }

    /// Start editing with the settings saved in the platform config directory.
    pub fn from_config(trigger: TriggerMode, target: NodeId, host: &mut EditHost<'_>) -> Self {
        Self::new(trigger, target, host, load_config())
    }

    /// Start editing with the settings saved at `config_path`.
    ///
    /// A missing or unreadable file falls back to the defaults.
    pub fn from_config_file(
        trigger: TriggerMode,
        target: NodeId,
        host: &mut EditHost<'_>,
        config_path: &Path,
    ) -> Self {
        let settings = load_config_from(config_path).unwrap_or_warn_default(
            ListEditSettings::default(),
            "Failed to load list edit configuration",
        );
        Self::new(trigger, target, host, settings)
    }

    /// Deliver a preview event.
    ///
    /// Returns `false` when the session has no listener for the event kind or
    /// the event happened outside the edited node.
    pub fn dispatch(&mut self, event: &mut DomEvent, host: &mut EditHost<'_>) -> bool {
        if !self.session.listeners.is_listening(event.kind()) {
            trace!("No {:?} listener on {}", event.kind(), self.session.target);
            return false;
        }
        if !host.preview.contains(self.session.target, event.target()) {
            return false;
        }

        match event {
            DomEvent::Input(input) => {
                self.handle_input(input, host);
            }
            DomEvent::FocusOut(focus) => {
                self.handle_focus_out(focus, host);
            }
        }
        true
    }

    pub fn handle_input(
        &mut self,
        event: &mut InputEvent,
        host: &mut EditHost<'_>,
    ) -> InputOutcome {
        capture::on_input(&mut self.session, event, host, &self.grammar, &self.settings)
    }

    pub fn handle_focus_out(
        &mut self,
        event: &mut FocusEvent,
        host: &mut EditHost<'_>,
    ) -> FocusOutcome {
        capture::on_focus_out(&mut self.session, event, host)
    }

    /// Apply a command from the surrounding UI.
    pub fn emit(&mut self, command: BindingCommand, host: &mut EditHost<'_>) -> bool {
        match command {
            BindingCommand::Remove => self.remove(host),
        }
    }

    /// End the session. Calling it again has no effect.
    pub fn remove(&mut self, host: &mut EditHost<'_>) -> bool {
        teardown::teardown(&mut self.session, host)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn is_active(&self) -> bool {
        !self.session.is_removed()
    }

    pub fn settings(&self) -> &ListEditSettings {
        &self.settings
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Position, SourceEditor, SourceRange, TextBuffer};
    use crate::markdown::InlineHtmlConverter;
    use crate::preview::{ElementKind, MemoryBubble, MemoryPreview, PreviewPane};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Source buffer, rendered preview, engine and bubble for one document.
    struct Fixture {
        buffer: TextBuffer,
        preview: MemoryPreview,
        engine: InlineHtmlConverter,
        bubble: MemoryBubble,
    }

    impl Fixture {
        fn new(source: &str) -> Self {
            init_logging();
            Self {
                buffer: TextBuffer::new(source),
                preview: MemoryPreview::from_markdown(source).unwrap(),
                engine: InlineHtmlConverter::new(),
                bubble: MemoryBubble::with_input("draft"),
            }
        }

        fn host(&mut self) -> EditHost<'_> {
            EditHost::new(&mut self.buffer, &mut self.preview, &self.engine)
                .with_bubble(&mut self.bubble)
        }

        fn start(&mut self, target: NodeId) -> ListEditBinding {
            ListEditBinding::new(
                TriggerMode::Click,
                target,
                &mut self.host(),
                ListEditSettings::default(),
            )
        }

        fn paragraph(&self, index: usize) -> NodeId {
            self.preview.item_paragraph(index).unwrap()
        }
    }

    fn focus_out(target: NodeId) -> DomEvent {
        DomEvent::FocusOut(FocusEvent::new(target))
    }

    fn input(target: NodeId, input_type: &str) -> DomEvent {
        DomEvent::Input(InputEvent::new(target, input_type))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session start
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_click_selects_item_content() {
        let mut fx = Fixture::new("- [x] task one\n- [ ] task two");
        let p = fx.paragraph(1);
        let binding = fx.start(p);

        assert_eq!(binding.phase(), SessionPhase::Editing);
        assert_eq!(
            fx.buffer.selection(),
            SourceRange::single_line(1, 6, 14)
        );
        assert_eq!(fx.buffer.selected_text(), "task two");
        assert_eq!(binding.session().cursor_position(), Some(Position::new(1, 14)));
        assert!(fx.preview.is_editable(p));
        assert_eq!(
            fx.preview.listeners(p),
            vec![EventKind::Input, EventKind::FocusOut]
        );
    }

    #[test]
    fn test_click_skips_fenced_list_lines() {
        let mut fx = Fixture::new("```\n- not a list\n```\n\n- real item");
        let p = fx.paragraph(0);
        fx.start(p);

        assert_eq!(fx.buffer.selection(), SourceRange::single_line(4, 2, 11));
        assert_eq!(fx.buffer.selected_text(), "real item");
    }

    #[test]
    fn test_start_with_saved_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("list_edit.json");
        std::fs::write(&config_path, r#"{"demote_checked_tasks": false}"#).unwrap();

        let mut fx = Fixture::new("- [x] done");
        let p = fx.paragraph(0);
        let mut host = fx.host();
        let mut binding =
            ListEditBinding::from_config_file(TriggerMode::Keyboard, p, &mut host, &config_path);
        assert!(!binding.settings().demote_checked_tasks);

        binding.dispatch(&mut input(p, "insertParagraph"), &mut fx.host());
        assert_eq!(fx.buffer.value(), "- [x] done\n- [x] ");
    }

    #[test]
    fn test_start_with_unreadable_settings_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("list_edit.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        let mut fx = Fixture::new("- item");
        let p = fx.paragraph(0);
        let binding =
            ListEditBinding::from_config_file(TriggerMode::Click, p, &mut fx.host(), &config_path);

        assert_eq!(binding.settings(), &ListEditSettings::default());
        assert_eq!(fx.buffer.selected_text(), "item");
    }

    #[test]
    fn test_click_outside_list_leaves_selection() {
        let mut fx = Fixture::new("- one\n- two");
        fx.buffer.set_cursor(Position::new(1, 3));
        let root = fx.preview.root();
        let loose = fx.preview.add_element(ElementKind::Paragraph, Some(root), "loose");

        let binding = fx.start(loose);

        assert_eq!(binding.phase(), SessionPhase::Editing);
        assert_eq!(binding.session().selected_range(), None);
        assert_eq!(fx.buffer.selection(), SourceRange::caret(Position::new(1, 3)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commit on focus loss
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_focus_out_commits_markdown() {
        let mut fx = Fixture::new("- [x] task one\n- [ ] task two\n- three");
        let p = fx.paragraph(1);
        let mut binding = fx.start(p);

        fx.preview.set_inner_html(p, "<strong>task</strong> two&nbsp;<em>done</em>");
        let mut event = focus_out(p);
        assert!(binding.dispatch(&mut event, &mut fx.host()));

        assert_eq!(
            fx.buffer.value(),
            "- [x] task one\n- [ ] **task** two *done*\n- three"
        );
        assert_eq!(binding.phase(), SessionPhase::Removed);
        let DomEvent::FocusOut(event) = event else {
            unreachable!()
        };
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_focus_out_without_edits_keeps_source() {
        for source in [
            r"- \*a\*",
            r"- 1\. x",
            "- a < b",
            "- `a  b`",
            r"- [x] \[link\](u)",
            "- use `a  b` here",
            "- a * b and snake_case",
        ] {
            let mut fx = Fixture::new(source);
            let p = fx.paragraph(0);
            let mut binding = fx.start(p);

            binding.dispatch(&mut focus_out(p), &mut fx.host());

            assert_eq!(fx.buffer.value(), source, "unedited item rewritten");
        }
    }

    #[test]
    fn test_focus_out_rewrites_first_line_of_continued_item() {
        // Only the marker line is selected; the continuation line is left in place.
        let mut fx = Fixture::new("- first\n  second");
        let p = fx.paragraph(0);
        let mut binding = fx.start(p);
        assert_eq!(fx.buffer.selection(), SourceRange::single_line(0, 2, 7));

        binding.dispatch(&mut focus_out(p), &mut fx.host());

        assert_eq!(fx.buffer.value(), "- first second\n  second");
    }

    #[test]
    fn test_focus_out_tears_down() {
        let mut fx = Fixture::new("- item");
        let p = fx.paragraph(0);
        let mut binding = fx.start(p);

        binding.dispatch(&mut focus_out(p), &mut fx.host());

        assert!(!binding.is_active());
        assert!(!fx.preview.is_editable(p));
        assert!(fx.preview.listeners(p).is_empty());
        assert!(!fx.bubble.is_visible());
        assert_eq!(fx.bubble.input(), Some(""));
        assert!(fx.buffer.selection().is_empty());
    }

    #[test]
    fn test_focus_out_without_location_restores_cursor() {
        let mut fx = Fixture::new("- one");
        fx.buffer.set_cursor(Position::new(0, 3));
        let root = fx.preview.root();
        let loose = fx.preview.add_element(ElementKind::Paragraph, Some(root), "edited");
        let mut binding = fx.start(loose);

        fx.buffer.set_cursor(Position::new(0, 0));
        let outcome = binding.handle_focus_out(&mut FocusEvent::new(loose), &mut fx.host());

        assert_eq!(
            outcome,
            FocusOutcome::Discarded {
                markdown: "edited".to_string()
            }
        );
        assert_eq!(fx.buffer.value(), "- one");
        assert_eq!(fx.buffer.cursor(), Position::new(0, 3));
        assert_eq!(binding.phase(), SessionPhase::Removed);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_enter_continues_list() {
        let mut fx = Fixture::new("- [x] done\n- next");
        let p = fx.paragraph(0);
        let mut binding = fx.start(p);

        assert!(binding.dispatch(&mut input(p, "insertParagraph"), &mut fx.host()));

        assert_eq!(fx.buffer.value(), "- [x] done\n- [ ] \n- next");
        assert_eq!(fx.buffer.cursor(), Position::new(1, 6));
        assert!(fx.buffer.has_focus());
        assert_eq!(binding.phase(), SessionPhase::Removed);
        assert!(fx.preview.listeners(p).is_empty());
    }

    #[test]
    fn test_shift_enter_continues_ordered_list() {
        let mut fx = Fixture::new("1. first\n2. second");
        let p = fx.paragraph(1);
        let mut binding = fx.start(p);

        let mut event = InputEvent::new(p, "insertLineBreak");
        let outcome = binding.handle_input(&mut event, &mut fx.host());

        let InputOutcome::LineBreak(inserted) = outcome else {
            panic!("expected a line break, got {:?}", outcome);
        };
        assert_eq!(inserted.line, 1);
        assert_eq!(inserted.text, "\n2. ");
        assert_eq!(fx.buffer.value(), "1. first\n2. second\n2. ");
    }

    #[test]
    fn test_typing_is_left_native() {
        let mut fx = Fixture::new("- item");
        let p = fx.paragraph(0);
        let mut binding = fx.start(p);

        let mut event = InputEvent::new(p, "insertText");
        let outcome = binding.handle_input(&mut event, &mut fx.host());

        assert_eq!(outcome, InputOutcome::Native);
        assert!(event.is_propagation_stopped());
        assert_eq!(binding.phase(), SessionPhase::Editing);
        assert_eq!(fx.buffer.value(), "- item");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Routing
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_dispatch_ignores_other_nodes() {
        let mut fx = Fixture::new("- one\n- two");
        let p = fx.paragraph(0);
        let other = fx.paragraph(1);
        let mut binding = fx.start(p);

        assert!(!binding.dispatch(&mut focus_out(other), &mut fx.host()));
        assert_eq!(binding.phase(), SessionPhase::Editing);
        assert_eq!(fx.buffer.value(), "- one\n- two");
    }

    #[test]
    fn test_dispatch_from_inline_child_is_not_acted_on() {
        let mut fx = Fixture::new("- **bold** item");
        let p = fx.paragraph(0);
        let strong = fx.preview.add_element(ElementKind::Other, Some(p), "bold");
        let mut binding = fx.start(p);

        assert!(binding.dispatch(&mut input(strong, "insertParagraph"), &mut fx.host()));
        assert_eq!(binding.phase(), SessionPhase::Editing);
        assert_eq!(fx.buffer.value(), "- **bold** item");
    }

    #[test]
    fn test_dispatch_after_removal_is_dropped() {
        let mut fx = Fixture::new("- one");
        let p = fx.paragraph(0);
        let mut binding = fx.start(p);
        binding.remove(&mut fx.host());

        assert!(!binding.dispatch(&mut focus_out(p), &mut fx.host()));
        assert_eq!(fx.buffer.value(), "- one");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Teardown
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_remove_twice_is_noop() {
        let mut fx = Fixture::new("- one\n- two");
        let p = fx.paragraph(1);
        let mut binding = fx.start(p);

        assert!(binding.emit(BindingCommand::Remove, &mut fx.host()));
        assert_eq!(fx.buffer.selection(), SourceRange::caret(Position::new(1, 5)));

        fx.buffer.set_selection(Position::new(0, 0), Position::new(0, 5));
        fx.preview.set_editable(p, true);

        assert!(!binding.remove(&mut fx.host()));
        assert_eq!(fx.buffer.selected_text(), "- one");
        assert!(fx.preview.is_editable(p));
        assert_eq!(binding.phase(), SessionPhase::Removed);
    }

    #[test]
    fn test_remove_without_bubble() {
        let mut fx = Fixture::new("- one");
        let p = fx.paragraph(0);
        let mut binding = fx.start(p);

        let mut host = EditHost::new(&mut fx.buffer, &mut fx.preview, &fx.engine);
        assert!(binding.remove(&mut host));
        assert!(fx.bubble.is_visible());
        assert!(fx.preview.listeners(p).is_empty());
    }
}
