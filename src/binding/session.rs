//! Editing session state
//!
//! One `EditSession` lives for one list item edit, from the click that makes
//! the rendered item editable to its commit or line break. The components of
//! the binding take it explicitly instead of sharing object state.

use crate::editor::{Position, SourceRange};
use crate::preview::{EventKind, ListenerId, NodeId};
use log::{debug, warn};

/// How editing was invoked. The bridge only records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerMode {
    #[default]
    Click,
    DoubleClick,
    Keyboard,
}

/// Lifecycle of a session.
///
/// `Created → Located | LocateFailed → Editing → Committed | Discarded | LineBroken → Removed`.
/// `Discarded` is a focus loss with no source span to write to. An explicit
/// remove goes straight from `Editing` to `Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Created,
    Located,
    LocateFailed,
    Editing,
    Committed,
    Discarded,
    LineBroken,
    Removed,
}

impl SessionPhase {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_advance_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Created, Located)
                | (Created, LocateFailed)
                | (Located, Editing)
                | (LocateFailed, Editing)
                | (Editing, Committed)
                | (Editing, Discarded)
                | (Editing, LineBroken)
                | (Editing, Removed)
                | (Committed, Removed)
                | (Discarded, Removed)
                | (LineBroken, Removed)
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Listener Registry
// ─────────────────────────────────────────────────────────────────────────────

/// The exact listener handles a session attached, kept for removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerRegistry {
    entries: Vec<(EventKind, ListenerId)>,
}

impl ListenerRegistry {
    pub fn register(&mut self, kind: EventKind, id: ListenerId) {
        self.entries.push((kind, id));
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every registration.
    pub fn take_all(&mut self) -> Vec<(EventKind, ListenerId)> {
        std::mem::take(&mut self.entries)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// Live state of one list item edit.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub(crate) trigger: TriggerMode,
    /// The rendered text node being edited (owned by the preview)
    pub(crate) target: NodeId,
    /// Source span of the item's content; `None` until located
    pub(crate) selected_range: Option<SourceRange>,
    /// Cursor to restore when the session ends without a replacement
    pub(crate) cursor_position: Option<Position>,
    pub(crate) phase: SessionPhase,
    pub(crate) listeners: ListenerRegistry,
}

impl EditSession {
    pub fn new(trigger: TriggerMode, target: NodeId, cursor: Position) -> Self {
        Self {
            trigger,
            target,
            selected_range: None,
            cursor_position: Some(cursor),
            phase: SessionPhase::Created,
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn trigger(&self) -> TriggerMode {
        self.trigger
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn selected_range(&self) -> Option<SourceRange> {
        self.selected_range
    }

    pub fn cursor_position(&self) -> Option<Position> {
        self.cursor_position
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Whether the session still accepts edits.
    pub fn is_editing(&self) -> bool {
        self.phase == SessionPhase::Editing
    }

    pub fn is_removed(&self) -> bool {
        self.phase == SessionPhase::Removed
    }

    /// Move to `next` if the state machine allows it.
    pub(crate) fn advance(&mut self, next: SessionPhase) -> bool {
        if !self.phase.can_advance_to(next) {
            warn!(
                "Session on {}: ignoring transition {:?} -> {:?}",
                self.target, self.phase, next
            );
            return false;
        }
        debug!("Session on {}: {:?} -> {:?}", self.target, self.phase, next);
        self.phase = next;
        true
    }
}
