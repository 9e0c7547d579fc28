//! DOM-style events delivered to an editing session

use super::{EventKind, NodeId};

/// The `inputType` of a DOM `input` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    InsertText,
    InsertFromPaste,
    InsertParagraph,
    InsertLineBreak,
    DeleteContentBackward,
    DeleteContentForward,
    DeleteByCut,
    DeleteWordBackward,
    Other(String),
}

impl InputType {
    /// Parse a DOM `inputType` name.
    pub fn from_dom(name: &str) -> Self {
        match name {
            "insertText" => InputType::InsertText,
            "insertFromPaste" => InputType::InsertFromPaste,
            "insertParagraph" => InputType::InsertParagraph,
            "insertLineBreak" => InputType::InsertLineBreak,
            "deleteContentBackward" => InputType::DeleteContentBackward,
            "deleteContentForward" => InputType::DeleteContentForward,
            "deleteByCut" => InputType::DeleteByCut,
            "deleteWordBackward" => InputType::DeleteWordBackward,
            other => InputType::Other(other.to_string()),
        }
    }

    /// The DOM `inputType` name.
    pub fn dom_name(&self) -> &str {
        match self {
            InputType::InsertText => "insertText",
            InputType::InsertFromPaste => "insertFromPaste",
            InputType::InsertParagraph => "insertParagraph",
            InputType::InsertLineBreak => "insertLineBreak",
            InputType::DeleteContentBackward => "deleteContentBackward",
            InputType::DeleteContentForward => "deleteContentForward",
            InputType::DeleteByCut => "deleteByCut",
            InputType::DeleteWordBackward => "deleteWordBackward",
            InputType::Other(name) => name,
        }
    }

    /// Enter / Shift+Enter inside the editable item.
    pub fn is_line_break(&self) -> bool {
        matches!(self, InputType::InsertParagraph | InputType::InsertLineBreak)
    }
}

impl From<&str> for InputType {
    fn from(name: &str) -> Self {
        InputType::from_dom(name)
    }
}

/// An `input` event on a rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub target: NodeId,
    pub input_type: InputType,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl InputEvent {
    pub fn new(target: NodeId, input_type: impl Into<InputType>) -> Self {
        Self {
            target,
            input_type: input_type.into(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A `focusout` event on a rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusEvent {
    pub target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl FocusEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Any event the host may route to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Input(InputEvent),
    FocusOut(FocusEvent),
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::Input(_) => EventKind::Input,
            DomEvent::FocusOut(_) => EventKind::FocusOut,
        }
    }

    pub fn target(&self) -> NodeId {
        match self {
            DomEvent::Input(e) => e.target,
            DomEvent::FocusOut(e) => e.target,
        }
    }
}
