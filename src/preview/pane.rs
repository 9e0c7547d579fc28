//! The preview pane contract
//!
//! The bridge reads the rendered preview through [`PreviewPane`]: the list
//! item nodes in document order, the element tree around the edited node,
//! and the node's HTML. It also toggles the node's editability and
//! registers/deregisters its two event listeners there.

use std::fmt;

/// Identity of a rendered node in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of element a node is, as far as the bridge cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A rendered list entry (`<li>`)
    ListItem,
    /// The text container inside a list entry (`<p>`)
    Paragraph,
    Other,
}

/// DOM-level signals a session listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `input`
    Input,
    /// `focusout`
    FocusOut,
}

/// Handle to one registered listener, needed to remove exactly that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Read access to the rendered preview plus the few mutations a session makes.
pub trait PreviewPane {
    /// All rendered list item nodes, in document order.
    fn list_items(&self) -> Vec<NodeId>;

    /// Parent element of `node`.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Kind of `node`, or `None` if the node does not exist.
    fn kind(&self, node: NodeId) -> Option<ElementKind>;

    /// Current inner HTML of `node`.
    fn inner_html(&self, node: NodeId) -> Option<String>;

    /// Turn the `contenteditable` capability of `node` on or off.
    fn set_editable(&mut self, node: NodeId, editable: bool);

    /// Attach a listener for `kind` on `node`.
    fn add_listener(&mut self, node: NodeId, kind: EventKind) -> Option<ListenerId>;

    /// Detach a listener. Returns `false` if it was not attached.
    fn remove_listener(&mut self, node: NodeId, listener: ListenerId) -> bool;

    /// Whether `node` is `ancestor` or lies somewhere beneath it.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

/// The auxiliary popup shown next to the edited item.
pub trait BubbleSurface {
    fn hide(&mut self);

    /// Clear the embedded text input, if the bubble has one.
    fn clear_input(&mut self);
}
