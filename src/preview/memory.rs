//! In-memory preview pane and bubble
//!
//! `MemoryPreview` models the rendered preview as a flat element table with
//! parent links, which is all the bridge needs. Hosts without a real DOM
//! (and the session tests) build one straight from markdown with comrak.

use super::{BubbleSurface, ElementKind, EventKind, ListenerId, NodeId, PreviewPane};
use crate::error::Result;
use crate::markdown::render_list_items;
use log::debug;

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    parent: Option<NodeId>,
    html: String,
    editable: bool,
    listeners: Vec<(ListenerId, EventKind)>,
}

/// A rendered preview held in memory.
#[derive(Debug, Clone)]
pub struct MemoryPreview {
    elements: Vec<Element>,
    next_listener: u64,
}

impl Default for MemoryPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPreview {
    /// An empty preview containing only the root container.
    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                kind: ElementKind::Other,
                parent: None,
                html: String::new(),
                editable: false,
                listeners: Vec::new(),
            }],
            next_listener: 0,
        }
    }

    /// Render `source` and build one `<li><p>…</p></li>` pair per list item.
    pub fn from_markdown(source: &str) -> Result<Self> {
        let mut preview = Self::new();
        let root = preview.root();
        for item in render_list_items(source)? {
            let li = preview.add_element(ElementKind::ListItem, Some(root), "");
            preview.add_element(ElementKind::Paragraph, Some(li), &item.html);
        }
        debug!(
            "Built preview with {} list items",
            preview.list_items().len()
        );
        Ok(preview)
    }

    /// The root container node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element and return its id.
    pub fn add_element(&mut self, kind: ElementKind, parent: Option<NodeId>, html: &str) -> NodeId {
        self.elements.push(Element {
            kind,
            parent,
            html: html.to_string(),
            editable: false,
            listeners: Vec::new(),
        });
        NodeId(self.elements.len() - 1)
    }

    /// The text paragraph of the `index`-th list item.
    pub fn item_paragraph(&self, index: usize) -> Option<NodeId> {
        let li = *self.list_items().get(index)?;
        self.elements
            .iter()
            .enumerate()
            .find(|(_, el)| el.kind == ElementKind::Paragraph && el.parent == Some(li))
            .map(|(idx, _)| NodeId(idx))
    }

    /// Replace a node's HTML, as the browser does while the user types.
    pub fn set_inner_html(&mut self, node: NodeId, html: &str) -> bool {
        match self.elements.get_mut(node.0) {
            Some(el) => {
                el.html = html.to_string();
                true
            }
            None => false,
        }
    }

    pub fn is_editable(&self, node: NodeId) -> bool {
        self.elements.get(node.0).is_some_and(|el| el.editable)
    }

    /// Event kinds with a listener currently attached to `node`.
    pub fn listeners(&self, node: NodeId) -> Vec<EventKind> {
        self.elements
            .get(node.0)
            .map(|el| el.listeners.iter().map(|(_, kind)| *kind).collect())
            .unwrap_or_default()
    }
}

impl PreviewPane for MemoryPreview {
    fn list_items(&self) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.kind == ElementKind::ListItem)
            .map(|(idx, _)| NodeId(idx))
            .collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements.get(node.0)?.parent
    }

    fn kind(&self, node: NodeId) -> Option<ElementKind> {
        self.elements.get(node.0).map(|el| el.kind)
    }

    fn inner_html(&self, node: NodeId) -> Option<String> {
        self.elements.get(node.0).map(|el| el.html.clone())
    }

    fn set_editable(&mut self, node: NodeId, editable: bool) {
        if let Some(el) = self.elements.get_mut(node.0) {
            el.editable = editable;
        }
    }

    fn add_listener(&mut self, node: NodeId, kind: EventKind) -> Option<ListenerId> {
        let el = self.elements.get_mut(node.0)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        el.listeners.push((id, kind));
        Some(id)
    }

    fn remove_listener(&mut self, node: NodeId, listener: ListenerId) -> bool {
        let Some(el) = self.elements.get_mut(node.0) else {
            return false;
        };
        let before = el.listeners.len();
        el.listeners.retain(|(id, _)| *id != listener);
        el.listeners.len() != before
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bubble
// ─────────────────────────────────────────────────────────────────────────────

/// An in-memory bubble popup, optionally holding a text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBubble {
    visible: bool,
    input: Option<String>,
}

impl MemoryBubble {
    /// A visible bubble without a text input.
    pub fn new() -> Self {
        Self {
            visible: true,
            input: None,
        }
    }

    /// A visible bubble whose text input holds `value`.
    pub fn with_input(value: &str) -> Self {
        Self {
            visible: true,
            input: Some(value.to_string()),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }
}

impl BubbleSurface for MemoryBubble {
    fn hide(&mut self) {
        self.visible = false;
    }

    fn clear_input(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.clear();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
