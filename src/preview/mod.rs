//! Preview module for the list edit bridge
//!
//! This module defines how the bridge sees the rendered preview: node
//! identities, element kinds, the events a session listens for, the
//! auxiliary bubble popup, and in-memory implementations of each.

mod events;
mod memory;
mod pane;

pub use events::{DomEvent, FocusEvent, InputEvent, InputType};
pub use memory::{MemoryBubble, MemoryPreview};
pub use pane::{BubbleSurface, ElementKind, EventKind, ListenerId, NodeId, PreviewPane};
