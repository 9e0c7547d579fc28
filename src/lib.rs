//! List Edit Bridge
//!
//! Edit rendered markdown list items directly in the preview and write the
//! result back into the markdown source. The bridge locates the clicked item's
//! line in the source, selects its content, commits the edited HTML as
//! markdown when focus leaves the item, and continues the list when Enter is
//! pressed inside it.

pub mod binding;
pub mod config;
pub mod editor;
pub mod error;
pub mod markdown;
pub mod preview;
pub mod string_utils;

pub use binding::{BindingCommand, EditHost, ListEditBinding, SessionPhase, TriggerMode};
pub use config::ListEditSettings;
pub use error::{Error, Result};
