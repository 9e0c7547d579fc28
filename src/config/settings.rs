//! Settings for in-place list item editing
//!
//! This module defines the `ListEditSettings` struct that holds the
//! user-configurable knobs of the list edit bridge, with serde support
//! for JSON persistence.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// List Edit Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User-configurable behavior of list item editing sessions.
///
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`,
/// so partial config files load cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListEditSettings {
    // ─────────────────────────────────────────────────────────────────────────
    // Line Break
    // ─────────────────────────────────────────────────────────────────────────
    /// Marker inserted when a line break happens on a line that is not a list item
    pub default_marker: String,

    /// Whether a checked task (`[x]`) continues as an unchecked one (`[ ]`)
    pub demote_checked_tasks: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // List Grammar
    // ─────────────────────────────────────────────────────────────────────────
    /// Ignore list-looking lines inside fenced code blocks
    pub skip_code_fences: bool,

    /// Recognize `[ ]` / `[x]` task checkboxes after the list marker
    pub task_lists: bool,

    /// Maximum digits in an ordered list number (CommonMark allows 9)
    pub max_ordered_digits: usize,
}

impl Default for ListEditSettings {
    fn default() -> Self {
        Self {
            default_marker: Self::DEFAULT_MARKER.to_string(),
            demote_checked_tasks: true,
            skip_code_fences: true,
            task_lists: true,
            max_ordered_digits: Self::MAX_ORDERED_DIGITS,
        }
    }
}

impl ListEditSettings {
    /// Fallback bullet for new list items.
    pub const DEFAULT_MARKER: &'static str = "- ";

    /// Minimum allowed ordered list digits
    pub const MIN_ORDERED_DIGITS: usize = 1;

    /// Maximum allowed ordered list digits
    pub const MAX_ORDERED_DIGITS: usize = 9;

    /// Sanitize settings values to ensure they're within valid ranges.
    ///
    /// This should be called after loading settings from disk to ensure
    /// any manually edited or corrupted values are corrected.
    pub fn sanitize(&mut self) {
        // Empty or blank marker falls back to the default bullet
        if self.default_marker.trim().is_empty() {
            self.default_marker = Self::DEFAULT_MARKER.to_string();
        } else if !self.default_marker.ends_with(char::is_whitespace) {
            self.default_marker.push(' ');
        }

        self.max_ordered_digits = self
            .max_ordered_digits
            .clamp(Self::MIN_ORDERED_DIGITS, Self::MAX_ORDERED_DIGITS);
    }

    /// Parse settings from JSON and sanitize them in one step.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
