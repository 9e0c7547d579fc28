//! List-line grammar
//!
//! Recognizes a single source line as a markdown list item and splits it into
//! its marker, optional task checkbox, and content. The Locator uses it to
//! count list lines and find the content span; the Line-Break Handler uses it
//! to continue a list with the same marker.
//!
//! A list line is:
//! - indentation (spaces/tabs)
//! - a bullet (`-`, `*`, `+`) or an ordered number (`1.`, `12)`)
//! - whitespace, or the end of the line
//! - optionally a checkbox (`[ ]`, `[x]`, `[X]`) and its trailing whitespace
//! - the content (rest of the line)
//!
//! The marker keeps indentation and trailing whitespace, so prepending it to a
//! new line reproduces the original list style exactly.

use crate::config::ListEditSettings;
use crate::editor::SourceRange;
use crate::string_utils::{byte_to_column, char_len};
use std::borrow::Cow;

/// Whitespace allowed around list markers
const MARKER_SPACE: [char; 2] = [' ', '\t'];

// ─────────────────────────────────────────────────────────────────────────────
// Match Types
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a task checkbox is ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
}

/// A task checkbox as it appears in the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkbox<'a> {
    /// Raw checkbox text including trailing whitespace, e.g. `"[x] "`
    pub text: &'a str,
    pub state: CheckboxState,
}

impl<'a> Checkbox<'a> {
    pub fn is_checked(&self) -> bool {
        self.state == CheckboxState::Checked
    }

    /// The checkbox for a follow-up item: `[x]` becomes `[ ]`, trailing
    /// whitespace is kept as-is.
    pub fn demoted(&self) -> Cow<'a, str> {
        match self.state {
            // "[x]" is three ASCII bytes
            CheckboxState::Checked => Cow::Owned(format!("[ ]{}", &self.text[3..])),
            CheckboxState::Unchecked => Cow::Borrowed(self.text),
        }
    }
}

/// A source line decomposed as a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLineMatch<'a> {
    /// Indentation, bullet or number, and the whitespace after it
    pub marker: &'a str,
    /// Task checkbox, if the item is a task
    pub checkbox: Option<Checkbox<'a>>,
    /// The item's text payload
    pub content: &'a str,
    /// Character column where `content` starts in the line
    pub content_offset: usize,
}

impl<'a> ListLineMatch<'a> {
    /// The span of `content` on source line `line`.
    pub fn content_span(&self, line: usize) -> SourceRange {
        SourceRange::single_line(
            line,
            self.content_offset,
            self.content_offset + char_len(self.content),
        )
    }

    /// Prefix for a new item continuing this list: the same marker, and the
    /// checkbox (demoted when `demote_checked` is set).
    pub fn continuation_prefix(&self, demote_checked: bool) -> String {
        let checkbox = match self.checkbox {
            Some(cb) if demote_checked => cb.demoted(),
            Some(cb) => Cow::Borrowed(cb.text),
            None => Cow::Borrowed(""),
        };
        format!("{}{}", self.marker, checkbox)
    }
}

/// Result of running the grammar over a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLine<'a> {
    Matched(ListLineMatch<'a>),
    NoMatch,
}

impl<'a> ListLine<'a> {
    pub fn matched(self) -> Option<ListLineMatch<'a>> {
        match self {
            ListLine::Matched(m) => Some(m),
            ListLine::NoMatch => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Grammar
// ─────────────────────────────────────────────────────────────────────────────

/// The list-line recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListGrammar {
    /// Recognize task checkboxes
    pub task_lists: bool,
    /// Longest accepted ordered list number
    pub max_ordered_digits: usize,
}

impl Default for ListGrammar {
    fn default() -> Self {
        Self::from_settings(&ListEditSettings::default())
    }
}

impl ListGrammar {
    pub fn from_settings(settings: &ListEditSettings) -> Self {
        Self {
            task_lists: settings.task_lists,
            max_ordered_digits: settings.max_ordered_digits,
        }
    }

    /// Decompose `line` as a list item.
    pub fn parse<'a>(&self, line: &'a str) -> ListLine<'a> {
        let body = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = body.trim_start_matches(MARKER_SPACE);
        let indent_len = body.len() - trimmed.len();

        let Some(bullet_len) = self.bullet_len(trimmed) else {
            return ListLine::NoMatch;
        };

        let after_bullet = &trimmed[bullet_len..];
        let spacing = after_bullet.len() - after_bullet.trim_start_matches(MARKER_SPACE).len();
        if spacing == 0 && !after_bullet.is_empty() {
            return ListLine::NoMatch;
        }
        if is_thematic_break(trimmed) {
            return ListLine::NoMatch;
        }

        let marker_len = indent_len + bullet_len + spacing;
        let marker = &body[..marker_len];

        let checkbox = self.checkbox(&body[marker_len..]);
        let content_start = marker_len + checkbox.map_or(0, |cb| cb.text.len());
        let content = &body[content_start..];

        ListLine::Matched(ListLineMatch {
            marker,
            checkbox,
            content,
            content_offset: byte_to_column(body, content_start),
        })
    }

    /// Byte length of the bullet or ordered number at the start of `s`.
    fn bullet_len(&self, s: &str) -> Option<usize> {
        if s.starts_with(['-', '*', '+']) {
            return Some(1);
        }

        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || digits > self.max_ordered_digits {
            return None;
        }
        match s.as_bytes().get(digits) {
            Some(b'.') | Some(b')') => Some(digits + 1),
            _ => None,
        }
    }

    /// A task checkbox at the start of `rest`.
    fn checkbox<'a>(&self, rest: &'a str) -> Option<Checkbox<'a>> {
        if !self.task_lists {
            return None;
        }

        let state = if rest.starts_with("[ ]") {
            CheckboxState::Unchecked
        } else if rest.starts_with("[x]") || rest.starts_with("[X]") {
            CheckboxState::Checked
        } else {
            return None;
        };

        let after = &rest[3..];
        let spacing = after.len() - after.trim_start_matches(MARKER_SPACE).len();
        if spacing == 0 && !after.is_empty() {
            return None;
        }

        Some(Checkbox {
            text: &rest[..3 + spacing],
            state,
        })
    }
}

/// `---`, `* * *` and friends render as rules, not list items.
fn is_thematic_break(trimmed: &str) -> bool {
    let mut marks = trimmed.chars().filter(|c| !MARKER_SPACE.contains(c));
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<ListLineMatch<'_>> {
        ListGrammar::default().parse(line).matched()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Marker recognition
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_bullet() {
        let m = parse("- Item text").unwrap();
        assert_eq!(m.marker, "- ");
        assert_eq!(m.checkbox, None);
        assert_eq!(m.content, "Item text");
        assert_eq!(m.content_offset, 2);
    }

    #[test]
    fn test_parse_asterisk_and_plus() {
        assert_eq!(parse("* star").unwrap().marker, "* ");
        assert_eq!(parse("+ plus").unwrap().marker, "+ ");
    }

    #[test]
    fn test_parse_ordered() {
        let m = parse("12. Twelfth").unwrap();
        assert_eq!(m.marker, "12. ");
        assert_eq!(m.content, "Twelfth");

        let m = parse("3) Paren").unwrap();
        assert_eq!(m.marker, "3) ");
    }

    #[test]
    fn test_parse_ordered_too_many_digits() {
        assert!(parse("1234567890. nope").is_none());

        let grammar = ListGrammar {
            max_ordered_digits: 2,
            ..ListGrammar::default()
        };
        assert!(grammar.parse("100. nope").matched().is_none());
        assert!(grammar.parse("99. yes").matched().is_some());
    }

    #[test]
    fn test_parse_indented_marker_keeps_indent() {
        let m = parse("    - Nested item").unwrap();
        assert_eq!(m.marker, "    - ");
        assert_eq!(m.content_offset, 6);
    }

    #[test]
    fn test_parse_wide_spacing() {
        let m = parse("-\t  wide").unwrap();
        assert_eq!(m.marker, "-\t  ");
        assert_eq!(m.content, "wide");
    }

    #[test]
    fn test_parse_empty_item() {
        let m = parse("- ").unwrap();
        assert_eq!(m.content, "");
        assert_eq!(m.content_offset, 2);

        let m = parse("-").unwrap();
        assert_eq!(m.marker, "-");
        assert_eq!(m.content, "");
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let m = parse("- windows\r").unwrap();
        assert_eq!(m.content, "windows");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Non-list lines
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_plain_text() {
        assert!(parse("Regular paragraph").is_none());
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
    }

    #[test]
    fn test_parse_marker_without_space() {
        assert!(parse("-dash").is_none());
        assert!(parse("**bold**").is_none());
        assert!(parse("1.5 apples").is_none());
    }

    #[test]
    fn test_parse_thematic_breaks() {
        assert!(parse("---").is_none());
        assert!(parse("- - -").is_none());
        assert!(parse("* * *").is_none());
        assert!(parse("- -").is_some());
    }

    #[test]
    fn test_parse_heading_and_quote() {
        assert!(parse("# Heading").is_none());
        assert!(parse("> quoted").is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Checkboxes
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_task_unchecked() {
        let m = parse("- [ ] Todo item").unwrap();
        assert_eq!(m.marker, "- ");
        let cb = m.checkbox.unwrap();
        assert_eq!(cb.text, "[ ] ");
        assert!(!cb.is_checked());
        assert_eq!(m.content, "Todo item");
        assert_eq!(m.content_offset, 6);
    }

    #[test]
    fn test_parse_task_checked_upper_and_lower() {
        assert!(parse("- [x] done").unwrap().checkbox.unwrap().is_checked());
        assert!(parse("- [X] done").unwrap().checkbox.unwrap().is_checked());
    }

    #[test]
    fn test_parse_task_disabled() {
        let grammar = ListGrammar {
            task_lists: false,
            ..ListGrammar::default()
        };
        let m = grammar.parse("- [x] done").matched().unwrap();
        assert_eq!(m.checkbox, None);
        assert_eq!(m.content, "[x] done");
    }

    #[test]
    fn test_parse_bracket_text_is_not_checkbox() {
        let m = parse("- [link](url)").unwrap();
        assert_eq!(m.checkbox, None);
        assert_eq!(m.content, "[link](url)");
    }

    #[test]
    fn test_demoted_checkbox() {
        let m = parse("- [x]  spaced").unwrap();
        assert_eq!(m.checkbox.unwrap().demoted(), "[ ]  ");

        let m = parse("- [ ] open").unwrap();
        assert_eq!(m.checkbox.unwrap().demoted(), "[ ] ");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Spans and prefixes
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_content_offset_is_char_column() {
        let m = parse("- [ ] blåbær").unwrap();
        let span = m.content_span(4);
        assert_eq!(span, SourceRange::single_line(4, 6, 12));
    }

    #[test]
    fn test_content_offset_with_repeated_text() {
        // The content also appears inside the marker region
        let m = parse("- - x").unwrap();
        assert_eq!(m.content, "- x");
        assert_eq!(m.content_offset, 2);
    }

    #[test]
    fn test_continuation_prefix() {
        assert_eq!(parse("- [x] done").unwrap().continuation_prefix(true), "- [ ] ");
        assert_eq!(parse("- [x] done").unwrap().continuation_prefix(false), "- [x] ");
        assert_eq!(parse("  1. one").unwrap().continuation_prefix(true), "  1. ");
        assert_eq!(parse("* plain").unwrap().continuation_prefix(true), "* ");
    }
}
