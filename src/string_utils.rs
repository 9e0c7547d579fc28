//! Character Column Utilities
//!
//! Source document positions are addressed as `(line, column)` where the
//! column counts Unicode scalar values, not bytes. Rust strings are UTF-8,
//! so a column must be converted to a byte index before slicing or splicing.
//!
//! Characters like `ø`, `å`, `中`, `🎉` are multi-byte in UTF-8; slicing
//! `line[col..]` with a char column would either cut the wrong text or panic.
//! Every helper here clamps out-of-range columns to the end of the line.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{char_len, column_to_byte};
//!
//! let line = "- [ ] bær";
//! assert_eq!(char_len(line), 9);
//! assert_eq!(&line[column_to_byte(line, 6)..], "bær");
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Column Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Number of characters (Unicode scalar values) in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Convert a character column into a byte index into `s`.
///
/// Columns past the end of the string map to `s.len()`.
#[inline]
pub fn column_to_byte(s: &str, column: usize) -> usize {
    s.char_indices()
        .nth(column)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Convert a byte index into a character column.
///
/// Byte indices inside a multi-byte character round down to that character.
#[inline]
pub fn byte_to_column(s: &str, byte_index: usize) -> usize {
    s.char_indices()
        .take_while(|(byte, ch)| byte + ch.len_utf8() <= byte_index)
        .count()
}

/// Slice `s` between two character columns.
///
/// Both columns are clamped to the string; `start > end` yields `""`.
#[inline]
pub fn slice_columns(s: &str, start: usize, end: usize) -> &str {
    let start = column_to_byte(s, start);
    let end = column_to_byte(s, end);
    if start >= end {
        return "";
    }
    &s[start..end]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
