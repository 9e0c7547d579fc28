//! Source document addressing
//!
//! Positions are zero-based `(line, column)` pairs; columns count characters.

use std::fmt;

/// A position in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line index (0-indexed)
    pub line: usize,
    /// Character column within the line (0-indexed)
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An ordered span `[from, to)` of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub from: Position,
    pub to: Position,
}

impl SourceRange {
    /// Create a range, swapping the endpoints if they arrive reversed.
    pub fn new(from: Position, to: Position) -> Self {
        if to < from {
            Self { from: to, to: from }
        } else {
            Self { from, to }
        }
    }

    /// A span within a single line, `start..end` in character columns.
    pub fn single_line(line: usize, start: usize, end: usize) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end))
    }

    /// A zero-width range at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self { from: pos, to: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn is_single_line(&self) -> bool {
        self.from.line == self.to.line
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }

    #[test]
    fn test_range_normalizes_reversed_endpoints() {
        let range = SourceRange::new(Position::new(1, 8), Position::new(1, 2));
        assert_eq!(range.from, Position::new(1, 2));
        assert_eq!(range.to, Position::new(1, 8));
    }

    #[test]
    fn test_single_line_range() {
        let range = SourceRange::single_line(3, 6, 14);
        assert!(range.is_single_line());
        assert!(!range.is_empty());
        assert_eq!(format!("{}", range), "3:6..3:14");
    }

    #[test]
    fn test_caret_is_empty() {
        assert!(SourceRange::caret(Position::new(4, 1)).is_empty());
    }
}
