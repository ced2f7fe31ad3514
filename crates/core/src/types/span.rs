use serde::{Deserialize, Serialize};

use super::position::Position;

/// A source range with inclusive start/end positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Check if a position is within this span
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }

    /// Check if a line number is within this span
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start.line && line <= self.end.line
    }

    /// Number of lines covered by this span
    pub fn line_count(&self) -> u32 {
        self.end.line - self.start.line + 1
    }
}
