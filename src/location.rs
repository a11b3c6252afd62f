// Copyright (c) 2025 Redglyph (@gmail.com). All Rights Reserved.

use std::fmt::{Display, Formatter};
use std::rc::Rc;

// ---------------------------------------------------------------------------------------------
// Locations

pub type CaretCol = u32;
pub type CaretLine = u32;

/// A point in a source text, with the identity of the file it belongs to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub file: Rc<str>,
    pub line: CaretLine,
    pub col: CaretCol,
}

impl Position {
    pub fn new<T: Into<Rc<str>>>(file: T, line: CaretLine, col: CaretCol) -> Self {
        Position { file: file.into(), line, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { file: Rc::from("<unknown>"), line: 1, col: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}

/// `Location` is the span `[begin, end)` of a construct in the source text. `begin` and `end`
/// may point into different files when the construct crosses an inclusion boundary.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Location {
    pub begin: Position,
    pub end: Position,
}

impl Location {
    #[inline(always)]
    pub fn new(begin: Position, end: Position) -> Self {
        Location { begin, end }
    }

    /// Builds an empty span collapsed onto a single position.
    pub fn point(pos: Position) -> Self {
        Location { begin: pos.clone(), end: pos }
    }

    /// Builds an empty span at the end of `self`.
    pub fn after(&self) -> Self {
        Location::point(self.end.clone())
    }

    #[inline(always)]
    pub fn is_point(&self) -> bool {
        self.begin == self.end
    }

    /// Returns the union of two locations: begins at `self`, ends at `other`.
    /// Merging is associative.
    pub fn merge(&self, other: &Location) -> Location {
        Location { begin: self.begin.clone(), end: other.end.clone() }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.begin)?;
        if self.begin == self.end {
            return Ok(());
        }
        write!(f, "-")?;
        if self.begin.file != self.end.file {
            write!(f, "{}:{}:{}", self.end.file, self.end.line, self.end.col)
        } else if self.begin.line != self.end.line {
            write!(f, "{}:{}", self.end.line, self.end.col)
        } else {
            write!(f, "{}", self.end.col)
        }
    }
}
