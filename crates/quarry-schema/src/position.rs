use serde::Serialize;
use std::fmt;

///
/// SourcePosition
/// A line and column in a schema document, both one-based.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SourcePosition {
    line: usize,
    col: usize,
}

impl SourcePosition {
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.col
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

///
/// Spanning
/// Wraps an item with the start and end of the source text it came from.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Spanning<T> {
    pub item: T,
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl<T> Spanning<T> {
    #[must_use]
    pub const fn start_end(start: SourcePosition, end: SourcePosition, item: T) -> Self {
        Self { item, start, end }
    }

    /// Modify the contents of the spanned item.
    pub fn map<O, F: FnOnce(T) -> O>(self, f: F) -> Spanning<O> {
        Spanning {
            item: f(self.item),
            start: self.start,
            end: self.end,
        }
    }
}
