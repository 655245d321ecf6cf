//! Program representation: tokenized source lines.
//!
//! The interpreter never sees raw text. Each line carries its tokens and its
//! indentation, which serves only as the key that pairs `if`/`else`/`endif`
//! and `while`/`endwhile` markers.

/// One source line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Whitespace-separated tokens; string literals keep their quotes.
    pub tokens: Vec<String>,
    /// Number of leading spaces in the raw line.
    pub indent: usize,
}

impl Line {
    /// Create a line from tokens and indentation.
    pub fn new(tokens: Vec<String>, indent: usize) -> Self {
        Self { tokens, indent }
    }

    /// Returns true for blank and comment-only lines.
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The leading token, if any.
    pub fn head(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }
}

/// A Brewin program: a sequence of lines, indexed from zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The line stream.
    pub lines: Vec<Line>,
}

impl Program {
    /// Create a new program from lines.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// The line at `index`, if present.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of lines in the program.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the program has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
