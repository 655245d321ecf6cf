//! Block nesting within one call frame.
//!
//! Each open `if` or `while` body runs one level deeper than the code around
//! it. The stack records, for every open block, the level it was opened
//! from; closing restores that level. Call frames own their scope stack, so
//! block bookkeeping never mixes with call bookkeeping.

use std::fmt;

use brewin_common::InterpError;
use thiserror::Error;

/// The statement that opened a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    While,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockKind::If => "if",
            BlockKind::While => "while",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("no open {expected} block to close")]
    NoOpenBlock { expected: BlockKind },

    #[error("expected to close {expected} block, found {found} block")]
    Mismatched { expected: BlockKind, found: BlockKind },
}

impl ScopeError {
    /// Unbalanced block markers are syntax errors.
    pub fn at(self, line: usize) -> InterpError {
        InterpError::syntax(line, self.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    kind: BlockKind,
    saved_level: usize,
}

/// Current level plus the stack of open blocks.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    level: usize,
    blocks: Vec<Block>,
}

impl ScopeStack {
    /// A stack with no open blocks, sitting at `base`.
    pub fn new(base: usize) -> Self {
        Self {
            level: base,
            blocks: Vec::new(),
        }
    }

    /// Level new declarations go to.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of open blocks.
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    /// Enter a block. Returns the new level.
    pub fn open(&mut self, kind: BlockKind) -> usize {
        self.blocks.push(Block {
            kind,
            saved_level: self.level,
        });
        self.level += 1;
        self.level
    }

    /// Leave the innermost block, which must be of `kind`. Returns the level
    /// that was closed; the caller deletes everything at or above it.
    pub fn close(&mut self, kind: BlockKind) -> Result<usize, ScopeError> {
        let block = self
            .blocks
            .pop()
            .ok_or(ScopeError::NoOpenBlock { expected: kind })?;
        if block.kind != kind {
            return Err(ScopeError::Mismatched {
                expected: kind,
                found: block.kind,
            });
        }
        let closed = self.level;
        self.level = block.saved_level;
        Ok(closed)
    }
}
