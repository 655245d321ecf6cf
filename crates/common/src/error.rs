//! Errors raised while loading or executing a Brewin program.
//!
//! Every error is fatal: the interpreter stops at the first one and hands it
//! back to the driver. Each variant carries the zero-based line index of the
//! statement being executed.

use std::fmt;
use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpError {
    /// Unknown or duplicate identifier, unresolved function.
    #[error("NAME_ERROR at line {line}: {message}")]
    Name { line: usize, message: String },

    /// Mismatched or unsupported operand, parameter or return types.
    #[error("TYPE_ERROR at line {line}: {message}")]
    Type { line: usize, message: String },

    /// Malformed statement, unmatched block marker or malformed expression.
    #[error("SYNTAX_ERROR at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Statement keyword the engine does not dispatch.
    #[error("internal error at line {line}: {message}")]
    Internal { line: usize, message: String },

    /// Integer division or modulo by zero.
    #[error("division by zero at line {line}")]
    DivisionByZero { line: usize },

    /// Call stack grew past the configured limit.
    #[error("call depth exceeded limit {limit} at line {line}")]
    CallDepthExceeded { line: usize, limit: usize },
}

/// Classification of an [`InterpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NameError,
    TypeError,
    SyntaxError,
    /// Faults outside the language's error taxonomy.
    Fault,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::NameError => "NAME_ERROR",
            ErrorKind::TypeError => "TYPE_ERROR",
            ErrorKind::SyntaxError => "SYNTAX_ERROR",
            ErrorKind::Fault => "FAULT",
        })
    }
}

impl InterpError {
    pub fn name(line: usize, message: impl Into<String>) -> Self {
        InterpError::Name {
            line,
            message: message.into(),
        }
    }

    pub fn ty(line: usize, message: impl Into<String>) -> Self {
        InterpError::Type {
            line,
            message: message.into(),
        }
    }

    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        InterpError::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpError::Name { .. } => ErrorKind::NameError,
            InterpError::Type { .. } => ErrorKind::TypeError,
            InterpError::Syntax { .. } => ErrorKind::SyntaxError,
            InterpError::Internal { .. }
            | InterpError::DivisionByZero { .. }
            | InterpError::CallDepthExceeded { .. } => ErrorKind::Fault,
        }
    }

    /// Line index the error was raised at.
    pub fn line(&self) -> usize {
        match self {
            InterpError::Name { line, .. }
            | InterpError::Type { line, .. }
            | InterpError::Syntax { line, .. }
            | InterpError::Internal { line, .. }
            | InterpError::DivisionByZero { line }
            | InterpError::CallDepthExceeded { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_error() {
        assert_eq!(
            InterpError::name(3, "unknown variable x").to_string(),
            "NAME_ERROR at line 3: unknown variable x"
        );
    }

    #[test]
    fn display_type_error() {
        assert_eq!(
            InterpError::ty(0, "mismatched operands").to_string(),
            "TYPE_ERROR at line 0: mismatched operands"
        );
    }

    #[test]
    fn display_division_by_zero() {
        assert_eq!(
            InterpError::DivisionByZero { line: 9 }.to_string(),
            "division by zero at line 9"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(InterpError::name(0, "").kind(), ErrorKind::NameError);
        assert_eq!(InterpError::ty(0, "").kind(), ErrorKind::TypeError);
        assert_eq!(InterpError::syntax(0, "").kind(), ErrorKind::SyntaxError);
        assert_eq!(
            InterpError::CallDepthExceeded { line: 0, limit: 1 }.kind(),
            ErrorKind::Fault
        );
        assert_eq!(ErrorKind::SyntaxError.to_string(), "SYNTAX_ERROR");
    }

    #[test]
    fn line_accessor() {
        assert_eq!(InterpError::syntax(12, "missing endif").line(), 12);
        assert_eq!(InterpError::DivisionByZero { line: 4 }.line(), 4);
    }
}
