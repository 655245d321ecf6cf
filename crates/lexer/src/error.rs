//! Error types for the Brewin lexer.

use thiserror::Error;

/// Errors produced while splitting source text into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A string literal was opened but not closed before the end of the line.
    #[error("line {line}: unterminated string literal starting at column {column}")]
    UnterminatedString { line: usize, column: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unterminated_string() {
        let e = LexError::UnterminatedString { line: 3, column: 14 };
        assert_eq!(
            e.to_string(),
            "line 3: unterminated string literal starting at column 14"
        );
    }

    #[test]
    fn error_clone_and_eq() {
        let e1 = LexError::UnterminatedString { line: 1, column: 0 };
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }
}
