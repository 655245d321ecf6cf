//! Brewin lexer — source text to tokenized [`Program`].
//!
//! The lexer is a mechanical split: no keyword recognition, no literal
//! parsing. The interpreter decides what every token means.
//!
//! # Usage
//!
//! ```
//! use brewin_lexer::tokenize;
//!
//! let program = tokenize("func main void\n  funccall print \"hi there\"\nendfunc\n").unwrap();
//! assert_eq!(program.len(), 3);
//! assert_eq!(program.lines[1].indent, 2);
//! assert_eq!(program.lines[1].tokens[2], "\"hi there\"");
//! ```

pub mod error;

mod lexer;

pub use error::LexError;

use brewin_common::{Line, Program};
use lexer::{indentation, tokenize_line};

/// Tokenize source text into a program, one [`Line`] per source line.
///
/// Blank lines are kept so that line indices match the source.
pub fn tokenize(text: &str) -> Result<Program, LexError> {
    let mut lines = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let tokens = tokenize_line(raw, idx)?;
        lines.push(Line::new(tokens, indentation(raw)));
    }

    Ok(Program::new(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_minimal() {
        let program = tokenize("func main void\nendfunc\n").unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.lines[0].tokens, vec!["func", "main", "void"]);
        assert_eq!(program.lines[1].head(), Some("endfunc"));
    }

    #[test]
    fn blank_lines_keep_their_index() {
        let text = "\
func main void

  # comment only
  var int x
endfunc
";
        let program = tokenize(text).unwrap();
        assert_eq!(program.len(), 5);
        assert!(program.lines[1].is_blank());
        assert!(program.lines[2].is_blank());
        assert_eq!(program.lines[3].indent, 2);
        assert_eq!(program.lines[3].tokens, vec!["var", "int", "x"]);
    }

    #[test]
    fn error_reports_line_index() {
        let err = tokenize("func main void\n  funccall print \"x\nendfunc\n").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { line: 1, column: 17 });
    }
}
