//! Tokenizer for Brewin source lines.

use crate::error::LexError;

/// Number of leading spaces on a raw line.
///
/// Only spaces count; indentation is a block-matching key, not a nesting
/// depth.
pub(crate) fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Tokenize a single line of source text.
///
/// Returns an empty Vec for blank lines and comment-only lines. Comments
/// start with `#` outside a string literal and extend to end of line. A
/// double-quoted string is one token, quotes included, even if it contains
/// spaces.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<String>, LexError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = line.char_indices();

    while let Some((column, c)) = chars.next() {
        match c {
            '#' => break,
            '"' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                current.push('"');
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    current.push(c);
                    if c == '"' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(LexError::UnterminatedString {
                        line: line_num,
                        column,
                    });
                }
                tokens.push(std::mem::take(&mut current));
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}
