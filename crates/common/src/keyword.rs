//! Reserved words of the Brewin language.
//!
//! Statement keywords always appear as the first token of a line. The
//! remaining constants name builtin functions, boolean literals and the
//! per-type result slots used to pass return values back to a caller.

use crate::value::Type;

/// The leading token of an executable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `func <name> <params>... <return type>`
    Func,
    /// `endfunc`
    EndFunc,
    /// `var <type> <name>...`
    Var,
    /// `assign <name> <expr>...`
    Assign,
    /// `funccall <name> <args>...`
    FuncCall,
    /// `if <expr>...`
    If,
    /// `else`
    Else,
    /// `endif`
    EndIf,
    /// `while <expr>...`
    While,
    /// `endwhile`
    EndWhile,
    /// `return [<expr>...]`
    Return,
}

/// All statement keywords, in definition order.
pub const ALL_KEYWORDS: [Keyword; 11] = [
    Keyword::Func,
    Keyword::EndFunc,
    Keyword::Var,
    Keyword::Assign,
    Keyword::FuncCall,
    Keyword::If,
    Keyword::Else,
    Keyword::EndIf,
    Keyword::While,
    Keyword::EndWhile,
    Keyword::Return,
];

/// Builtin that prints its arguments.
pub const PRINT: &str = "print";
/// Builtin that reads one line of input into `results`.
pub const INPUT: &str = "input";
/// Builtin that parses a string into `resulti`.
pub const STRTOINT: &str = "strtoint";

/// Boolean literal `True`.
pub const TRUE: &str = "True";
/// Boolean literal `False`.
pub const FALSE: &str = "False";

/// Default entry function.
pub const MAIN: &str = "main";

/// Return type of a function that produces no result.
pub const VOID: &str = "void";

/// Prefix marking a reference parameter type, e.g. `refint`.
pub const REF_PREFIX: &str = "ref";

impl Keyword {
    /// Parses a leading token. Returns `None` for anything that is not a
    /// statement keyword.
    pub fn parse(token: &str) -> Option<Keyword> {
        ALL_KEYWORDS.iter().copied().find(|kw| kw.as_str() == token)
    }

    /// Source spelling of this keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Func => "func",
            Keyword::EndFunc => "endfunc",
            Keyword::Var => "var",
            Keyword::Assign => "assign",
            Keyword::FuncCall => "funccall",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::EndIf => "endif",
            Keyword::While => "while",
            Keyword::EndWhile => "endwhile",
            Keyword::Return => "return",
        }
    }
}

/// Name of the reserved slot that carries a result of type `ty`.
pub fn result_slot(ty: Type) -> &'static str {
    match ty {
        Type::Int => "resulti",
        Type::Str => "results",
        Type::Bool => "resultb",
    }
}
