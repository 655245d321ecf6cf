//! Prefix-notation expression evaluation.
//!
//! `+ 5 * 6 x` is evaluated right to left with an operand stack: operands
//! are pushed, and each operator pops its operands (first operand on top)
//! and pushes the result.

use std::fmt;

use brewin_common::keyword::{FALSE, TRUE};
use brewin_common::{InterpError, Type, Value};

use crate::environment::Environment;

/// Logical negation.
pub const NOT: &str = "!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn parse(token: &str) -> Option<BinaryOp> {
        match token {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "%" => Some(BinaryOp::Mod),
            "==" => Some(BinaryOp::Eq),
            "!=" => Some(BinaryOp::Ne),
            "<" => Some(BinaryOp::Lt),
            "<=" => Some(BinaryOp::Le),
            ">" => Some(BinaryOp::Gt),
            ">=" => Some(BinaryOp::Ge),
            "&" => Some(BinaryOp::And),
            "|" => Some(BinaryOp::Or),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluate a prefix expression to exactly one value.
pub fn evaluate(tokens: &[String], env: &Environment, line: usize) -> Result<Value, InterpError> {
    let mut stack: Vec<Value> = Vec::with_capacity(tokens.len());

    for token in tokens.iter().rev() {
        if let Some(op) = BinaryOp::parse(token) {
            let lhs = pop(&mut stack, token, line)?;
            let rhs = pop(&mut stack, token, line)?;
            stack.push(apply(op, lhs, rhs, line)?);
        } else if token == NOT {
            match pop(&mut stack, token, line)? {
                Value::Bool(b) => stack.push(Value::Bool(!b)),
                other => {
                    return Err(InterpError::ty(
                        line,
                        format!("'!' expects bool, got {}", other.ty()),
                    ))
                }
            }
        } else {
            stack.push(resolve_operand(token, env, line)?);
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => Err(InterpError::syntax(line, "invalid expression")),
    }
}

/// Resolve a single operand token: a literal or a variable.
pub fn resolve_operand(token: &str, env: &Environment, line: usize) -> Result<Value, InterpError> {
    if let Some(value) = parse_literal(token, line)? {
        return Ok(value);
    }
    env.get(token)
        .cloned()
        .ok_or_else(|| InterpError::name(line, format!("unknown variable '{token}'")))
}

/// Parse `token` as a literal. Returns `Ok(None)` for anything that should
/// be looked up as a variable.
pub fn parse_literal(token: &str, line: usize) -> Result<Option<Value>, InterpError> {
    if token.is_empty() {
        return Err(InterpError::name(line, "empty token"));
    }
    if token.starts_with('"') {
        return Ok(Some(Value::Str(token.trim_matches('"').to_string())));
    }
    if token.starts_with('-') || token.bytes().all(|b| b.is_ascii_digit()) {
        return token
            .parse::<i64>()
            .map(|n| Some(Value::Int(n)))
            .map_err(|_| InterpError::syntax(line, format!("malformed integer literal '{token}'")));
    }
    Ok(match token {
        TRUE => Some(Value::Bool(true)),
        FALSE => Some(Value::Bool(false)),
        _ => None,
    })
}

/// Apply a binary operator. Both operands must have the same type and the
/// operator must be defined for it.
pub fn apply(op: BinaryOp, lhs: Value, rhs: Value, line: usize) -> Result<Value, InterpError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => int_op(op, a, b, line),
        (Value::Str(a), Value::Str(b)) => str_op(op, a, b, line),
        (Value::Bool(a), Value::Bool(b)) => bool_op(op, a, b, line),
        (a, b) => Err(InterpError::ty(
            line,
            format!("mismatched types {} and {} for '{op}'", a.ty(), b.ty()),
        )),
    }
}

fn int_op(op: BinaryOp, a: i64, b: i64, line: usize) -> Result<Value, InterpError> {
    Ok(match op {
        BinaryOp::Add => Value::Int(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(InterpError::DivisionByZero { line });
            }
            Value::Int(floor_div(a, b))
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(InterpError::DivisionByZero { line });
            }
            Value::Int(floor_mod(a, b))
        }
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::Le => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::Ge => Value::Bool(a >= b),
        BinaryOp::And | BinaryOp::Or => return Err(unsupported(op, Type::Int, line)),
    })
}

fn str_op(op: BinaryOp, a: String, b: String, line: usize) -> Result<Value, InterpError> {
    Ok(match op {
        BinaryOp::Add => Value::Str(a + &b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::Le => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::Ge => Value::Bool(a >= b),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::And | BinaryOp::Or => {
            return Err(unsupported(op, Type::Str, line))
        }
    })
}

fn bool_op(op: BinaryOp, a: bool, b: bool, line: usize) -> Result<Value, InterpError> {
    Ok(match op {
        BinaryOp::And => Value::Bool(a && b),
        BinaryOp::Or => Value::Bool(a || b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod
        | BinaryOp::Lt
        | BinaryOp::Le
        | BinaryOp::Gt
        | BinaryOp::Ge => return Err(unsupported(op, Type::Bool, line)),
    })
}

fn unsupported(op: BinaryOp, ty: Type, line: usize) -> InterpError {
    InterpError::ty(line, format!("operator '{op}' is not defined for {ty}"))
}

fn pop(stack: &mut Vec<Value>, token: &str, line: usize) -> Result<Value, InterpError> {
    stack
        .pop()
        .ok_or_else(|| InterpError::syntax(line, format!("missing operand for '{token}'")))
}

/// Quotient rounded toward negative infinity.
pub(crate) fn floor_div(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        q.wrapping_sub(1)
    } else {
        q
    }
}

/// Remainder with the sign of the divisor.
pub(crate) fn floor_mod(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        r + b
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(expr: &str) -> Vec<String> {
        expr.split_whitespace().map(str::to_string).collect()
    }

    fn eval(expr: &str) -> Result<Value, InterpError> {
        evaluate(&toks(expr), &Environment::new(), 0)
    }

    #[test]
    fn equality_of_ints() {
        assert_eq!(eval("== 5 5"), Ok(Value::Bool(true)));
    }

    #[test]
    fn addition() {
        assert_eq!(eval("+ 1 2"), Ok(Value::Int(3)));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(eval("+ \"a\" \"b\""), Ok(Value::Str("ab".to_string())));
    }

    #[test]
    fn mixed_types_are_rejected() {
        assert!(matches!(eval("+ 1 \"a\""), Err(InterpError::Type { .. })));
    }

    #[test]
    fn nested_prefix() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(4), 1).unwrap();
        assert_eq!(evaluate(&toks("+ 5 * 6 x"), &env, 0), Ok(Value::Int(29)));
    }

    #[test]
    fn operand_order() {
        assert_eq!(eval("- 10 3"), Ok(Value::Int(7)));
        assert_eq!(eval("< 1 2"), Ok(Value::Bool(true)));
        assert_eq!(eval("/ 7 2"), Ok(Value::Int(3)));
    }

    #[test]
    fn division_floors() {
        assert_eq!(eval("/ -7 2"), Ok(Value::Int(-4)));
        assert_eq!(eval("/ 7 -2"), Ok(Value::Int(-4)));
        assert_eq!(eval("/ -7 -2"), Ok(Value::Int(3)));
    }

    #[test]
    fn modulo_takes_divisor_sign() {
        assert_eq!(eval("% -7 3"), Ok(Value::Int(2)));
        assert_eq!(eval("% 7 -3"), Ok(Value::Int(-2)));
        assert_eq!(eval("% 7 3"), Ok(Value::Int(1)));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval("/ 1 0"), Err(InterpError::DivisionByZero { line: 0 }));
        assert_eq!(eval("% 1 0"), Err(InterpError::DivisionByZero { line: 0 }));
    }

    #[test]
    fn string_ordering() {
        assert_eq!(eval("< \"abc\" \"abd\""), Ok(Value::Bool(true)));
        assert_eq!(eval(">= \"b\" \"a\""), Ok(Value::Bool(true)));
    }

    #[test]
    fn string_subtraction_is_undefined() {
        assert!(matches!(eval("- \"a\" \"b\""), Err(InterpError::Type { .. })));
    }

    #[test]
    fn boolean_operators() {
        assert_eq!(eval("& True False"), Ok(Value::Bool(false)));
        assert_eq!(eval("| True False"), Ok(Value::Bool(true)));
        assert_eq!(eval("! & True False"), Ok(Value::Bool(true)));
        assert_eq!(eval("!= True False"), Ok(Value::Bool(true)));
    }

    #[test]
    fn boolean_ordering_is_undefined() {
        assert!(matches!(eval("< True False"), Err(InterpError::Type { .. })));
    }

    #[test]
    fn int_logic_is_undefined() {
        assert!(matches!(eval("& 1 0"), Err(InterpError::Type { .. })));
    }

    #[test]
    fn negation_requires_bool() {
        assert!(matches!(eval("! 1"), Err(InterpError::Type { .. })));
    }

    #[test]
    fn leftover_operands_are_syntax_errors() {
        assert!(matches!(eval("1 2"), Err(InterpError::Syntax { .. })));
        assert!(matches!(eval(""), Err(InterpError::Syntax { .. })));
        assert!(matches!(eval("+ 1"), Err(InterpError::Syntax { .. })));
    }

    #[test]
    fn unknown_variable() {
        assert!(matches!(eval("+ 1 y"), Err(InterpError::Name { .. })));
    }

    #[test]
    fn literals() {
        assert_eq!(parse_literal("-12", 0), Ok(Some(Value::Int(-12))));
        assert_eq!(parse_literal("007", 0), Ok(Some(Value::Int(7))));
        assert_eq!(parse_literal("\"\"", 0), Ok(Some(Value::Str(String::new()))));
        assert_eq!(parse_literal("True", 0), Ok(Some(Value::Bool(true))));
        assert_eq!(parse_literal("true", 0), Ok(None));
        assert_eq!(parse_literal("count", 0), Ok(None));
        assert!(matches!(parse_literal("-x", 0), Err(InterpError::Syntax { .. })));
    }

    #[test]
    fn wrapping_arithmetic() {
        assert_eq!(
            apply(BinaryOp::Add, Value::Int(i64::MAX), Value::Int(1), 0),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            apply(BinaryOp::Div, Value::Int(i64::MIN), Value::Int(-1), 0),
            Ok(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn op_symbol_roundtrip() {
        for sym in ["+", "-", "*", "/", "%", "==", "!=", "<", "<=", ">", ">=", "&", "|"] {
            assert_eq!(BinaryOp::parse(sym).map(|op| op.symbol()), Some(sym));
        }
        assert_eq!(BinaryOp::parse(NOT), None);
    }
}
