//! Runtime value representation for the Brewin interpreter.
//!
//! Values are small scalars. Assignment replaces a value wholesale; nothing
//! is ever mutated in place, so cloning is the only sharing mechanism.

use std::fmt;

/// The three value types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Signed 64-bit integer.
    Int,
    /// Text.
    Str,
    /// `True` or `False`.
    Bool,
}

/// All value types, in definition order.
pub const ALL_TYPES: [Type; 3] = [Type::Int, Type::Str, Type::Bool];

impl Type {
    /// Parses a type name as written in `var` statements and signatures.
    pub fn parse(name: &str) -> Option<Type> {
        ALL_TYPES.iter().copied().find(|ty| ty.name() == name)
    }

    /// Source spelling of this type.
    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Str => "string",
            Type::Bool => "bool",
        }
    }

    /// The value a freshly declared variable of this type holds.
    pub fn zero_value(&self) -> Value {
        match self {
            Type::Int => Value::Int(0),
            Type::Str => Value::Str(String::new()),
            Type::Bool => Value::Bool(false),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// Text, stored without surrounding quotes.
    Str(String),
    /// Boolean.
    Bool(bool),
}

impl Value {
    /// Returns the type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Str(_) => Type::Str,
            Value::Bool(_) => Type::Bool,
        }
    }
}

/// Output form used by `print`. Booleans use the language's literal
/// spelling.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types() {
        assert_eq!(Value::Int(42).ty(), Type::Int);
        assert_eq!(Value::Str("hi".to_string()).ty(), Type::Str);
        assert_eq!(Value::Bool(true).ty(), Type::Bool);
    }

    #[test]
    fn type_name_roundtrip() {
        for &ty in &ALL_TYPES {
            assert_eq!(Type::parse(ty.name()), Some(ty));
        }
        assert_eq!(Type::parse("float"), None);
        assert_eq!(Type::parse("refint"), None);
    }

    #[test]
    fn zero_values_match_their_type() {
        for &ty in &ALL_TYPES {
            assert_eq!(ty.zero_value().ty(), ty);
        }
        assert_eq!(Type::Int.zero_value(), Value::Int(0));
        assert_eq!(Type::Str.zero_value(), Value::Str(String::new()));
        assert_eq!(Type::Bool.zero_value(), Value::Bool(false));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Str("a b".to_string()).to_string(), "a b");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
    }

    #[test]
    fn equality_different_types() {
        assert_ne!(Value::Int(0), Value::Bool(false));
        assert_ne!(Value::Str("1".to_string()), Value::Int(1));
    }
}
