//! Scoped variable store.
//!
//! Every entry is keyed by `(name, level)` where `level` is the scope depth
//! the variable was declared at. Lookup always resolves to the highest level
//! holding the name, so correctness depends on every scope exit deleting its
//! entries before the level number is reused.

use std::collections::BTreeMap;

use brewin_common::{InterpError, Value};
use thiserror::Error;

/// Failures of store operations, converted to [`InterpError::Name`] by the
/// engine once the offending line is known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("variable '{name}' already declared at level {level}")]
    AlreadyDeclared { name: String, level: usize },

    #[error("variable '{name}' is not declared")]
    Undeclared { name: String },
}

impl EnvError {
    /// Attach the line index of the statement that triggered the error.
    pub fn at(self, line: usize) -> InterpError {
        InterpError::name(line, self.to_string())
    }
}

/// One call frame's variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    entries: BTreeMap<(String, usize), Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` at `level`. The key must not already be present.
    pub fn declare(&mut self, name: &str, value: Value, level: usize) -> Result<(), EnvError> {
        let key = (name.to_string(), level);
        if self.entries.contains_key(&key) {
            return Err(EnvError::AlreadyDeclared {
                name: name.to_string(),
                level,
            });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Declare `name` at `level`, replacing any entry with the same key.
    /// Used for result slots, which every call re-declares.
    pub fn overwrite(&mut self, name: &str, value: Value, level: usize) {
        self.entries.insert((name.to_string(), level), value);
    }

    /// The value at the highest level holding `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.highest(name).map(|(_, value)| value)
    }

    /// Returns true if `name` is declared at exactly `level`.
    pub fn contains_at(&self, name: &str, level: usize) -> bool {
        self.entries.contains_key(&(name.to_string(), level))
    }

    /// Overwrite the entry at the highest level holding `name`.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), EnvError> {
        let level = self
            .highest(name)
            .map(|(level, _)| level)
            .ok_or_else(|| EnvError::Undeclared {
                name: name.to_string(),
            })?;
        self.entries.insert((name.to_string(), level), value);
        Ok(())
    }

    /// Remove every entry whose level is `level` or deeper.
    pub fn delete_at_or_above(&mut self, level: usize) {
        self.entries.retain(|(_, entry_level), _| *entry_level < level);
    }

    /// Number of live entries across all levels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn highest(&self, name: &str) -> Option<(usize, &Value)> {
        let lo = (name.to_string(), 0);
        let hi = (name.to_string(), usize::MAX);
        self.entries
            .range(lo..=hi)
            .next_back()
            .map(|((_, level), value)| (*level, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_then_get() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(5), 1).unwrap();
        assert_eq!(env.get("x"), Some(&Value::Int(5)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn duplicate_at_same_level_is_rejected() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(1), 2).unwrap();
        assert_eq!(
            env.declare("x", Value::Int(2), 2),
            Err(EnvError::AlreadyDeclared {
                name: "x".to_string(),
                level: 2
            })
        );
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn deeper_level_shadows() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(1), 1).unwrap();
        env.declare("x", Value::Str("inner".to_string()), 3).unwrap();
        assert_eq!(env.get("x"), Some(&Value::Str("inner".to_string())));
        assert!(env.contains_at("x", 1));
        assert!(!env.contains_at("x", 2));
    }

    #[test]
    fn set_targets_highest_level() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(1), 1).unwrap();
        env.declare("x", Value::Int(2), 2).unwrap();
        env.set("x", Value::Int(20)).unwrap();
        env.delete_at_or_above(2);
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn set_undeclared_fails() {
        let mut env = Environment::new();
        assert_eq!(
            env.set("nope", Value::Bool(true)),
            Err(EnvError::Undeclared {
                name: "nope".to_string()
            })
        );
    }

    #[test]
    fn delete_at_or_above_keeps_shallower_entries() {
        let mut env = Environment::new();
        env.declare("a", Value::Int(1), 1).unwrap();
        env.declare("b", Value::Int(2), 2).unwrap();
        env.declare("c", Value::Int(3), 3).unwrap();
        env.delete_at_or_above(2);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("a"), Some(&Value::Int(1)));
        assert_eq!(env.get("b"), None);
        assert_eq!(env.get("c"), None);
    }

    #[test]
    fn names_sharing_a_prefix_do_not_collide() {
        let mut env = Environment::new();
        env.declare("x", Value::Int(1), 1).unwrap();
        env.declare("xx", Value::Int(2), 5).unwrap();
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
        assert_eq!(env.get("xx"), Some(&Value::Int(2)));
    }

    #[test]
    fn overwrite_replaces_existing_key() {
        let mut env = Environment::new();
        env.overwrite("resulti", Value::Int(1), 1);
        env.overwrite("resulti", Value::Int(2), 1);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("resulti"), Some(&Value::Int(2)));
    }

    #[test]
    fn error_converts_to_name_error() {
        let err = EnvError::Undeclared {
            name: "z".to_string(),
        }
        .at(7);
        assert_eq!(err, InterpError::name(7, "variable 'z' is not declared"));
    }
}
