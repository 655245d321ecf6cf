//! Interpreter configuration.

use brewin_common::keyword::MAIN;

/// Default bound on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Function whose body starts the run.
    pub entry_function: String,
    /// Maximum number of simultaneously active user-function calls.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry_function: MAIN.to_string(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl Config {
    pub fn with_entry_function(mut self, name: impl Into<String>) -> Self {
        self.entry_function = name.into();
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
