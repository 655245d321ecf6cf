//! Brewin interpreter — executes tokenized Brewin programs line by line.
//!
//! The engine keeps:
//! - A scoped variable store per call frame, keyed by `(name, level)`
//! - A scope stack per frame for open `if`/`while` blocks
//! - A call stack of saved caller frames with reference write-backs
//! - A function table built once from the `func` lines
//!
//! # Usage
//!
//! ```
//! use brewin_common::{Line, Program};
//! use brewin_interp::{run, BufferedHost};
//!
//! let line = |indent: usize, text: &str| {
//!     Line::new(text.split_whitespace().map(str::to_string).collect(), indent)
//! };
//! let program = Program::new(vec![
//!     line(0, "func main void"),
//!     line(2, "var int x"),
//!     line(2, "assign x + 40 2"),
//!     line(2, "funccall print \"x=\" x"),
//!     line(0, "endfunc"),
//! ]);
//!
//! let mut host = BufferedHost::new();
//! run(&program, &mut host).unwrap();
//! assert_eq!(host.outputs(), ["x=42".to_string()]);
//! ```

pub mod config;
pub mod environment;
pub mod execute;
pub mod expr;
pub mod functions;
pub mod host;
pub mod machine;
pub mod scope;

pub use config::Config;
pub use environment::Environment;
pub use functions::{FunctionInfo, FunctionTable};
pub use host::{BufferedHost, Host, StdHost};
pub use machine::Interpreter;

use brewin_common::{InterpError, Program};

/// Execute a program with the default configuration.
///
/// Runs from the first statement of `main` until its `endfunc` (or a
/// `return` in `main`).
///
/// # Errors
///
/// Returns the first [`InterpError`] raised. Errors are never recovered:
/// output emitted before the error stays emitted.
pub fn run(program: &Program, host: &mut dyn Host) -> Result<(), InterpError> {
    run_with_config(program, host, Config::default())
}

/// Execute a program with an explicit configuration.
pub fn run_with_config(
    program: &Program,
    host: &mut dyn Host,
    config: Config,
) -> Result<(), InterpError> {
    let mut interp = Interpreter::new(program, host, config);
    interp.run()
}
