//! Interpreter state: instruction pointer, active frame, call stack,
//! function table.

use brewin_common::keyword::result_slot;
use brewin_common::{InterpError, Keyword, Program, Value};
use tracing::debug;

use crate::config::Config;
use crate::environment::Environment;
use crate::functions::{FunctionTable, ReturnSpec};
use crate::host::Host;
use crate::scope::{BlockKind, ScopeStack};

/// Scope level the entry function starts at.
pub const BASE_LEVEL: usize = 1;

/// The variables and open blocks of one function activation.
#[derive(Debug, Clone)]
pub struct Frame {
    pub env: Environment,
    pub scopes: ScopeStack,
}

impl Frame {
    pub fn new(level: usize) -> Self {
        Self {
            env: Environment::new(),
            scopes: ScopeStack::new(level),
        }
    }

    pub fn level(&self) -> usize {
        self.scopes.level()
    }

    pub(crate) fn open_block(&mut self, kind: BlockKind) {
        let level = self.scopes.open(kind);
        debug!(%kind, level, "open block");
    }

    /// Close the innermost block and drop every variable declared in it.
    pub(crate) fn close_block(&mut self, kind: BlockKind, line: usize) -> Result<(), InterpError> {
        let closed = self.scopes.close(kind).map_err(|e| e.at(line))?;
        self.env.delete_at_or_above(closed);
        debug!(%kind, level = self.level(), "close block");
        Ok(())
    }
}

/// A reference parameter whose final value goes back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBack {
    pub caller_var: String,
    pub param: String,
}

/// Saved caller context for one active call.
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// Line to resume at after the call returns.
    pub return_ip: usize,
    /// The caller's frame, restored on return.
    pub caller: Frame,
    pub callee: String,
    pub write_backs: Vec<WriteBack>,
}

/// The Brewin interpreter.
pub struct Interpreter<'a> {
    pub(crate) program: &'a Program,
    pub(crate) host: &'a mut dyn Host,
    pub(crate) config: Config,
    pub(crate) functions: FunctionTable,
    /// Line index of the statement being executed.
    pub(crate) ip: usize,
    /// The active function's frame.
    pub(crate) frame: Frame,
    pub(crate) call_stack: Vec<CallFrame>,
    pub(crate) terminated: bool,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a Program, host: &'a mut dyn Host, config: Config) -> Self {
        Self {
            program,
            host,
            config,
            functions: FunctionTable::default(),
            ip: 0,
            frame: Frame::new(BASE_LEVEL),
            call_stack: Vec::new(),
            terminated: false,
        }
    }

    /// First line of the entry function's body.
    pub(crate) fn entry_point(&self) -> Result<usize, InterpError> {
        let name = &self.config.entry_function;
        self.functions
            .lookup(name)
            .map(|info| info.entry)
            .ok_or_else(|| InterpError::name(self.ip, format!("unable to locate {name} function")))
    }

    /// Return spec of the innermost active function.
    pub(crate) fn current_return_spec(&self) -> Result<ReturnSpec, InterpError> {
        let name = self
            .call_stack
            .last()
            .map_or(self.config.entry_function.as_str(), |call| call.callee.as_str());
        self.functions
            .lookup(name)
            .map(|info| info.ret)
            .ok_or_else(|| InterpError::name(self.ip, format!("unknown function '{name}'")))
    }

    /// Put `value` in its result slot at the current level.
    pub(crate) fn declare_result(&mut self, value: Value) {
        let level = self.frame.level();
        self.frame.env.overwrite(result_slot(value.ty()), value, level);
    }

    /// Find the first line after `self.ip` whose keyword is one of
    /// `targets` at the same indentation. The search never leaves the
    /// current function body. With `stop_on_dedent`, a non-blank line
    /// indented less than the current one also ends the search.
    pub(crate) fn scan_forward(
        &self,
        targets: &[Keyword],
        stop_on_dedent: bool,
    ) -> Option<(usize, Keyword)> {
        let indent = self.program.line(self.ip)?.indent;
        for (index, line) in self.program.lines.iter().enumerate().skip(self.ip + 1) {
            if line.is_blank() {
                continue;
            }
            let kw = line.head().and_then(Keyword::parse);
            if let Some(kw) = kw {
                if line.indent == indent && targets.contains(&kw) {
                    return Some((index, kw));
                }
            }
            if matches!(kw, Some(Keyword::Func | Keyword::EndFunc)) {
                return None;
            }
            if stop_on_dedent && line.indent < indent {
                return None;
            }
        }
        None
    }

    /// Find the closest line before `self.ip` starting with `target` at the
    /// same indentation, stopping at any less-indented non-blank line or
    /// at the enclosing `func` line.
    pub(crate) fn scan_backward(&self, target: Keyword) -> Option<usize> {
        let indent = self.program.line(self.ip)?.indent;
        for index in (0..self.ip).rev() {
            let line = self.program.line(index)?;
            if line.is_blank() {
                continue;
            }
            let kw = line.head().and_then(Keyword::parse);
            if line.indent == indent && kw == Some(target) {
                return Some(index);
            }
            if line.indent < indent || kw == Some(Keyword::Func) {
                return None;
            }
        }
        None
    }

    /// Number of active user-function calls.
    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BufferedHost;
    use brewin_common::Line;

    fn program(lines: &[(usize, &str)]) -> Program {
        Program::new(
            lines
                .iter()
                .map(|(indent, text)| {
                    Line::new(text.split_whitespace().map(str::to_string).collect(), *indent)
                })
                .collect(),
        )
    }

    #[test]
    fn frame_close_block_drops_block_variables() {
        let mut frame = Frame::new(1);
        frame.env.declare("outer", Value::Int(1), 1).unwrap();
        frame.open_block(BlockKind::While);
        frame.env.declare("inner", Value::Int(2), frame.level()).unwrap();
        frame.close_block(BlockKind::While, 0).unwrap();
        assert_eq!(frame.level(), 1);
        assert_eq!(frame.env.get("inner"), None);
        assert_eq!(frame.env.get("outer"), Some(&Value::Int(1)));
    }

    #[test]
    fn scan_forward_matches_same_indent_only() {
        let p = program(&[
            (2, "if True"),
            (4, "if False"),
            (4, "endif"),
            (0, ""),
            (2, "endif"),
        ]);
        let mut host = BufferedHost::new();
        let interp = Interpreter::new(&p, &mut host, Config::default());
        assert_eq!(
            interp.scan_forward(&[Keyword::Else, Keyword::EndIf], false),
            Some((4, Keyword::EndIf))
        );
    }

    #[test]
    fn scan_forward_stops_on_dedent() {
        let p = program(&[(2, "while True"), (0, "assign x 1"), (2, "endwhile")]);
        let mut host = BufferedHost::new();
        let interp = Interpreter::new(&p, &mut host, Config::default());
        assert_eq!(interp.scan_forward(&[Keyword::EndWhile], true), None);
        assert_eq!(
            interp.scan_forward(&[Keyword::EndWhile], false),
            Some((2, Keyword::EndWhile))
        );
    }

    #[test]
    fn scan_forward_stays_inside_function() {
        let p = program(&[
            (2, "if True"),
            (0, "endfunc"),
            (0, "func other void"),
            (2, "endif"),
            (0, "endfunc"),
        ]);
        let mut host = BufferedHost::new();
        let interp = Interpreter::new(&p, &mut host, Config::default());
        assert_eq!(interp.scan_forward(&[Keyword::Else, Keyword::EndIf], false), None);
    }

    #[test]
    fn scan_backward_finds_matching_while() {
        let p = program(&[
            (2, "while True"),
            (4, "while False"),
            (4, "endwhile"),
            (2, "endwhile"),
        ]);
        let mut host = BufferedHost::new();
        let mut interp = Interpreter::new(&p, &mut host, Config::default());
        interp.ip = 3;
        assert_eq!(interp.scan_backward(Keyword::While), Some(0));
        interp.ip = 2;
        assert_eq!(interp.scan_backward(Keyword::While), Some(1));
    }
}
