//! Main execution loop and statement dispatch.

use brewin_common::keyword::{INPUT, PRINT, STRTOINT};
use brewin_common::{InterpError, Keyword, Type, Value};
use tracing::{debug, trace};

use crate::expr;
use crate::functions::{PassMode, ReturnSpec};
use crate::machine::{CallFrame, Frame, Interpreter, WriteBack, BASE_LEVEL};
use crate::scope::BlockKind;

impl<'a> Interpreter<'a> {
    /// Execute the program from the entry function until it ends or an
    /// error aborts the run.
    #[tracing::instrument(level = "debug", skip_all, fields(entry = %self.config.entry_function))]
    pub fn run(&mut self) -> Result<(), InterpError> {
        self.functions = crate::functions::FunctionTable::build(self.program)?;
        self.ip = self.entry_point()?;
        self.frame = Frame::new(BASE_LEVEL);
        self.call_stack.clear();
        self.terminated = false;

        while !self.terminated {
            self.step()?;
        }
        Ok(())
    }

    /// Execute the statement at `self.ip`.
    fn step(&mut self) -> Result<(), InterpError> {
        let program = self.program;
        let line = program.line(self.ip).ok_or_else(|| {
            InterpError::syntax(self.ip, "unexpected end of program, missing endfunc")
        })?;
        let Some((head, args)) = line.tokens.split_first() else {
            self.ip += 1;
            return Ok(());
        };

        trace!(ip = self.ip, level = self.frame.level(), statement = %head, "step");

        match Keyword::parse(head) {
            Some(Keyword::Var) => self.exec_var(args),
            Some(Keyword::Assign) => self.exec_assign(args),
            Some(Keyword::FuncCall) => self.exec_funccall(args),
            Some(Keyword::EndFunc) => self.exec_endfunc(),
            Some(Keyword::If) => self.exec_if(args),
            Some(Keyword::Else) => self.exec_else(),
            Some(Keyword::EndIf) => self.exec_endif(),
            Some(Keyword::Return) => self.exec_return(args),
            Some(Keyword::While) => self.exec_while(args),
            Some(Keyword::EndWhile) => self.exec_endwhile(),
            Some(Keyword::Func) | None => Err(InterpError::Internal {
                line: self.ip,
                message: format!("unknown command '{head}'"),
            }),
        }
    }

    // ---- Variables ----

    fn exec_var(&mut self, args: &[String]) -> Result<(), InterpError> {
        let (type_name, names) = args
            .split_first()
            .ok_or_else(|| InterpError::syntax(self.ip, "var requires a type"))?;
        let ty = Type::parse(type_name)
            .ok_or_else(|| InterpError::ty(self.ip, format!("unknown type '{type_name}'")))?;

        let level = self.frame.level();
        for name in names {
            if self.frame.env.contains_at(name, level) {
                return Err(InterpError::name(
                    self.ip,
                    format!("duplicate declaration of '{name}'"),
                ));
            }
            self.frame
                .env
                .declare(name, ty.zero_value(), level)
                .map_err(|e| e.at(self.ip))?;
        }

        self.ip += 1;
        Ok(())
    }

    fn exec_assign(&mut self, args: &[String]) -> Result<(), InterpError> {
        let [target, expression @ ..] = args else {
            return Err(InterpError::syntax(self.ip, "invalid assignment statement"));
        };
        if expression.is_empty() {
            return Err(InterpError::syntax(self.ip, "invalid assignment statement"));
        }

        let target_ty = self
            .frame
            .env
            .get(target)
            .map(Value::ty)
            .ok_or_else(|| InterpError::name(self.ip, format!("unknown variable '{target}'")))?;
        let value = expr::evaluate(expression, &self.frame.env, self.ip)?;
        if value.ty() != target_ty {
            return Err(InterpError::ty(
                self.ip,
                format!("cannot assign {} to '{target}' of type {target_ty}", value.ty()),
            ));
        }

        self.frame.env.set(target, value).map_err(|e| e.at(self.ip))?;
        self.ip += 1;
        Ok(())
    }

    // ---- Calls ----

    fn exec_funccall(&mut self, args: &[String]) -> Result<(), InterpError> {
        let (name, call_args) = args
            .split_first()
            .ok_or_else(|| InterpError::syntax(self.ip, "missing function name to call"))?;

        match name.as_str() {
            PRINT => {
                self.builtin_print(call_args)?;
                self.ip += 1;
            }
            INPUT => {
                self.builtin_input(call_args)?;
                self.ip += 1;
            }
            STRTOINT => {
                self.builtin_strtoint(call_args)?;
                self.ip += 1;
            }
            _ => self.call_user(name, call_args)?,
        }
        Ok(())
    }

    fn builtin_print(&mut self, args: &[String]) -> Result<(), InterpError> {
        if args.is_empty() {
            return Err(InterpError::syntax(self.ip, "invalid print call syntax"));
        }
        let mut text = String::new();
        for arg in args {
            let value = expr::resolve_operand(arg, &self.frame.env, self.ip)?;
            text.push_str(&value.to_string());
        }
        self.host.output(&text);
        Ok(())
    }

    fn builtin_input(&mut self, args: &[String]) -> Result<(), InterpError> {
        if !args.is_empty() {
            self.builtin_print(args)?;
        }
        let line = self.host.get_input();
        self.declare_result(Value::Str(line));
        Ok(())
    }

    fn builtin_strtoint(&mut self, args: &[String]) -> Result<(), InterpError> {
        let [arg] = args else {
            return Err(InterpError::syntax(self.ip, "invalid strtoint call syntax"));
        };
        let text = match expr::resolve_operand(arg, &self.frame.env, self.ip)? {
            Value::Str(text) => text,
            other => {
                return Err(InterpError::ty(
                    self.ip,
                    format!("strtoint expects string, got {}", other.ty()),
                ))
            }
        };
        let n = text.trim().parse::<i64>().map_err(|_| {
            InterpError::ty(self.ip, format!("cannot convert \"{text}\" to int"))
        })?;
        self.declare_result(Value::Int(n));
        Ok(())
    }

    /// Bind arguments into a fresh frame and jump to the callee.
    fn call_user(&mut self, name: &str, args: &[String]) -> Result<(), InterpError> {
        let limit = self.config.max_call_depth;
        if self.call_depth() >= limit {
            return Err(InterpError::CallDepthExceeded {
                line: self.ip,
                limit,
            });
        }

        let info = self
            .functions
            .lookup(name)
            .ok_or_else(|| InterpError::name(self.ip, format!("unknown function '{name}'")))?
            .clone();
        if info.params.len() != args.len() {
            return Err(InterpError::name(
                self.ip,
                format!(
                    "'{name}' expects {} argument(s), got {}",
                    info.params.len(),
                    args.len()
                ),
            ));
        }

        let mut bindings = Vec::with_capacity(args.len());
        let mut write_backs = Vec::new();
        for (param, arg) in info.params.iter().zip(args) {
            let value = match param.mode {
                PassMode::Value => expr::resolve_operand(arg, &self.frame.env, self.ip)?,
                PassMode::Reference => {
                    if expr::parse_literal(arg, self.ip)?.is_some() {
                        return Err(InterpError::ty(
                            self.ip,
                            format!(
                                "reference parameter '{}' requires a variable, got {arg}",
                                param.name
                            ),
                        ));
                    }
                    let value = self.frame.env.get(arg).cloned().ok_or_else(|| {
                        InterpError::name(self.ip, format!("unknown variable '{arg}'"))
                    })?;
                    write_backs.push(WriteBack {
                        caller_var: arg.clone(),
                        param: param.name.clone(),
                    });
                    value
                }
            };
            if value.ty() != param.ty {
                return Err(InterpError::ty(
                    self.ip,
                    format!(
                        "argument {arg} of type {} does not match parameter '{}' of type {}",
                        value.ty(),
                        param.name,
                        param.ty
                    ),
                ));
            }
            bindings.push((param.name.as_str(), value));
        }

        let mut callee = Frame::new(self.frame.level() + 1);
        let level = callee.level();
        for (param, value) in bindings {
            callee
                .env
                .declare(param, value, level)
                .map_err(|e| e.at(self.ip))?;
        }

        debug!(function = name, depth = self.call_depth() + 1, "call");
        let caller = std::mem::replace(&mut self.frame, callee);
        self.call_stack.push(CallFrame {
            return_ip: self.ip + 1,
            caller,
            callee: name.to_string(),
            write_backs,
        });
        self.ip = info.entry;
        Ok(())
    }

    /// Tear down the active call: collect reference parameters from the
    /// callee, restore the caller's frame, write the values back, and
    /// resume after the call site.
    ///
    /// Returns `None` when no call is active, i.e. the entry function is
    /// finishing.
    fn finish_call(&mut self) -> Result<Option<ReturnSpec>, InterpError> {
        let Some(call) = self.call_stack.pop() else {
            return Ok(None);
        };
        let line = self.ip;
        let callee = std::mem::replace(&mut self.frame, call.caller);

        for wb in &call.write_backs {
            let value = callee.env.get(&wb.param).cloned().ok_or_else(|| {
                InterpError::name(line, format!("reference parameter '{}' went out of scope", wb.param))
            })?;
            self.frame
                .env
                .set(&wb.caller_var, value)
                .map_err(|e| e.at(line))?;
        }

        let ret = self
            .functions
            .lookup(&call.callee)
            .map(|info| info.ret)
            .ok_or_else(|| InterpError::name(line, format!("unknown function '{}'", call.callee)))?;

        debug!(function = %call.callee, resume = call.return_ip, "return");
        self.ip = call.return_ip;
        Ok(Some(ret))
    }

    fn exec_endfunc(&mut self) -> Result<(), InterpError> {
        match self.finish_call()? {
            None => self.terminated = true,
            // Falling off the end without `return` yields the zero value.
            Some(ReturnSpec::Value(ty)) => self.declare_result(ty.zero_value()),
            Some(ReturnSpec::Void) => {}
        }
        Ok(())
    }

    fn exec_return(&mut self, args: &[String]) -> Result<(), InterpError> {
        let spec = self.current_return_spec()?;
        let value = match (spec, args.is_empty()) {
            (ReturnSpec::Void, true) => None,
            (ReturnSpec::Void, false) => {
                return Err(InterpError::ty(self.ip, "void function cannot return a value"))
            }
            (ReturnSpec::Value(ty), true) => Some(ty.zero_value()),
            (ReturnSpec::Value(ty), false) => {
                let value = expr::evaluate(args, &self.frame.env, self.ip)?;
                if value.ty() != ty {
                    return Err(InterpError::ty(
                        self.ip,
                        format!("expected return of type {ty}, got {}", value.ty()),
                    ));
                }
                Some(value)
            }
        };

        match self.finish_call()? {
            None => self.terminated = true,
            Some(_) => {
                if let Some(value) = value {
                    debug!(slot = spec.slot(), "result");
                    self.declare_result(value);
                }
            }
        }
        Ok(())
    }

    // ---- Control flow ----

    fn eval_condition(&self, args: &[String], statement: &str) -> Result<bool, InterpError> {
        if args.is_empty() {
            return Err(InterpError::syntax(
                self.ip,
                format!("missing {statement} expression"),
            ));
        }
        match expr::evaluate(args, &self.frame.env, self.ip)? {
            Value::Bool(b) => Ok(b),
            other => Err(InterpError::ty(
                self.ip,
                format!("non-boolean {statement} expression of type {}", other.ty()),
            )),
        }
    }

    fn exec_if(&mut self, args: &[String]) -> Result<(), InterpError> {
        if self.eval_condition(args, "if")? {
            self.frame.open_block(BlockKind::If);
            self.ip += 1;
            return Ok(());
        }

        match self.scan_forward(&[Keyword::Else, Keyword::EndIf], false) {
            Some((index, Keyword::Else)) => {
                self.frame.open_block(BlockKind::If);
                self.ip = index + 1;
                Ok(())
            }
            Some((index, _)) => {
                self.ip = index + 1;
                Ok(())
            }
            None => Err(InterpError::syntax(self.ip, "missing endif")),
        }
    }

    /// Reached only by falling out of a taken `if` body.
    fn exec_else(&mut self) -> Result<(), InterpError> {
        let (index, _) = self
            .scan_forward(&[Keyword::EndIf], false)
            .ok_or_else(|| InterpError::syntax(self.ip, "missing endif"))?;
        self.frame.close_block(BlockKind::If, self.ip)?;
        self.ip = index + 1;
        Ok(())
    }

    fn exec_endif(&mut self) -> Result<(), InterpError> {
        self.frame.close_block(BlockKind::If, self.ip)?;
        self.ip += 1;
        Ok(())
    }

    fn exec_while(&mut self, args: &[String]) -> Result<(), InterpError> {
        if self.eval_condition(args, "while")? {
            self.frame.open_block(BlockKind::While);
            self.ip += 1;
            return Ok(());
        }

        let (index, _) = self
            .scan_forward(&[Keyword::EndWhile], true)
            .ok_or_else(|| InterpError::syntax(self.ip, "missing endwhile"))?;
        self.ip = index + 1;
        Ok(())
    }

    fn exec_endwhile(&mut self) -> Result<(), InterpError> {
        let index = self
            .scan_backward(Keyword::While)
            .ok_or_else(|| InterpError::syntax(self.ip, "missing while"))?;
        self.frame.close_block(BlockKind::While, self.ip)?;
        self.ip = index;
        Ok(())
    }
}
