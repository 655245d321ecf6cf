//! Function table, built once by scanning every `func` line.

use std::collections::HashMap;

use brewin_common::keyword::{self, Keyword, REF_PREFIX, VOID};
use brewin_common::{InterpError, Program, Type};

/// How an argument is bound to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// The callee gets a copy; the caller never sees changes.
    Value,
    /// The callee gets a copy, and its final value is written back to the
    /// caller's variable after the call returns.
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub mode: PassMode,
}

/// What a function hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnSpec {
    Void,
    Value(Type),
}

impl ReturnSpec {
    /// Name of the result slot the value is delivered in.
    pub fn slot(&self) -> Option<&'static str> {
        match self {
            ReturnSpec::Void => None,
            ReturnSpec::Value(ty) => Some(keyword::result_slot(*ty)),
        }
    }
}

/// Function metadata discovered during the pre-scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    /// Line index of the first statement of the body.
    pub entry: usize,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    pub ret: ReturnSpec,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionInfo>,
}

impl FunctionTable {
    /// Scan `program` for function definitions.
    ///
    /// A later definition of the same name replaces an earlier one.
    pub fn build(program: &Program) -> Result<Self, InterpError> {
        let mut functions = HashMap::new();

        for (index, line) in program.lines.iter().enumerate() {
            if line.head().and_then(Keyword::parse) != Some(Keyword::Func) {
                continue;
            }
            let (name, info) = parse_definition(&line.tokens, index)?;
            functions.insert(name, info);
        }

        Ok(Self { functions })
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.get(name)
    }

    /// Number of distinct functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Parse `func <name> <param:type>... <return type>`.
fn parse_definition(tokens: &[String], line: usize) -> Result<(String, FunctionInfo), InterpError> {
    if tokens.len() < 3 {
        return Err(InterpError::syntax(
            line,
            "function definition requires a name and a return type",
        ));
    }
    let name = tokens[1].clone();
    let ret_token = &tokens[tokens.len() - 1];

    let ret = if ret_token == VOID {
        ReturnSpec::Void
    } else {
        let ty = Type::parse(ret_token).ok_or_else(|| {
            InterpError::ty(line, format!("unknown return type '{ret_token}' for '{name}'"))
        })?;
        ReturnSpec::Value(ty)
    };

    let params = tokens[2..tokens.len() - 1]
        .iter()
        .map(|token| parse_param(token, line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((
        name,
        FunctionInfo {
            entry: line + 1,
            params,
            ret,
        },
    ))
}

fn parse_param(token: &str, line: usize) -> Result<Param, InterpError> {
    let (name, type_name) = token
        .split_once(':')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| InterpError::syntax(line, format!("malformed parameter '{token}'")))?;

    let (mode, base) = match type_name.strip_prefix(REF_PREFIX) {
        Some(rest) => (PassMode::Reference, rest),
        None => (PassMode::Value, type_name),
    };
    let ty = Type::parse(base).ok_or_else(|| {
        InterpError::ty(line, format!("unknown parameter type '{type_name}' for '{name}'"))
    })?;

    Ok(Param {
        name: name.to_string(),
        ty,
        mode,
    })
}
