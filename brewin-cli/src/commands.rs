//! CLI command implementations.

use std::fs;

use brewin_common::{ErrorKind, InterpError, Program};
use brewin_interp::{BufferedHost, Config, FunctionTable, StdHost};

/// Options accepted by `run`.
struct RunOptions {
    source: String,
    input: Option<String>,
    config: Config,
}

fn parse_run_args(args: &[String]) -> Result<RunOptions, i32> {
    let mut source = None;
    let mut input = None;
    let mut config = Config::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--input" => input = Some(flag_value(&mut iter, "--input")?.to_string()),
            "--entry" => config = config.with_entry_function(flag_value(&mut iter, "--entry")?),
            "--max-call-depth" => {
                let raw = flag_value(&mut iter, "--max-call-depth")?;
                let depth = raw.parse::<usize>().map_err(|_| {
                    eprintln!("error: invalid --max-call-depth '{raw}'");
                    1
                })?;
                config = config.with_max_call_depth(depth);
            }
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown option '{flag}'");
                return Err(1);
            }
            path if source.is_none() => source = Some(path.to_string()),
            extra => {
                eprintln!("error: unexpected argument '{extra}'");
                return Err(1);
            }
        }
    }

    let source = source.ok_or_else(|| {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: brewin run <prog.brewin> [--input FILE] [--entry NAME] [--max-call-depth N]");
        1
    })?;

    Ok(RunOptions {
        source,
        input,
        config,
    })
}

fn flag_value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str, i32> {
    iter.next().map(String::as_str).ok_or_else(|| {
        eprintln!("error: {flag} requires a value");
        1
    })
}

/// Execute a program.
pub fn run(args: &[String]) -> Result<(), i32> {
    let options = parse_run_args(args)?;
    let program = read_program(&options.source)?;

    let result = match &options.input {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                eprintln!("error: cannot read '{path}': {e}");
                1
            })?;
            let mut host = BufferedHost::with_inputs(text.lines());
            let result = brewin_interp::run_with_config(&program, &mut host, options.config);
            for line in host.outputs() {
                println!("{line}");
            }
            result
        }
        None => brewin_interp::run_with_config(&program, &mut StdHost, options.config),
    };

    result.map_err(report)
}

/// Check that a program lexes, its function definitions parse, and its
/// entry function exists.
pub fn check(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: check requires an input file");
        eprintln!("Usage: brewin check <prog.brewin>");
        return Err(1);
    }

    let input = &args[0];
    let program = read_program(input)?;
    let functions = FunctionTable::build(&program).map_err(report)?;

    let entry = Config::default().entry_function;
    if functions.lookup(&entry).is_none() {
        return Err(report(InterpError::name(
            0,
            format!("unable to locate {entry} function"),
        )));
    }

    println!("OK: {input} ({} functions)", functions.len());
    Ok(())
}

/// Read and tokenize a source file.
fn read_program(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    brewin_lexer::tokenize(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Print an interpreter error and map it to an exit code.
fn report(err: InterpError) -> i32 {
    eprintln!("error: {err}");
    match err.kind() {
        ErrorKind::NameError | ErrorKind::TypeError | ErrorKind::SyntaxError => 2,
        ErrorKind::Fault => 3,
    }
}
