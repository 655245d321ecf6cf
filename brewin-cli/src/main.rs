//! Brewin CLI — run and check Brewin programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, read or lex error
//! - 2: NAME_ERROR, TYPE_ERROR or SYNTAX_ERROR
//! - 3: Runtime fault

mod commands;

use std::process;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Install a stderr subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=brewin_interp=trace` to log every executed statement.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_usage() {
    eprintln!("Usage: brewin <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog.brewin> [options]   Execute a program");
    eprintln!("  check <prog.brewin>           Check function definitions and entry point");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --input <file>                Read program input lines from a file");
    eprintln!("  --entry <name>                Entry function (default: main)");
    eprintln!("  --max-call-depth <n>          Limit on nested calls (default: 10000)");
}
