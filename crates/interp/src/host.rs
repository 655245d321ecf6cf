//! Host collaborators: where `print` output goes and where `input` reads
//! from.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// I/O provided to a running program.
pub trait Host {
    /// Emit one line of output.
    fn output(&mut self, text: &str);

    /// Read one line of input, without its line terminator. Returns an
    /// empty string once input is exhausted.
    fn get_input(&mut self) -> String;
}

/// Host backed by the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn output(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{text}").and_then(|()| stdout.flush()) {
            tracing::warn!(error = %e, "failed to write program output");
        }
    }

    fn get_input(&mut self) -> String {
        let mut line = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut line) {
            tracing::warn!(error = %e, "failed to read program input");
            return String::new();
        }
        trim_line_ending(&mut line);
        line
    }
}

/// Host with scripted input lines and captured output, for tests and
/// embedding.
#[derive(Debug, Default, Clone)]
pub struct BufferedHost {
    inputs: VecDeque<String>,
    outputs: Vec<String>,
}

impl BufferedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that answers `input` calls with `lines`, in order.
    pub fn with_inputs<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(Into::into).collect(),
            outputs: Vec::new(),
        }
    }

    /// Every line emitted so far.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn into_outputs(self) -> Vec<String> {
        self.outputs
    }
}

impl Host for BufferedHost {
    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn get_input(&mut self) -> String {
        self.inputs.pop_front().unwrap_or_default()
    }
}

fn trim_line_ending(line: &mut String) {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
}
