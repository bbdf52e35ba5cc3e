//! External formatter process (Prettier by default)
//!
//!     The generated source is written to the program's stdin and the formatted result read
//!     from stdout. A non-zero exit, empty output or non UTF-8 output are all failures; the
//!     caller keeps the unformatted text in every one of those cases.

use super::SourceFormatter;
use crate::error::FormatError;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub const DEFAULT_COMMAND: &str = "prettier";

/// `--stdin-filepath` picks the parser from the extension.
pub const DEFAULT_ARGS: &[&str] = &["--stdin-filepath", "Component.jsx"];

/// Runs a formatter command that reads source on stdin and writes it to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFormatter {
    command: String,
    args: Vec<String>,
}

impl ProcessFormatter {
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProcessFormatter {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `prettier --stdin-filepath Component.jsx`
    pub fn prettier() -> Self {
        Self::new(DEFAULT_COMMAND, DEFAULT_ARGS.iter().copied())
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Resolve the command on `PATH` (or as given, when it is a path).
    pub fn locate(&self) -> Result<PathBuf, FormatError> {
        which::which(&self.command)
            .map_err(|err| FormatError::Unavailable(format!("{}: {err}", self.command)))
    }
}

impl Default for ProcessFormatter {
    fn default() -> Self {
        Self::prettier()
    }
}

impl SourceFormatter for ProcessFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let program = self.locate()?;
        log::debug!("format: running {} {:?}", program.display(), self.args);

        let mut child = Command::new(&program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from a separate thread so a large output cannot block on a full pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = source.to_string();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });
        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            match writer.join() {
                Ok(result) => result?,
                Err(_) => {
                    return Err(FormatError::InvalidOutput(
                        "stdin writer panicked".to_string(),
                    ))
                }
            }
        }

        if !output.status.success() {
            return Err(FormatError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let formatted = String::from_utf8(output.stdout)
            .map_err(|err| FormatError::InvalidOutput(err.to_string()))?;
        if formatted.trim().is_empty() {
            return Err(FormatError::EmptyOutput);
        }
        Ok(formatted)
    }
}
