//! External tool invocation.
//!
//! A [`ToolInvocation`] is a program plus an explicit argument vector. It is
//! executed directly (no shell), so paths with spaces or metacharacters reach
//! the tool untouched. The command line is echoed before it runs and the
//! call blocks until the tool exits; output is not captured.

use crate::error::StepError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::process::Command;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolInvocation {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolInvocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append a group of arguments (a flag list, a list of objects) in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program().to_string_lossy().into_owned()
    }

    /// Build the process command with the toolchain directory on `PATH`.
    pub fn to_command(&self, toolchain_dir: &Path) -> Result<Command, StepError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        crate::util::tools_env::apply_to_command(&mut cmd, toolchain_dir).map_err(|e| {
            StepError::Spawn {
                program: self.program_name(),
                source: std::io::Error::other(e.to_string()),
            }
        })?;
        Ok(cmd)
    }

    /// Echo the command line, run it, and wait for it to finish.
    pub fn run(&self, toolchain_dir: &Path) -> Result<(), StepError> {
        println!("Running: {self}");
        let status = self
            .to_command(toolchain_dir)?
            .status()
            .map_err(|source| StepError::Spawn {
                program: self.program_name(),
                source,
            })?;
        if !status.success() {
            return Err(StepError::Failed {
                program: self.program_name(),
                status,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(self.program()))?;
        for arg in self.get_args() {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Shell-style quoting for the echoed command line only.
fn quote(word: &OsStr) -> String {
    let word = word.to_string_lossy();
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        word.into_owned()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
