use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use sweep_core::{ErrorInfo, ExperimentTuple, SweepError};
use sweep_plan::InvokerSpec;

/// One formatted benchmark command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Tuple the command was built from.
    pub tuple: ExperimentTuple,
    /// Task handed to the launcher, e.g. `run -timedemo 3 10 0.05`.
    pub task_line: String,
    /// Full shell line, e.g. `sbt "run -timedemo 3 10 0.05"`.
    pub shell_line: String,
}

impl Invocation {
    /// Formats the command for `tuple` using the invoker template.
    pub fn new(spec: &InvokerSpec, tuple: ExperimentTuple) -> Self {
        let task_line = format!("{} {}", spec.task, tuple);
        let shell_line = format!("{} \"{}\"", spec.launcher, task_line);
        Self {
            tuple,
            task_line,
            shell_line,
        }
    }
}

/// Executes benchmark invocations.
pub trait ExternalRunner {
    /// Runs one invocation to completion and returns its exit status.
    ///
    /// A process killed by a signal reports `-1`. `Err` means the process
    /// could not be started at all.
    fn run(&mut self, invocation: &Invocation) -> Result<i32, SweepError>;
}

/// Runs invocations through the host shell, blocking until each exits.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    workdir: Option<PathBuf>,
}

impl ShellRunner {
    /// Creates a runner using the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every command from `dir`.
    pub fn with_workdir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

impl ExternalRunner for ShellRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32, SweepError> {
        let mut command = shell_command(&invocation.shell_line);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }
        let status = command.status().map_err(|err| {
            SweepError::Invoke(
                ErrorInfo::new("shell_spawn", "failed to start host shell")
                    .with_tuple(&invocation.tuple)
                    .with_context("command", invocation.shell_line.clone())
                    .with_hint(err.to_string()),
            )
        })?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Prints each shell line instead of running it; always succeeds.
#[derive(Debug, Clone, Default)]
pub struct DryRunner {
    printed: usize,
}

impl DryRunner {
    /// Number of lines printed so far.
    pub fn printed(&self) -> usize {
        self.printed
    }
}

impl ExternalRunner for DryRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32, SweepError> {
        println!("{}", invocation.shell_line);
        self.printed += 1;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sbt_task_line() {
        let tuple = ExperimentTuple::new(4, 20, 0.2585059);
        let invocation = Invocation::new(&InvokerSpec::default(), tuple);
        assert_eq!(invocation.task_line, "run -timedemo 4 20 0.2585059");
        assert_eq!(invocation.shell_line, "sbt \"run -timedemo 4 20 0.2585059\"");
    }
}
