//! Process-backed command runner.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::execute::types::{ExecuteError, Invocation, output_tail};

/// Lines of tool output kept in a failure report.
const FAILURE_TAIL_LINES: usize = 20;

/// Runs external tools. Every nonzero exit is an error; nothing is retried.
pub trait CommandRunner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ExecuteError>>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
  /// Bash used for `win_bash` invocations; `bash` from PATH when unset.
  pub bash_path: Option<String>,
}

impl ProcessRunner {
  pub fn new(bash_path: Option<String>) -> Self {
    Self { bash_path }
  }

  fn command_for(&self, invocation: &Invocation) -> (String, Vec<String>) {
    if invocation.win_bash {
      let bash = self.bash_path.clone().unwrap_or_else(|| "bash".to_string());
      (bash, vec!["-c".to_string(), invocation.command_line()])
    } else {
      (invocation.program.clone(), invocation.args.clone())
    }
  }
}

impl CommandRunner for ProcessRunner {
  async fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError> {
    let cmd = invocation.command_line();
    info!(cmd = %cmd, "executing command");

    let (program, args) = self.command_for(invocation);

    let mut command = Command::new(&program);
    command.args(&args).envs(&invocation.env);
    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    debug!(program = %program, working_dir = ?invocation.cwd, "spawning process");

    let output = command.output().await.map_err(|source| ExecuteError::Spawn {
      program: program.clone(),
      source,
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }

    if !output.status.success() {
      let printed = if stderr.trim().is_empty() { &stdout } else { &stderr };
      let tail = output_tail(printed, FAILURE_TAIL_LINES);
      error!(cmd = %cmd, code = ?output.status.code(), output = %tail, "command failed");
      return Err(ExecuteError::CmdFailed {
        cmd,
        code: output.status.code(),
        output: tail,
      });
    }

    Ok(())
  }
}

/// A working-directory scope for a sequence of commands.
///
/// Commands issued through the scope run inside `dir`. The process-wide
/// current directory is never touched, so leaving the scope (normally or via
/// an error) cannot leave the caller in the wrong directory.
pub struct ScopedDir<'a, R> {
  runner: &'a R,
  dir: PathBuf,
}

impl<'a, R: CommandRunner> ScopedDir<'a, R> {
  pub fn new(runner: &'a R, dir: &Path) -> Self {
    Self {
      runner,
      dir: dir.to_path_buf(),
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub async fn run(&self, invocation: Invocation) -> Result<(), ExecuteError> {
    self.runner.run(&invocation.cwd(&self.dir)).await
  }
}
