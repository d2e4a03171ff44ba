//! Test utilities for liquidpkg-lib.
//!
//! Cross-platform command helpers plus a recording [`FakeRunner`] that stands
//! in for real autotools and make.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::execute::{CommandRunner, ExecuteError, Invocation};

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Returns the command and args to echo a message.
#[cfg(unix)]
pub fn echo_msg(msg: &str) -> (&'static str, Vec<String>) {
  ("/bin/echo", vec![msg.to_string()])
}

#[cfg(windows)]
pub fn echo_msg(msg: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), format!("echo {}", msg)])
}

/// Records invocations instead of spawning processes.
///
/// Can be told to fail on a given program, and to create files (relative to
/// the invocation's cwd) when a program runs, mimicking build outputs.
#[derive(Debug, Default)]
pub struct FakeRunner {
  invocations: Mutex<Vec<Invocation>>,
  fail_program: Option<String>,
  outputs: Vec<(String, PathBuf)>,
}

impl FakeRunner {
  pub fn failing_on(mut self, program: &str) -> Self {
    self.fail_program = Some(program.to_string());
    self
  }

  pub fn creating(mut self, program: &str, relative: &str) -> Self {
    self.outputs.push((program.to_string(), PathBuf::from(relative)));
    self
  }

  pub fn invocations(&self) -> Vec<Invocation> {
    self.invocations.lock().unwrap().clone()
  }

  pub fn programs(&self) -> Vec<String> {
    self.invocations().into_iter().map(|inv| inv.program).collect()
  }
}

impl CommandRunner for FakeRunner {
  async fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError> {
    self.invocations.lock().unwrap().push(invocation.clone());

    if self.fail_program.as_deref() == Some(invocation.program.as_str()) {
      return Err(ExecuteError::CmdFailed {
        cmd: invocation.command_line(),
        code: Some(2),
        output: String::new(),
      });
    }

    let cwd = invocation.cwd.clone().unwrap_or_default();
    for (program, relative) in &self.outputs {
      if *program == invocation.program {
        let path = cwd.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"").unwrap();
      }
    }

    Ok(())
  }
}
