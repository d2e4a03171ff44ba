//! Types for running external tools.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while running an external tool.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The tool ran and exited unsuccessfully. `output` holds the tail of what
  /// it printed, stderr preferred.
  #[error("command failed with {}: {cmd}{}", exit_status(.code), indented(.output))]
  CmdFailed {
    cmd: String,
    code: Option<i32>,
    output: String,
  },

  /// The tool could not be spawned at all.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// An empty command line was configured for a tool.
  #[error("no command configured for {0}")]
  EmptyCommand(String),

  /// A configured command line has an unterminated quote.
  #[error("unterminated quote in command configured for {0}")]
  UnterminatedQuote(String),
}

fn exit_status(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {code}"),
    None => "no exit code (terminated by signal)".to_string(),
  }
}

fn indented(output: &str) -> String {
  output.lines().map(|line| format!("\n  {line}")).collect()
}

/// Last `max_lines` non-empty lines of a tool's output.
pub fn output_tail(output: &str, max_lines: usize) -> String {
  let lines: Vec<&str> = output.lines().filter(|line| !line.trim().is_empty()).collect();
  lines[lines.len().saturating_sub(max_lines)..].join("\n")
}

/// POSIX shell word splitting: whitespace separates words, single quotes are
/// literal, double quotes honor `\"` and `\\`, a bare backslash escapes the
/// next character. Returns `None` on an unterminated quote.
fn split_words(line: &str) -> Option<Vec<String>> {
  let mut words = Vec::new();
  let mut word = String::new();
  let mut in_word = false;
  let mut chars = line.chars();

  while let Some(c) = chars.next() {
    match c {
      c if c.is_whitespace() => {
        if in_word {
          words.push(std::mem::take(&mut word));
          in_word = false;
        }
      }
      '\'' => {
        in_word = true;
        loop {
          match chars.next()? {
            '\'' => break,
            c => word.push(c),
          }
        }
      }
      '"' => {
        in_word = true;
        loop {
          match chars.next()? {
            '"' => break,
            '\\' => match chars.next()? {
              c @ ('"' | '\\') => word.push(c),
              c => {
                word.push('\\');
                word.push(c);
              }
            },
            c => word.push(c),
          }
        }
      }
      '\\' => {
        in_word = true;
        if let Some(c) = chars.next() {
          word.push(c);
        }
      }
      c => {
        in_word = true;
        word.push(c);
      }
    }
  }
  if in_word {
    words.push(word);
  }
  Some(words)
}

/// One external command to run.
///
/// `win_bash` asks the runner to execute the command line through bash, the
/// way autotools scripts must be run on a Windows host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
  pub env: BTreeMap<String, String>,
  pub win_bash: bool,
}

impl Invocation {
  pub fn new(program: &str) -> Self {
    Self {
      program: program.to_string(),
      args: Vec::new(),
      cwd: None,
      env: BTreeMap::new(),
      win_bash: false,
    }
  }

  /// Splits a configured command line such as `aclocal -I "/opt/my tools/m4"`
  /// into program and args, following shell quoting rules.
  pub fn from_command_line(tool: &str, command_line: &str) -> Result<Self, ExecuteError> {
    let words = split_words(command_line).ok_or_else(|| ExecuteError::UnterminatedQuote(tool.to_string()))?;
    let mut words = words.into_iter();
    let program = words.next().ok_or_else(|| ExecuteError::EmptyCommand(tool.to_string()))?;
    Ok(Self::new(&program).args(words))
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
    self.env.insert(key.to_string(), value.into());
    self
  }

  pub fn cwd(mut self, dir: &Path) -> Self {
    self.cwd = Some(dir.to_path_buf());
    self
  }

  pub fn win_bash(mut self, enabled: bool) -> Self {
    self.win_bash = enabled;
    self
  }

  /// The command as a single shell-ready line, quoting args with whitespace.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .map(|part| {
        if part.contains(char::is_whitespace) {
          format!("'{}'", part.replace('\'', r"'\''"))
        } else {
          part.to_string()
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }
}
