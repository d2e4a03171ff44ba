//! Driving upstream's autotools build.
//!
//! The build regenerates the bootstrap chain (aclocal, autoconf, autoheader),
//! runs the generated `configure`, then asks make for exactly one target.

mod env;
pub mod flags;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::execute::{CommandRunner, ExecuteError, Invocation, ScopedDir};
use crate::options::OptionSet;
use crate::platform::Platform;
use crate::platform::os::Os;
use crate::settings::Settings;
use crate::target::BuildTarget;

pub use env::ToolchainEnv;
pub use flags::{CompilerFlags, append_flags, compiler_flags};

/// Everything needed to turn a source tree into one built artifact.
#[derive(Debug, Clone)]
pub struct Autotools<'a> {
  settings: &'a Settings,
  options: &'a OptionSet,
  toolchain: &'a ToolchainEnv,
  host: Platform,
  prefix: PathBuf,
  jobs: usize,
}

impl<'a> Autotools<'a> {
  pub fn new(
    settings: &'a Settings,
    options: &'a OptionSet,
    toolchain: &'a ToolchainEnv,
    host: Platform,
    prefix: &Path,
  ) -> Self {
    let jobs = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    Self {
      settings,
      options,
      toolchain,
      host,
      prefix: prefix.to_path_buf(),
      jobs,
    }
  }

  pub fn with_jobs(mut self, jobs: usize) -> Self {
    self.jobs = jobs.max(1);
    self
  }

  /// Shell scripts need bash on a Windows build machine.
  pub fn win_bash(&self) -> bool {
    self.host.os == Os::Windows
  }

  fn is_cross(&self) -> bool {
    self.host != self.settings.platform()
  }

  /// aclocal, autoconf and autoheader, in that order.
  pub fn bootstrap_invocations(&self) -> Result<Vec<Invocation>, ExecuteError> {
    [
      ("ACLOCAL", &self.toolchain.aclocal),
      ("AUTOCONF", &self.toolchain.autoconf),
      ("AUTOHEADER", &self.toolchain.autoheader),
    ]
    .into_iter()
    .map(|(tool, command_line)| Invocation::from_command_line(tool, command_line).map(|inv| inv.win_bash(self.win_bash())))
    .collect()
  }

  pub fn configure_args(&self) -> Vec<String> {
    let mut args = vec![format!("--prefix={}", self.prefix.display())];
    if self.is_cross() {
      args.push(format!("--build={}", self.host.gnu_triple()));
      args.push(format!("--host={}", self.settings.platform().gnu_triple()));
    }
    args
  }

  /// `./configure` with the derived flags.
  ///
  /// `CC` is only pinned for native builds without a user `CC`; a cross build
  /// leaves the choice to configure, which looks for `<host>-gcc`.
  pub fn configure_invocation(&self) -> Invocation {
    let flags = compiler_flags(self.settings, self.options);
    let invocation = Invocation::new("./configure")
      .args(self.configure_args())
      .env("CFLAGS", append_flags(&flags.cflags_string(), self.toolchain.cflags.as_deref()))
      .env("LDFLAGS", append_flags(&flags.ldflags_string(), self.toolchain.ldflags.as_deref()))
      .win_bash(self.win_bash());

    if self.toolchain.cc.is_none() && !self.is_cross() {
      invocation.env("CC", self.settings.compiler.kind.c_driver())
    } else {
      invocation
    }
  }

  pub fn make_invocation(&self, target: BuildTarget) -> Result<Invocation, ExecuteError> {
    Ok(
      Invocation::from_command_line("MAKE", &self.toolchain.make)?
        .arg(target.make_target())
        .arg(format!("-j{}", self.jobs))
        .win_bash(self.win_bash()),
    )
  }

  /// Runs bootstrap, configure and make inside `source_dir`.
  ///
  /// Stops at the first failing tool.
  pub async fn build<R: CommandRunner>(
    &self,
    runner: &R,
    source_dir: &Path,
    target: BuildTarget,
  ) -> Result<(), ExecuteError> {
    let scope = ScopedDir::new(runner, source_dir);
    info!(dir = ?scope.dir(), "regenerating build system");

    for invocation in self.bootstrap_invocations()? {
      scope.run(invocation).await?;
    }

    info!(args = ?self.configure_args(), "configuring");
    scope.run(self.configure_invocation()).await?;

    info!(target = %target, "building");
    scope.run(self.make_invocation(target)?).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::arch::Arch;
  use crate::util::testutil::FakeRunner;

  fn linux() -> Platform {
    Platform::new(Arch::X86_64, Os::Linux)
  }

  #[test]
  fn native_configure_only_sets_prefix() {
    let settings = Settings::new(Os::Linux, Arch::X86_64);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv::default();
    let autotools = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg"));

    assert_eq!(autotools.configure_args(), vec!["--prefix=/pkg"]);
  }

  #[test]
  fn cross_configure_sets_build_and_host() {
    let settings = Settings::new(Os::Linux, Arch::Armv8);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv::default();
    let autotools = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg"));

    assert_eq!(
      autotools.configure_args(),
      vec!["--prefix=/pkg", "--build=x86_64-linux-gnu", "--host=aarch64-linux-gnu"]
    );
  }

  #[test]
  fn configure_exports_compiler_and_flags() {
    let settings = Settings::new(Os::Linux, Arch::X86_64);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv::default();
    let inv = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg")).configure_invocation();

    assert_eq!(inv.env.get("CC").map(String::as_str), Some("gcc"));
    assert_eq!(inv.env.get("CFLAGS").map(String::as_str), Some("-m64 -O3 -DNDEBUG -fPIC"));
    assert!(!inv.win_bash);
  }

  #[test]
  fn cross_configure_leaves_compiler_to_configure() {
    let settings = Settings::new(Os::Linux, Arch::Armv8);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv::default();
    let inv = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg")).configure_invocation();

    assert_eq!(inv.env.get("CC"), None);
    assert!(inv.args.contains(&"--host=aarch64-linux-gnu".to_string()));
    assert_eq!(inv.env.get("CFLAGS").map(String::as_str), Some("-O3 -DNDEBUG -fPIC"));
  }

  #[test]
  fn user_compiler_environment_is_kept() {
    let settings = Settings::new(Os::Linux, Arch::X86_64);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv {
      cc: Some("clang-17".to_string()),
      cflags: Some("-I/opt/fftw/include".to_string()),
      ldflags: Some("-L/opt/fftw/lib".to_string()),
      ..ToolchainEnv::default()
    };
    let inv = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg")).configure_invocation();

    // not set here, so the child inherits the user's CC
    assert_eq!(inv.env.get("CC"), None);
    assert_eq!(
      inv.env.get("CFLAGS").map(String::as_str),
      Some("-m64 -O3 -DNDEBUG -fPIC -I/opt/fftw/include")
    );
    assert_eq!(inv.env.get("LDFLAGS").map(String::as_str), Some("-m64 -L/opt/fftw/lib"));
  }

  #[test]
  fn windows_host_wraps_everything_in_bash() {
    let settings = Settings::new(Os::Windows, Arch::X86_64);
    let options = OptionSet::default().config_options(Os::Windows);
    let toolchain = ToolchainEnv::default();
    let host = Platform::new(Arch::X86_64, Os::Windows);
    let autotools = Autotools::new(&settings, &options, &toolchain, host, Path::new("/pkg"));

    assert!(autotools.bootstrap_invocations().unwrap().iter().all(|inv| inv.win_bash));
    assert!(autotools.configure_invocation().win_bash);
    assert!(autotools.make_invocation(BuildTarget::Archive).unwrap().win_bash);
  }

  #[test]
  fn make_builds_single_target() {
    let settings = Settings::new(Os::Linux, Arch::X86_64);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv::default();
    let inv = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg"))
      .with_jobs(4)
      .make_invocation(BuildTarget::SharedObject)
      .unwrap();

    assert_eq!(inv.command_line(), "make libliquid.so -j4");
  }

  #[tokio::test]
  async fn build_runs_tools_in_order_inside_source_dir() {
    let settings = Settings::new(Os::Linux, Arch::X86_64);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv {
      aclocal: "aclocal -I m4".to_string(),
      ..ToolchainEnv::default()
    };
    let runner = FakeRunner::default();
    let autotools = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg"));

    autotools
      .build(&runner, Path::new("/work/source_subfolder"), BuildTarget::Archive)
      .await
      .unwrap();

    assert_eq!(
      runner.programs(),
      vec!["aclocal", "autoconf", "autoheader", "./configure", "make"]
    );
    assert_eq!(runner.invocations()[0].args, vec!["-I", "m4"]);
    assert!(
      runner
        .invocations()
        .iter()
        .all(|inv| inv.cwd.as_deref() == Some(Path::new("/work/source_subfolder")))
    );
  }

  #[tokio::test]
  async fn build_stops_at_first_failure() {
    let settings = Settings::new(Os::Linux, Arch::X86_64);
    let options = OptionSet::default();
    let toolchain = ToolchainEnv::default();
    let runner = FakeRunner::default().failing_on("autoconf");
    let autotools = Autotools::new(&settings, &options, &toolchain, linux(), Path::new("/pkg"));

    let result = autotools.build(&runner, Path::new("/src"), BuildTarget::Archive).await;

    assert!(matches!(result, Err(ExecuteError::CmdFailed { code: Some(2), .. })));
    assert_eq!(runner.programs(), vec!["aclocal", "autoconf"]);
  }
}
