//! Compiler and linker flags derived from settings and options.

use crate::options::OptionSet;
use crate::platform::arch::Arch;
use crate::settings::{BuildType, Settings};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerFlags {
  pub cflags: Vec<String>,
  pub ldflags: Vec<String>,
}

impl CompilerFlags {
  pub fn cflags_string(&self) -> String {
    self.cflags.join(" ")
  }

  pub fn ldflags_string(&self) -> String {
    self.ldflags.join(" ")
  }
}

/// Derived flags followed by the user's own, so the user's win on conflicts.
pub fn append_flags(derived: &str, user: Option<&str>) -> String {
  [Some(derived), user]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn build_type_flags(build_type: BuildType) -> &'static [&'static str] {
  match build_type {
    BuildType::Debug => &["-g"],
    BuildType::Release => &["-O3", "-DNDEBUG"],
    BuildType::RelWithDebInfo => &["-O2", "-g", "-DNDEBUG"],
    BuildType::MinSizeRel => &["-Os", "-DNDEBUG"],
  }
}

/// Word-size flag for x86 targets; ARM targets are selected by the toolchain.
pub fn arch_flag(arch: Arch) -> Option<&'static str> {
  match arch {
    Arch::X86 => Some("-m32"),
    Arch::X86_64 => Some("-m64"),
    Arch::Armv7 | Arch::Armv8 => None,
  }
}

pub fn compiler_flags(settings: &Settings, options: &OptionSet) -> CompilerFlags {
  let mut flags = CompilerFlags::default();

  if let Some(flag) = arch_flag(settings.arch) {
    flags.cflags.push(flag.to_string());
    flags.ldflags.push(flag.to_string());
  }
  flags
    .cflags
    .extend(build_type_flags(settings.build_type).iter().map(|f| f.to_string()));
  if options.wants_pic() {
    flags.cflags.push("-fPIC".to_string());
  }

  flags
}
