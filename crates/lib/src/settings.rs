//! Host/target settings supplied by the caller.
//!
//! Settings describe the platform and toolchain a package is built for. They
//! are plain values: normalization returns a new `Settings` instead of
//! deleting fields in place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::platform::arch::Arch;
use crate::platform::os::Os;
use crate::platform::{Platform, PlatformFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompilerKind {
  #[serde(rename = "gcc")]
  Gcc,
  #[serde(rename = "clang")]
  Clang,
  #[serde(rename = "apple-clang")]
  AppleClang,
  #[serde(rename = "Visual Studio")]
  VisualStudio,
}

impl CompilerKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Gcc => "gcc",
      Self::Clang => "clang",
      Self::AppleClang => "apple-clang",
      Self::VisualStudio => "Visual Studio",
    }
  }

  /// Driver executable exported as `CC` to configure.
  pub fn c_driver(&self) -> &'static str {
    match self {
      Self::Gcc => "gcc",
      Self::Clang | Self::AppleClang => "clang",
      Self::VisualStudio => "cl",
    }
  }

  /// Sensible default compiler for an OS when the caller does not pick one.
  pub fn default_for(os: Os) -> Self {
    match os.family() {
      PlatformFamily::Apple => Self::AppleClang,
      PlatformFamily::Windows | PlatformFamily::Unix => match os {
        Os::FreeBSD | Os::Android => Self::Clang,
        _ => Self::Gcc,
      },
    }
  }
}

impl fmt::Display for CompilerKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown compiler: {0}")]
pub struct UnknownCompiler(pub String);

impl FromStr for CompilerKind {
  type Err = UnknownCompiler;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "gcc" => Ok(Self::Gcc),
      "clang" => Ok(Self::Clang),
      "apple-clang" => Ok(Self::AppleClang),
      "visual studio" | "msvc" => Ok(Self::VisualStudio),
      _ => Err(UnknownCompiler(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
  pub kind: CompilerKind,
  pub version: Option<String>,
  /// C++ language standard; meaningless for a C library and cleared on normalization.
  pub cppstd: Option<String>,
  /// C++ standard library; cleared on normalization for the same reason.
  pub libcxx: Option<String>,
}

impl Compiler {
  pub fn new(kind: CompilerKind) -> Self {
    Self {
      kind,
      version: None,
      cppstd: None,
      libcxx: None,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
  Debug,
  #[default]
  Release,
  RelWithDebInfo,
  MinSizeRel,
}

impl BuildType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "RelWithDebInfo",
      Self::MinSizeRel => "MinSizeRel",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown build type: {0}")]
pub struct UnknownBuildType(pub String);

impl FromStr for BuildType {
  type Err = UnknownBuildType;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    [
      Self::Debug,
      Self::Release,
      Self::RelWithDebInfo,
      Self::MinSizeRel,
    ]
    .into_iter()
    .find(|bt| bt.as_str().eq_ignore_ascii_case(s))
    .ok_or_else(|| UnknownBuildType(s.to_string()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
  pub os: Os,
  pub arch: Arch,
  pub compiler: Compiler,
  pub build_type: BuildType,
}

impl Settings {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self {
      os,
      arch,
      compiler: Compiler::new(CompilerKind::default_for(os)),
      build_type: BuildType::default(),
    }
  }

  /// Settings matching the machine we are running on.
  ///
  /// Returns `None` if the current platform is not supported
  pub fn detect() -> Option<Self> {
    Platform::current().map(|p| Self::new(p.os, p.arch))
  }

  pub fn with_compiler(mut self, compiler: Compiler) -> Self {
    self.compiler = compiler;
    self
  }

  pub fn with_build_type(mut self, build_type: BuildType) -> Self {
    self.build_type = build_type;
    self
  }

  pub fn platform(&self) -> Platform {
    Platform::new(self.arch, self.os)
  }

  /// Drops the C++-only compiler sub-settings; liquid-dsp is pure C.
  pub fn normalized(&self) -> Self {
    let mut settings = self.clone();
    settings.compiler.cppstd = None;
    settings.compiler.libcxx = None;
    settings
  }
}
