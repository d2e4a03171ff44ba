use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating systems a package can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
  Linux,
  FreeBSD,
  Macos,
  #[serde(rename = "iOS")]
  Ios,
  #[serde(rename = "watchOS")]
  WatchOs,
  #[serde(rename = "tvOS")]
  TvOs,
  Windows,
  Android,
}

/// Coarse grouping of operating systems by how upstream's makefile treats them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformFamily {
  Apple,
  Windows,
  Unix,
}

impl Os {
  pub const ALL: [Os; 8] = [
    Os::Linux,
    Os::FreeBSD,
    Os::Macos,
    Os::Ios,
    Os::WatchOs,
    Os::TvOs,
    Os::Windows,
    Os::Android,
  ];

  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "freebsd" => Some(Self::FreeBSD),
      "macos" => Some(Self::Macos),
      "ios" => Some(Self::Ios),
      "windows" => Some(Self::Windows),
      "android" => Some(Self::Android),
      _ => None,
    }
  }

  /// Returns the settings identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "Linux",
      Self::FreeBSD => "FreeBSD",
      Self::Macos => "Macos",
      Self::Ios => "iOS",
      Self::WatchOs => "watchOS",
      Self::TvOs => "tvOS",
      Self::Windows => "Windows",
      Self::Android => "Android",
    }
  }

  pub fn is_apple(&self) -> bool {
    matches!(self, Self::Macos | Self::Ios | Self::WatchOs | Self::TvOs)
  }

  pub fn family(&self) -> PlatformFamily {
    if self.is_apple() {
      PlatformFamily::Apple
    } else if *self == Self::Windows {
      PlatformFamily::Windows
    } else {
      PlatformFamily::Unix
    }
  }

  /// OS component of a GNU host triple, used for `--host` on cross builds
  pub fn gnu_os(&self) -> &'static str {
    match self {
      Self::Linux => "linux-gnu",
      Self::FreeBSD => "freebsd",
      Self::Macos | Self::Ios | Self::WatchOs | Self::TvOs => "apple-darwin",
      Self::Windows => "w64-mingw32",
      Self::Android => "linux-android",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown os: {0}")]
pub struct UnknownOs(pub String);

impl FromStr for Os {
  type Err = UnknownOs;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Os::ALL
      .into_iter()
      .find(|os| os.as_str().eq_ignore_ascii_case(s))
      .or(match s.to_ascii_lowercase().as_str() {
        "darwin" | "macos" | "osx" => Some(Os::Macos),
        _ => None,
      })
      .ok_or_else(|| UnknownOs(s.to_string()))
  }
}
