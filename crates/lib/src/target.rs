//! Selection of the single make target that produces the library.
//!
//! Upstream's makefile exposes one target per artifact form. Which one to
//! build depends only on the platform family and whether a shared library
//! was requested, so the mapping is a total table over both keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::platform::PlatformFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildTarget {
  /// `libliquid.dylib`
  Dylib,
  /// `libliquid.ar`, the archive target of upstream's Darwin makefile
  AppleArchive,
  /// `libliquid.a`
  Archive,
  /// `libliquid.so`
  SharedObject,
}

impl BuildTarget {
  pub fn make_target(&self) -> &'static str {
    match self {
      Self::Dylib => "libliquid.dylib",
      Self::AppleArchive => "libliquid.ar",
      Self::Archive => "libliquid.a",
      Self::SharedObject => "libliquid.so",
    }
  }
}

impl fmt::Display for BuildTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.make_target())
  }
}

/// Whether a table entry is known to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStatus {
  Verified,
  /// Needs upstream verification before it can be trusted.
  Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
  pub target: BuildTarget,
  pub status: TargetStatus,
}

const fn entry(target: BuildTarget, status: TargetStatus) -> TargetEntry {
  TargetEntry { target, status }
}

/// `(family, shared) -> target`, one row per key.
pub const TARGET_TABLE: [((PlatformFamily, bool), TargetEntry); 6] = [
  (
    (PlatformFamily::Apple, true),
    entry(BuildTarget::Dylib, TargetStatus::Verified),
  ),
  (
    (PlatformFamily::Apple, false),
    entry(BuildTarget::AppleArchive, TargetStatus::Verified),
  ),
  // Does a shared build work on Windows at all? Only the archive target is known.
  (
    (PlatformFamily::Windows, true),
    entry(BuildTarget::Archive, TargetStatus::Unresolved),
  ),
  (
    (PlatformFamily::Windows, false),
    entry(BuildTarget::Archive, TargetStatus::Verified),
  ),
  (
    (PlatformFamily::Unix, true),
    entry(BuildTarget::SharedObject, TargetStatus::Verified),
  ),
  (
    (PlatformFamily::Unix, false),
    entry(BuildTarget::Archive, TargetStatus::Verified),
  ),
];

/// Looks up the table entry for a platform family and shared flag.
pub fn lookup(family: PlatformFamily, shared: bool) -> TargetEntry {
  TARGET_TABLE
    .iter()
    .find(|(key, _)| *key == (family, shared))
    .map(|(_, entry)| *entry)
    // every (family, shared) pair has a row
    .unwrap_or(entry(BuildTarget::Archive, TargetStatus::Unresolved))
}

/// Picks the make target, warning when the entry is unresolved.
pub fn select_target(family: PlatformFamily, shared: bool) -> BuildTarget {
  let entry = lookup(family, shared);
  if entry.status == TargetStatus::Unresolved {
    warn!(
      ?family,
      shared,
      target = %entry.target,
      "target mapping is unverified upstream; building it anyway"
    );
  }
  entry.target
}
