//! Assembling the package tree from a built source tree.
//!
//! Packaging is a list of copy rules. Each rule picks files by name pattern
//! under a source directory and copies them to a destination directory,
//! optionally dropping the original directory structure.

pub mod info;
mod pattern;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::consts::PACKAGE_INFO_FILE;

pub use info::PackageInfo;
pub use pattern::Pattern;

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("failed to walk {path}: {source}")]
  Walk {
    path: String,
    #[source]
    source: walkdir::Error,
  },

  #[error("failed to copy {from} to {to}: {source}")]
  Copy {
    from: String,
    to: String,
    #[source]
    source: std::io::Error,
  },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct CopyRule {
  pub pattern: Pattern,
  /// Directory searched recursively, relative to the source root.
  pub src: PathBuf,
  /// Directory copied into, relative to the package root.
  pub dst: PathBuf,
  /// Keep the path of each match relative to `src` under `dst`.
  pub keep_path: bool,
}

impl CopyRule {
  pub fn new(pattern: &str, src: &str, dst: &str) -> Self {
    Self {
      pattern: Pattern::new(pattern),
      src: PathBuf::from(src),
      dst: PathBuf::from(dst),
      keep_path: true,
    }
  }

  pub fn flatten(mut self) -> Self {
    self.keep_path = false;
    self
  }
}

/// A file placed into the package, relative to the package root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagedFile {
  pub path: PathBuf,
}

/// The rules producing the liquid-dsp package layout.
pub fn liquid_rules() -> Vec<CopyRule> {
  vec![
    CopyRule::new("LICENSE", "", "licenses").flatten(),
    CopyRule::new("config.h", "", "include/liquid").flatten(),
    CopyRule::new("*.h", "include", "include/liquid").flatten(),
    CopyRule::new("*.a", "", "lib").flatten(),
    CopyRule::new("*.so*", "", "lib").flatten(),
    CopyRule::new("*.dylib", "", "lib").flatten(),
  ]
}

/// Build outputs that must not leak from one configuration into the next.
pub const BUILD_OUTPUTS: &[&str] = &["*.a", "*.so*", "*.dylib", "*.o"];

/// Removes what earlier runs put into `package_root`: each rule's destination
/// directory and the metadata file. Anything else in the directory is left alone.
pub fn clear_package(rules: &[CopyRule], package_root: &Path) -> Result<(), PackageError> {
  for rule in rules {
    let dst = package_root.join(&rule.dst);
    if dst.is_dir() {
      fs::remove_dir_all(&dst)?;
      debug!(dir = ?dst, "removed previous package contents");
    }
  }
  let info_file = package_root.join(PACKAGE_INFO_FILE);
  if info_file.exists() {
    fs::remove_file(info_file)?;
  }
  Ok(())
}

/// Deletes compiled outputs from a source tree that is about to be rebuilt,
/// so only the new build's artifact can be packaged. Returns what was removed.
pub fn remove_build_outputs(source_root: &Path) -> Result<Vec<PathBuf>, PackageError> {
  let patterns: Vec<Pattern> = BUILD_OUTPUTS.iter().map(|p| Pattern::new(p)).collect();
  let mut removed = Vec::new();
  for entry in WalkDir::new(source_root).min_depth(1) {
    let entry = entry.map_err(|source| PackageError::Walk {
      path: source_root.display().to_string(),
      source,
    })?;
    if entry.file_type().is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy();
    if patterns.iter().any(|pattern| pattern.matches(&name)) {
      fs::remove_file(entry.path())?;
      removed.push(entry.path().to_path_buf());
    }
  }
  if !removed.is_empty() {
    info!(count = removed.len(), source = ?source_root, "removed stale build outputs");
  }
  Ok(removed)
}

/// Applies one rule. Returns the copied files relative to `package_root`.
///
/// Rules that match nothing copy nothing; which artifacts exist depends on the
/// platform and options the tree was built for.
pub fn copy(rule: &CopyRule, source_root: &Path, package_root: &Path) -> Result<Vec<PackagedFile>, PackageError> {
  let src_dir = source_root.join(&rule.src);
  if !src_dir.is_dir() {
    debug!(src = ?src_dir, pattern = rule.pattern.as_str(), "source directory missing, nothing to copy");
    return Ok(Vec::new());
  }

  // a pattern without `*` names a file directly inside `src`
  let max_depth = if rule.pattern.as_str().contains('*') { usize::MAX } else { 1 };

  let mut copied = Vec::new();
  for entry in WalkDir::new(&src_dir).min_depth(1).max_depth(max_depth).sort_by_file_name() {
    let entry = entry.map_err(|source| PackageError::Walk {
      path: src_dir.display().to_string(),
      source,
    })?;
    if entry.file_type().is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy();
    if !rule.pattern.matches(&name) {
      continue;
    }

    let relative = if rule.keep_path {
      entry.path().strip_prefix(&src_dir).unwrap_or(entry.path()).to_path_buf()
    } else {
      PathBuf::from(entry.file_name())
    };
    let target = rule.dst.join(relative);
    let dest = package_root.join(&target);

    if let Some(parent) = dest.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::copy(entry.path(), &dest).map_err(|source| PackageError::Copy {
      from: entry.path().display().to_string(),
      to: dest.display().to_string(),
      source,
    })?;
    debug!(from = ?entry.path(), to = ?dest, "copied");
    copied.push(PackagedFile { path: target });
  }

  Ok(copied)
}

/// Applies all rules in order, after clearing what a previous run packaged.
pub fn package(rules: &[CopyRule], source_root: &Path, package_root: &Path) -> Result<Vec<PackagedFile>, PackageError> {
  fs::create_dir_all(package_root)?;
  clear_package(rules, package_root)?;
  let package_root = dunce::canonicalize(package_root)?;
  let mut files = Vec::new();
  for rule in rules {
    files.extend(copy(rule, source_root, &package_root)?);
  }
  info!(count = files.len(), package = ?package_root, "packaged");
  Ok(files)
}
