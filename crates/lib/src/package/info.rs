//! Linkage metadata published for consumers of the package.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{LIB_NAME, MATH_LIB, PACKAGE_INFO_FILE};
use crate::options::OptionSet;
use crate::platform::os::Os;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
  pub name: String,
  pub version: String,
  pub settings: Settings,
  pub options: OptionSet,
  /// Libraries built by this package.
  pub libs: Vec<String>,
  /// Libraries the platform provides that consumers must also link.
  pub system_libs: Vec<String>,
  pub include_dirs: Vec<String>,
  pub lib_dirs: Vec<String>,
}

/// System libraries liquid-dsp needs on `os`.
///
/// Linux and FreeBSD keep the math functions in a separate libm.
pub fn system_libs(os: Os) -> Vec<String> {
  match os {
    Os::Linux | Os::FreeBSD => vec![MATH_LIB.to_string()],
    _ => Vec::new(),
  }
}

impl PackageInfo {
  pub fn new(name: &str, version: &str, settings: &Settings, options: &OptionSet) -> Self {
    Self {
      name: name.to_string(),
      version: version.to_string(),
      settings: settings.clone(),
      options: *options,
      libs: vec![LIB_NAME.to_string()],
      system_libs: system_libs(settings.os),
      include_dirs: vec!["include".to_string()],
      lib_dirs: vec!["lib".to_string()],
    }
  }

  /// `-l` flags in link order: package libraries first, then system libraries.
  pub fn link_flags(&self) -> Vec<String> {
    self
      .libs
      .iter()
      .chain(&self.system_libs)
      .map(|lib| format!("-l{}", lib))
      .collect()
  }

  /// `-I`/`-L` flags for a package installed at `root`.
  pub fn search_flags(&self, root: &Path) -> Vec<String> {
    let includes = self
      .include_dirs
      .iter()
      .map(|dir| format!("-I{}", root.join(dir).display()));
    let libs = self.lib_dirs.iter().map(|dir| format!("-L{}", root.join(dir).display()));
    includes.chain(libs).collect()
  }

  /// Writes `package_info.json` into the package root.
  pub fn write(&self, package_root: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
    std::fs::write(package_root.join(PACKAGE_INFO_FILE), json)
  }

  pub fn read(package_root: &Path) -> std::io::Result<Self> {
    let json = std::fs::read_to_string(package_root.join(PACKAGE_INFO_FILE))?;
    serde_json::from_str(&json).map_err(std::io::Error::other)
  }
}
