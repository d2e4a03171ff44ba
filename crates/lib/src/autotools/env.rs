//! Toolchain commands configured through the environment.

use serde::{Deserialize, Serialize};

use crate::consts::BASH_PATH_ENV;

/// Command lines for the autotools regenerators and make, the optional bash
/// override used on Windows hosts, and the user's compiler environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainEnv {
  pub aclocal: String,
  pub autoconf: String,
  pub autoheader: String,
  pub make: String,
  pub bash_path: Option<String>,
  /// `CC` from the environment; configure inherits it untouched.
  pub cc: Option<String>,
  /// `CFLAGS` from the environment, appended after the derived flags.
  pub cflags: Option<String>,
  /// `LDFLAGS` from the environment, appended after the derived flags.
  pub ldflags: Option<String>,
}

impl Default for ToolchainEnv {
  fn default() -> Self {
    Self {
      aclocal: "aclocal".to_string(),
      autoconf: "autoconf".to_string(),
      autoheader: "autoheader".to_string(),
      make: "make".to_string(),
      bash_path: None,
      cc: None,
      cflags: None,
      ldflags: None,
    }
  }
}

impl ToolchainEnv {
  /// Reads `ACLOCAL`, `AUTOCONF`, `AUTOHEADER`, `MAKE`, `LIQUIDPKG_BASH_PATH`,
  /// `CC`, `CFLAGS` and `LDFLAGS`.
  ///
  /// Unset or empty variables fall back to the plain tool names.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      aclocal: var("ACLOCAL").unwrap_or(defaults.aclocal),
      autoconf: var("AUTOCONF").unwrap_or(defaults.autoconf),
      autoheader: var("AUTOHEADER").unwrap_or(defaults.autoheader),
      make: var("MAKE").unwrap_or(defaults.make),
      bash_path: var(BASH_PATH_ENV),
      cc: var("CC"),
      cflags: var("CFLAGS"),
      ldflags: var("LDFLAGS"),
    }
  }
}

fn var(key: &str) -> Option<String> {
  std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
