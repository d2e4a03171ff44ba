//! Build-time requirements the host has to provide before `build` runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::autotools::ToolchainEnv;
use crate::consts::{LIBTOOL_REQUIREMENT, MSYS2_REQUIREMENT};
use crate::platform::os::Os;

/// A pinned `name/version` reference to a tool package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
  pub name: String,
  pub version: String,
}

impl Requirement {
  pub fn new(name: &str, version: &str) -> Self {
    Self {
      name: name.to_string(),
      version: version.to_string(),
    }
  }

  fn from_pair((name, version): (&str, &str)) -> Self {
    Self::new(name, version)
  }
}

impl fmt::Display for Requirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.name, self.version)
  }
}

/// Declares the tools needed to build on `host_os`.
///
/// libtool is always required. A Windows host additionally needs an MSYS2
/// environment for its bash, unless a bash path has been configured.
pub fn build_requirements(host_os: Os, toolchain: &ToolchainEnv) -> Vec<Requirement> {
  let mut requirements = vec![Requirement::from_pair(LIBTOOL_REQUIREMENT)];
  if host_os == Os::Windows && toolchain.bash_path.is_none() {
    requirements.push(Requirement::from_pair(MSYS2_REQUIREMENT));
  }
  requirements
}
