//! Version-keyed table of upstream source archives.
//!
//! The table has the shape of a `conandata.yml`:
//!
//! ```yaml
//! sources:
//!   "1.3.2":
//!     url: "https://github.com/jgaeddert/liquid-dsp/archive/v1.3.2.tar.gz"
//!     sha256: "<sha256 of the archive>"
//! ```
//!
//! The known upstream releases ship with the crate (`sources.yml`); a file of
//! the same shape can replace them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_SOURCES: &str = include_str!("../sources.yml");

#[derive(Debug, Error)]
pub enum SourceError {
  #[error("failed to read sources file {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid sources table: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("no source archive for version {version} (known: {known})")]
  UnknownVersion { version: String, known: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
  pub url: String,
  pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceTable {
  pub sources: BTreeMap<String, SourceEntry>,
}

impl SourceTable {
  pub fn parse(yaml: &str) -> Result<Self, SourceError> {
    Ok(serde_yaml::from_str(yaml)?)
  }

  /// The releases shipped with the crate.
  pub fn builtin() -> Result<Self, SourceError> {
    Self::parse(BUILTIN_SOURCES)
  }

  pub fn load(path: &Path) -> Result<Self, SourceError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
      path: path.display().to_string(),
      source,
    })?;
    Self::parse(&yaml)
  }

  pub fn get(&self, version: &str) -> Result<&SourceEntry, SourceError> {
    self.sources.get(version).ok_or_else(|| SourceError::UnknownVersion {
      version: version.to_string(),
      known: self.versions().join(", "),
    })
  }

  pub fn versions(&self) -> Vec<&str> {
    self.sources.keys().map(String::as_str).collect()
  }
}
