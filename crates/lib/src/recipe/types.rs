use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::SOURCE_SUBFOLDER;
use crate::execute::ExecuteError;
use crate::fetch::FetchError;
use crate::options::OptionSet;
use crate::package::{PackageError, PackageInfo, PackagedFile};
use crate::platform::paths;
use crate::requirements::Requirement;
use crate::settings::Settings;
use crate::sources::SourceError;
use crate::target::BuildTarget;
use crate::validate::InvalidConfiguration;

/// Errors that can occur while running the recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
  /// The requested configuration cannot be built.
  #[error(transparent)]
  InvalidConfiguration(#[from] InvalidConfiguration),

  #[error("source table error: {0}")]
  Source(#[from] SourceError),

  #[error("source acquisition failed: {0}")]
  Fetch(#[from] FetchError),

  /// An external tool failed during the build.
  #[error("build failed: {0}")]
  Execute(#[from] ExecuteError),

  #[error("packaging failed: {0}")]
  Package(#[from] PackageError),

  #[error("source tree not found at {0}; run the source step first")]
  MissingSource(PathBuf),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Settings and options after option configuration and normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
  pub settings: Settings,
  pub options: OptionSet,
}

/// Where the recipe reads and writes on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  /// Holds the source subfolder.
  pub work_dir: PathBuf,
  /// Root of the produced package tree.
  pub package_dir: PathBuf,
  /// Download cache for source archives.
  pub downloads_dir: PathBuf,
}

impl Layout {
  pub fn new(work_dir: &Path) -> Self {
    Self {
      work_dir: work_dir.to_path_buf(),
      package_dir: work_dir.join("package"),
      downloads_dir: work_dir.join("downloads"),
    }
  }

  /// `<cache>/<name>/<version>`, with downloads shared across versions.
  pub fn default_for(name: &str, version: &str) -> Self {
    Self {
      downloads_dir: paths::downloads_dir(),
      ..Self::new(&paths::work_dir(name, version))
    }
  }

  pub fn with_package_dir(mut self, dir: &Path) -> Self {
    self.package_dir = dir.to_path_buf();
    self
  }

  pub fn source_dir(&self) -> PathBuf {
    self.work_dir.join(SOURCE_SUBFOLDER)
  }
}

/// Summary of a full `create` run.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReport {
  pub configuration: Configuration,
  pub requirements: Vec<Requirement>,
  pub target: BuildTarget,
  pub files: Vec<PackagedFile>,
  pub package_dir: PathBuf,
  pub info: PackageInfo,
}
