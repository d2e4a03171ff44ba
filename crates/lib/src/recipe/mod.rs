//! The liquid-dsp recipe.
//!
//! A host drives the recipe through its lifecycle in a fixed order:
//!
//! 1. [`Recipe::config_options`] / [`Recipe::configure`]: derive effective options and settings
//! 2. [`Recipe::validate`]: reject configurations upstream cannot build
//! 3. [`Recipe::build_requirements`]: declare the tools the build machine needs
//! 4. [`Recipe::source`]: fetch and extract the upstream release
//! 5. [`Recipe::build`]: autotools bootstrap, configure, make one target
//! 6. [`Recipe::package`]: copy headers, license and artifacts into the package tree
//! 7. [`Recipe::package_info`]: publish how consumers link against the package
//!
//! [`Recipe::create`] runs all of them.

mod types;

use std::time::Instant;

use tracing::info;

use crate::autotools::{Autotools, ToolchainEnv};
use crate::consts::{
  PACKAGE_DESCRIPTION, PACKAGE_HOMEPAGE, PACKAGE_LICENSE, PACKAGE_NAME, PACKAGE_TOPICS,
};
use crate::execute::CommandRunner;
use crate::fetch;
use crate::options::OptionSet;
use crate::package::{self, PackageInfo, PackagedFile};
use crate::platform::Platform;
use crate::platform::os::Os;
use crate::requirements::{Requirement, build_requirements};
use crate::settings::Settings;
use crate::sources::SourceTable;
use crate::target::{BuildTarget, select_target};
use crate::validate::{InvalidConfiguration, validate};

pub use types::{Configuration, CreateReport, Layout, RecipeError};

/// Static description of the packaged project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Metadata {
  pub name: &'static str,
  pub description: &'static str,
  pub license: &'static str,
  pub homepage: &'static str,
  pub topics: &'static [&'static str],
}

pub const METADATA: Metadata = Metadata {
  name: PACKAGE_NAME,
  description: PACKAGE_DESCRIPTION,
  license: PACKAGE_LICENSE,
  homepage: PACKAGE_HOMEPAGE,
  topics: PACKAGE_TOPICS,
};

/// The build machine side of a run: how commands are executed and where.
pub struct Host<'a, R> {
  pub runner: &'a R,
  pub platform: Platform,
  pub toolchain: ToolchainEnv,
  pub layout: Layout,
  pub jobs: Option<usize>,
}

/// A request to package one version of liquid-dsp for one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
  pub version: String,
  pub settings: Settings,
  pub options: OptionSet,
}

impl Recipe {
  pub fn new(version: &str, settings: Settings, options: OptionSet) -> Self {
    Self {
      version: version.to_string(),
      settings,
      options,
    }
  }

  pub fn metadata(&self) -> Metadata {
    METADATA
  }

  /// Options after platform pruning (fPIC is meaningless on Windows).
  pub fn config_options(&self) -> OptionSet {
    self.options.config_options(self.settings.os)
  }

  /// Effective settings and options: shared drops fPIC, C++ settings are stripped.
  pub fn configure(&self) -> Configuration {
    Configuration {
      settings: self.settings.normalized(),
      options: self.config_options().configure(),
    }
  }

  /// Configures, then rejects combinations upstream is known not to build.
  pub fn validate(&self) -> Result<Configuration, InvalidConfiguration> {
    let configuration = self.configure();
    validate(&configuration.settings, &configuration.options)?;
    Ok(configuration)
  }

  pub fn build_requirements(&self, host_os: Os, toolchain: &ToolchainEnv) -> Vec<Requirement> {
    build_requirements(host_os, toolchain)
  }

  /// The make target for a configuration.
  pub fn build_target(&self, configuration: &Configuration) -> BuildTarget {
    select_target(configuration.settings.os.family(), configuration.options.shared)
  }

  /// Fetches this version's archive and extracts it into the source subfolder.
  pub async fn source(&self, table: &SourceTable, layout: &Layout) -> Result<(), RecipeError> {
    let entry = table.get(&self.version)?;
    let archive = fetch::download(&entry.url, &entry.sha256, &layout.downloads_dir).await?;
    fetch::extract_archive_async(&archive, &layout.source_dir()).await?;
    info!(version = %self.version, dir = ?layout.source_dir(), "source ready");
    Ok(())
  }

  /// Regenerates autotools files, configures and builds the single target.
  pub async fn build<R: CommandRunner>(
    &self,
    configuration: &Configuration,
    host: &Host<'_, R>,
  ) -> Result<BuildTarget, RecipeError> {
    let source_dir = host.layout.source_dir();
    if !source_dir.is_dir() {
      return Err(RecipeError::MissingSource(source_dir));
    }

    let target = self.build_target(configuration);
    let mut autotools = Autotools::new(
      &configuration.settings,
      &configuration.options,
      &host.toolchain,
      host.platform,
      &host.layout.package_dir,
    );
    if let Some(jobs) = host.jobs {
      autotools = autotools.with_jobs(jobs);
    }

    autotools.build(host.runner, &source_dir, target).await?;
    Ok(target)
  }

  /// Copies license, headers and whichever binaries the build produced.
  pub fn package(&self, layout: &Layout) -> Result<Vec<PackagedFile>, RecipeError> {
    Ok(package::package(
      &package::liquid_rules(),
      &layout.source_dir(),
      &layout.package_dir,
    )?)
  }

  pub fn package_info(&self, configuration: &Configuration) -> PackageInfo {
    PackageInfo::new(
      METADATA.name,
      &self.version,
      &configuration.settings,
      &configuration.options,
    )
  }

  /// Runs the whole lifecycle. Validation happens before anything touches disk.
  pub async fn create<R: CommandRunner>(
    &self,
    table: &SourceTable,
    host: &Host<'_, R>,
  ) -> Result<CreateReport, RecipeError> {
    let started = Instant::now();
    let configuration = self.validate()?;
    info!(
      name = METADATA.name,
      version = %self.version,
      settings = ?configuration.settings,
      options = ?configuration.options,
      "configuration accepted"
    );

    let requirements = self.build_requirements(host.platform.os, &host.toolchain);
    for requirement in &requirements {
      info!(requirement = %requirement, "build requirement");
    }

    self.source(table, &host.layout).await?;
    self.build_and_package(configuration, requirements, host, started).await
  }

  /// Builds and packages an already extracted source tree.
  ///
  /// The tree may hold outputs of a build for another configuration; those
  /// are deleted first so only this build's artifact gets packaged.
  pub async fn create_from_source<R: CommandRunner>(&self, host: &Host<'_, R>) -> Result<CreateReport, RecipeError> {
    let started = Instant::now();
    let configuration = self.validate()?;
    let source_dir = host.layout.source_dir();
    if source_dir.is_dir() {
      package::remove_build_outputs(&source_dir)?;
    }
    let requirements = self.build_requirements(host.platform.os, &host.toolchain);
    self.build_and_package(configuration, requirements, host, started).await
  }

  async fn build_and_package<R: CommandRunner>(
    &self,
    configuration: Configuration,
    requirements: Vec<Requirement>,
    host: &Host<'_, R>,
    started: Instant,
  ) -> Result<CreateReport, RecipeError> {
    let target = self.build(&configuration, host).await?;
    let files = self.package(&host.layout)?;

    let info = self.package_info(&configuration);
    info.write(&host.layout.package_dir)?;

    info!(
      package = ?host.layout.package_dir,
      files = files.len(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "package created"
    );

    Ok(CreateReport {
      configuration,
      requirements,
      target,
      files,
      package_dir: host.layout.package_dir.clone(),
      info,
    })
  }
}
