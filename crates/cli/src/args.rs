//! Settings and option flags shared by the configuration-aware commands.

use anyhow::{Result, anyhow};
use clap::{ArgAction, Args};

use liquidpkg_lib::consts::DEFAULT_VERSION;
use liquidpkg_lib::options::OptionSet;
use liquidpkg_lib::platform::Platform;
use liquidpkg_lib::platform::arch::Arch;
use liquidpkg_lib::platform::os::Os;
use liquidpkg_lib::recipe::Recipe;
use liquidpkg_lib::settings::{BuildType, Compiler, CompilerKind, Settings};

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
  /// Target operating system (defaults to the host)
  #[arg(long)]
  pub os: Option<Os>,

  /// Target architecture (defaults to the host)
  #[arg(long)]
  pub arch: Option<Arch>,

  /// Compiler family (defaults per OS)
  #[arg(long)]
  pub compiler: Option<CompilerKind>,

  #[arg(long)]
  pub compiler_version: Option<String>,

  /// C++ standard; accepted for profile compatibility and discarded
  #[arg(long)]
  pub cppstd: Option<String>,

  /// C++ standard library; accepted for profile compatibility and discarded
  #[arg(long)]
  pub libcxx: Option<String>,

  #[arg(long, default_value_t = BuildType::Release)]
  pub build_type: BuildType,

  /// Build a shared library instead of a static archive
  #[arg(long)]
  pub shared: bool,

  /// Compile position independent code (static builds only)
  #[arg(long, default_value_t = true, action = ArgAction::Set)]
  pub fpic: bool,

  /// Upstream liquid-dsp version to package
  #[arg(long = "package-version", default_value = DEFAULT_VERSION)]
  pub package_version: String,
}

impl ConfigArgs {
  pub fn settings(&self, host: Option<Platform>) -> Result<Settings> {
    let os = self
      .os
      .or(host.map(|p| p.os))
      .ok_or_else(|| anyhow!("Could not detect host OS; pass --os"))?;
    let arch = self
      .arch
      .or(host.map(|p| p.arch))
      .ok_or_else(|| anyhow!("Could not detect host architecture; pass --arch"))?;

    let compiler = Compiler {
      kind: self.compiler.unwrap_or_else(|| CompilerKind::default_for(os)),
      version: self.compiler_version.clone(),
      cppstd: self.cppstd.clone(),
      libcxx: self.libcxx.clone(),
    };

    Ok(
      Settings::new(os, arch)
        .with_compiler(compiler)
        .with_build_type(self.build_type),
    )
  }

  pub fn options(&self) -> OptionSet {
    OptionSet::new(self.shared, self.fpic)
  }

  pub fn recipe(&self, host: Option<Platform>) -> Result<Recipe> {
    Ok(Recipe::new(&self.package_version, self.settings(host)?, self.options()))
  }
}
