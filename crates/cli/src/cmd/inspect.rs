//! Implementation of the `liquidpkg inspect` command.
//!
//! Runs every decision the recipe makes before touching disk: option pruning,
//! settings normalization, validation, build requirements and target
//! selection. Nothing is fetched or built.

use anyhow::Result;
use serde::Serialize;

use liquidpkg_lib::autotools::ToolchainEnv;
use liquidpkg_lib::options::OptionSet;
use liquidpkg_lib::platform::Platform;
use liquidpkg_lib::recipe::{Configuration, METADATA, Metadata};
use liquidpkg_lib::requirements::Requirement;
use liquidpkg_lib::target::{TargetStatus, lookup};

use crate::args::ConfigArgs;
use crate::output::{OutputFormat, print_json, print_stat, print_success, print_warning};

#[derive(Debug, Serialize)]
struct InspectReport {
  metadata: Metadata,
  version: String,
  requested: OptionSet,
  configuration: Configuration,
  requirements: Vec<Requirement>,
  target: String,
  target_status: TargetStatus,
}

pub fn cmd_inspect(config: &ConfigArgs, output: OutputFormat) -> Result<()> {
  let host = Platform::current();
  let recipe = config.recipe(host)?;

  let configuration = recipe.validate()?;
  let toolchain = ToolchainEnv::from_env();
  let host_os = host.map(|p| p.os).unwrap_or(recipe.settings.os);
  let entry = lookup(configuration.settings.os.family(), configuration.options.shared);

  let report = InspectReport {
    metadata: METADATA,
    version: recipe.version.clone(),
    requested: recipe.options,
    requirements: recipe.build_requirements(host_os, &toolchain),
    target: entry.target.make_target().to_string(),
    target_status: entry.status,
    configuration,
  };

  if output.is_json() {
    return print_json(&report);
  }

  print_success(&format!("{} {} can be built", METADATA.name, report.version));
  let settings = &report.configuration.settings;
  print_stat("Platform", &settings.platform().to_string());
  print_stat("Compiler", &settings.compiler.kind.to_string());
  print_stat("Build type", &settings.build_type.to_string());
  print_stat("Shared", &report.configuration.options.shared.to_string());
  print_stat(
    "fPIC",
    &report
      .configuration
      .options
      .fpic
      .map_or_else(|| "removed".to_string(), |v| v.to_string()),
  );
  print_stat("Target", &report.target);
  let requirements: Vec<String> = report.requirements.iter().map(ToString::to_string).collect();
  print_stat("Build requirements", &requirements.join(", "));

  if report.target_status == TargetStatus::Unresolved {
    print_warning(&format!(
      "{} is unverified for this platform; upstream may not support it",
      report.target
    ));
  }

  Ok(())
}
