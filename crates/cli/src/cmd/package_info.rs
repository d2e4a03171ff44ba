//! Implementation of the `liquidpkg package-info` command.
//!
//! Prints the linkage metadata consumers need, either for an existing package
//! directory or for a configuration that has not been built yet.

use std::path::Path;

use anyhow::{Context, Result};

use liquidpkg_lib::package::PackageInfo;
use liquidpkg_lib::platform::Platform;

use crate::args::ConfigArgs;
use crate::output::{OutputFormat, join_or_dash, print_json, print_stat};

pub fn cmd_package_info(config: &ConfigArgs, package_dir: Option<&Path>, output: OutputFormat) -> Result<()> {
  let info = match package_dir {
    Some(dir) => PackageInfo::read(dir).with_context(|| format!("Failed to read package info in {}", dir.display()))?,
    None => {
      let recipe = config.recipe(Platform::current())?;
      let configuration = recipe.validate()?;
      recipe.package_info(&configuration)
    }
  };

  if output.is_json() {
    return print_json(&info);
  }

  println!("{} {}", info.name, info.version);
  print_stat("Libs", &join_or_dash(&info.libs));
  print_stat("System libs", &join_or_dash(&info.system_libs));
  print_stat("Link flags", &join_or_dash(&info.link_flags()));
  if let Some(dir) = package_dir {
    print_stat("Search flags", &join_or_dash(&info.search_flags(dir)));
  }

  Ok(())
}
