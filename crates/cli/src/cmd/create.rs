//! Implementation of the `liquidpkg create` command.
//!
//! Runs the full recipe lifecycle: validate, fetch sources, build with
//! autotools and assemble the package tree.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use liquidpkg_lib::autotools::ToolchainEnv;
use liquidpkg_lib::execute::ProcessRunner;
use liquidpkg_lib::platform::Platform;
use liquidpkg_lib::recipe::{Host, Layout, METADATA};
use liquidpkg_lib::sources::SourceTable;

use crate::args::ConfigArgs;
use crate::output::{OutputFormat, join_or_dash, print_info, print_json, print_mapping, print_stat, print_success};

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
  #[command(flatten)]
  pub config: ConfigArgs,

  /// Version-keyed table of source archives (conandata-style YAML); defaults
  /// to the releases built into liquidpkg
  #[arg(long)]
  pub sources: Option<PathBuf>,

  /// Directory holding the extracted sources (default: cache dir)
  #[arg(long)]
  pub workdir: Option<PathBuf>,

  /// Where to assemble the package (default: <workdir>/package)
  #[arg(long)]
  pub package_dir: Option<PathBuf>,

  /// Parallel jobs passed to make (default: available CPUs)
  #[arg(short, long)]
  pub jobs: Option<usize>,

  /// Reuse an already extracted source tree instead of fetching
  #[arg(long)]
  pub skip_source: bool,
}

pub fn cmd_create(args: &CreateArgs, output: OutputFormat) -> Result<()> {
  let started = Instant::now();
  let host_platform = Platform::current().context("Unsupported host platform")?;
  let recipe = args.config.recipe(Some(host_platform))?;

  // Fail on unsupported configurations before reading anything else.
  recipe.validate()?;

  let mut layout = match &args.workdir {
    Some(dir) => Layout::new(dir),
    None => Layout::default_for(METADATA.name, &recipe.version),
  };
  if let Some(dir) = &args.package_dir {
    layout = layout.with_package_dir(dir);
  }

  let toolchain = ToolchainEnv::from_env();
  let runner = ProcessRunner::new(toolchain.bash_path.clone());
  let host = Host {
    runner: &runner,
    platform: host_platform,
    toolchain,
    layout,
    jobs: args.jobs,
  };

  info!(workdir = ?host.layout.work_dir, "starting create");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = if args.skip_source {
    if !output.is_json() {
      print_info(&format!("Reusing sources in {}", host.layout.source_dir().display()));
    }
    rt.block_on(recipe.create_from_source(&host))
  } else {
    let table = match &args.sources {
      Some(path) => {
        SourceTable::load(path).with_context(|| format!("Failed to load sources from {}", path.display()))?
      }
      None => SourceTable::builtin().context("Failed to load built-in sources")?,
    };
    rt.block_on(recipe.create(&table, &host))
  };
  let report = result.context("Create failed")?;

  if output.is_json() {
    return print_json(&report);
  }

  print_success(&format!(
    "Created {} {} in {}",
    METADATA.name,
    recipe.version,
    humantime::format_duration(elapsed_millis(started.elapsed()))
  ));
  print_stat("Target", report.target.make_target());
  print_stat("Package", &report.package_dir.display().to_string());
  print_stat("Link flags", &join_or_dash(&report.info.link_flags()));
  println!("Files:");
  for file in &report.files {
    let name = file.path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    print_mapping(&name, &file.path.display().to_string());
  }

  Ok(())
}

/// Rounds to whole milliseconds so short runs still show a nonzero time.
fn elapsed_millis(elapsed: Duration) -> Duration {
  Duration::from_millis(elapsed.as_millis() as u64)
}
