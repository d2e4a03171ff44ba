mod args;
mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use args::ConfigArgs;
use cmd::{CreateArgs, cmd_create, cmd_info, cmd_inspect, cmd_package_info};
use output::{OutputFormat, print_error};

/// liquidpkg - package the liquid-dsp library with autotools
#[derive(Parser)]
#[command(name = "liquidpkg")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show recipe and host platform information
  Info,

  /// Show effective options, requirements and build target without building
  Inspect {
    #[command(flatten)]
    config: ConfigArgs,
  },

  /// Fetch, build and package liquid-dsp
  Create(CreateArgs),

  /// Print linkage metadata for a configuration or an existing package
  PackageInfo {
    #[command(flatten)]
    config: ConfigArgs,

    /// Read metadata from a previously created package
    #[arg(long)]
    package_dir: Option<PathBuf>,
  },
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match &cli.command {
    Commands::Info => {
      cmd_info();
      Ok(())
    }
    Commands::Inspect { config } => cmd_inspect(config, cli.output),
    Commands::Create(args) => cmd_create(args, cli.output),
    Commands::PackageInfo { config, package_dir } => cmd_package_info(config, package_dir.as_deref(), cli.output),
  };

  if let Err(err) = result {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
