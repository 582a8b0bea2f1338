use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

/// outlay - Multi-module build tree configurator
#[derive(Parser)]
#[command(name = "outlay")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the configuration that would be written (dry-run)
  Plan {
    /// Path to the project manifest (default: outlay.toml)
    #[arg(default_value = "outlay.toml")]
    manifest: PathBuf,
  },

  /// Configure the project tree and write the lock file
  Configure {
    /// Path to the project manifest (default: outlay.toml)
    #[arg(default_value = "outlay.toml")]
    manifest: PathBuf,
  },

  /// Delete the shared output tree
  Clean {
    /// Path to the project manifest (default: outlay.toml)
    #[arg(default_value = "outlay.toml")]
    manifest: PathBuf,

    /// Report what would be deleted without deleting it
    #[arg(long)]
    dry_run: bool,
  },

  /// Show project information
  Info {
    /// Path to the project manifest (default: outlay.toml)
    #[arg(default_value = "outlay.toml")]
    manifest: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .without_time()
    .init();

  match cli.command {
    Commands::Plan { manifest } => cmd::cmd_plan(&manifest),
    Commands::Configure { manifest } => cmd::cmd_configure(&manifest),
    Commands::Clean { manifest, dry_run } => cmd::cmd_clean(&manifest, dry_run),
    Commands::Info { manifest } => cmd::cmd_info(&manifest),
  }
}
