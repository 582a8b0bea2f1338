//! Implementation of the `outlay info` command.

use std::path::Path;

use anyhow::{Context, Result};

use outlay_lib::consts::APP_NAME;
use outlay_lib::manifest::ProjectManifest;

/// Show a summary of the project manifest.
pub fn cmd_info(manifest_path: &Path) -> Result<()> {
  let manifest = ProjectManifest::load(manifest_path).context("Failed to load manifest")?;

  println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
  println!();
  println!("  Project: {}", manifest.name);
  println!("  Root:    {}", manifest.root_dir.display());
  println!("  Modules: {}", manifest.modules.len());
  for module in &manifest.modules {
    println!("    - {}", module);
  }

  Ok(())
}
