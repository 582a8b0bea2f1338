//! Implementation of the `outlay plan` command.
//!
//! Evaluates the manifest and prints the configuration that `configure`
//! would write, without touching the filesystem.

use std::path::Path;

use anyhow::{Context, Result};

use outlay_lib::configure::configure_file;

/// Evaluate the manifest and print the computed configuration.
///
/// Shows the shared output root, per-module output directories, the
/// evaluation order, the registered repositories, and the compiler policy.
pub fn cmd_plan(manifest_path: &Path) -> Result<()> {
  let config = configure_file(manifest_path).context("Configuration failed")?;
  let layout = config.layout();

  println!("Output root: {}", layout.output_root.display());
  println!();
  println!("Modules:");
  for (name, dir) in &layout.modules {
    println!("  {} -> {}", name, dir.display());
  }

  println!();
  println!("Evaluation order: {}", layout.evaluation_order.join(", "));

  println!();
  println!("Repositories:");
  for repo in &layout.repositories {
    println!("  {} ({})", repo.name, repo.url);
  }

  println!();
  println!(
    "Compiler policy ({}): {}",
    config.policy.kind(),
    config.policy.flags().join(" ")
  );

  Ok(())
}
