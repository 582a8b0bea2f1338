//! Implementation of the `outlay clean` command.
//!
//! Deletes the shared output tree computed during configuration. Invoking
//! clean when the tree is already absent is a success.

use std::path::Path;

use anyhow::{Context, Result};

use outlay_lib::configure::configure_file;

/// Execute the registered clean task.
///
/// Prints a summary including the deleted path and bytes freed.
pub fn cmd_clean(manifest_path: &Path, dry_run: bool) -> Result<()> {
  let config = configure_file(manifest_path).context("Configuration failed")?;
  let result = config.clean.run(dry_run).context("Clean failed")?;

  if !result.existed {
    println!("Nothing to clean.");
  } else if dry_run {
    println!("Clean dry run:");
    println!("  Would delete {}", result.path.display());
    println!("  Would free {} byte(s)", result.bytes_freed);
  } else {
    println!("Clean complete!");
    println!("  Deleted: {}", result.path.display());
    println!("  Freed:   {} byte(s)", result.bytes_freed);
  }

  Ok(())
}
