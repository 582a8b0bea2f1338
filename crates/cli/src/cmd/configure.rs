//! Implementation of the `outlay configure` command.
//!
//! Evaluates the manifest and writes the resolved configuration lock file
//! next to it, for the external build engine to consume.

use std::path::Path;

use anyhow::{Context, Result};

use outlay_lib::configure::configure_file;
use outlay_lib::layout::LOCK_FILENAME;

/// Configure the project tree and write the lock file.
///
/// The lock file is only rewritten when its content changed.
pub fn cmd_configure(manifest_path: &Path) -> Result<()> {
  let config = configure_file(manifest_path).context("Configuration failed")?;
  let layout = config.layout();

  let manifest_dir = manifest_path.parent().unwrap_or(Path::new("."));
  let written = layout
    .save_if_changed(manifest_dir)
    .context("Failed to write lock file")?;

  if written {
    println!("Configured {} module(s)", layout.modules.len());
    println!("Wrote {}", manifest_dir.join(LOCK_FILENAME).display());
  } else {
    println!("Configuration up to date");
  }

  Ok(())
}
