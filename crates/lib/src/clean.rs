//! Deletion of the shared output tree.
//!
//! The clean task is the only configured component with an externally
//! triggerable runtime effect. It is registered during configuration, bound
//! to the shared output root, and does nothing until explicitly invoked.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Name of the registered clean task.
pub const CLEAN_TASK_NAME: &str = "clean";

/// Errors that can occur while cleaning.
#[derive(Debug, Error)]
pub enum CleanError {
  /// The recursive delete failed (permissions, held locks).
  #[error("failed to delete {path}: {source}")]
  Delete {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Outcome of one clean invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanResult {
  /// The output root the task operated on.
  pub path: PathBuf,

  /// Whether the tree existed before the invocation.
  pub existed: bool,

  /// Total size of the files deleted (or, in dry-run mode, that would be).
  pub bytes_freed: u64,
}

/// The registered clean task, bound to the shared output root.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTask {
  output_root: PathBuf,
}

impl CleanTask {
  pub fn new(output_root: impl Into<PathBuf>) -> Self {
    Self {
      output_root: output_root.into(),
    }
  }

  /// The tree this task deletes.
  pub fn output_root(&self) -> &Path {
    &self.output_root
  }

  /// Delete the output tree recursively.
  ///
  /// Deleting an absent tree is a no-op success, so invoking the task twice
  /// in succession succeeds both times. With `dry_run` the tree is left in
  /// place and only the accounting is reported. A failed delete propagates
  /// as [`CleanError::Delete`] with no retry and no partial-success
  /// reporting.
  pub fn run(&self, dry_run: bool) -> Result<CleanResult, CleanError> {
    if !self.output_root.exists() {
      debug!(path = %self.output_root.display(), "output tree absent, nothing to clean");
      return Ok(CleanResult {
        path: self.output_root.clone(),
        existed: false,
        bytes_freed: 0,
      });
    }

    let bytes_freed = dir_size(&self.output_root);

    if !dry_run {
      fs::remove_dir_all(&self.output_root).map_err(|source| CleanError::Delete {
        path: self.output_root.clone(),
        source,
      })?;
    }

    info!(
      path = %self.output_root.display(),
      bytes_freed,
      dry_run,
      "clean complete"
    );

    Ok(CleanResult {
      path: self.output_root.clone(),
      existed: true,
      bytes_freed,
    })
  }
}

fn dir_size(path: &Path) -> u64 {
  WalkDir::new(path)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .filter_map(|e| e.metadata().ok())
    .map(|m| m.len())
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn populate(root: &Path) {
    fs::create_dir_all(root.join("app")).unwrap();
    fs::create_dir_all(root.join("core")).unwrap();
    fs::write(root.join("app").join("classes.bin"), b"0123456789").unwrap();
    fs::write(root.join("core").join("classes.bin"), b"01234").unwrap();
  }

  #[test]
  fn deletes_the_whole_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("build");
    populate(&root);

    let result = CleanTask::new(&root).run(false).unwrap();

    assert!(result.existed);
    assert_eq!(result.bytes_freed, 15);
    assert!(!root.exists());
  }

  #[test]
  fn absent_tree_is_a_noop_success() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("build");

    let result = CleanTask::new(&root).run(false).unwrap();

    assert!(!result.existed);
    assert_eq!(result.bytes_freed, 0);
  }

  #[test]
  fn cleaning_twice_succeeds_both_times() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("build");
    populate(&root);

    let task = CleanTask::new(&root);
    let first = task.run(false).unwrap();
    assert!(first.existed);
    assert!(!root.exists());

    let second = task.run(false).unwrap();
    assert!(!second.existed);
  }

  #[test]
  fn dry_run_leaves_the_tree_in_place() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("build");
    populate(&root);

    let result = CleanTask::new(&root).run(true).unwrap();

    assert!(result.existed);
    assert_eq!(result.bytes_freed, 15);
    assert!(root.exists());
    assert!(root.join("app").join("classes.bin").exists());
  }
}
