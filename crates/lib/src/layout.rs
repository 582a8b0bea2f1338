//! Resolved configuration layout.
//!
//! The lock file (`outlay.lock`) records the configuration the external build
//! engine consumes: the shared output root, per-module output directories,
//! the evaluation order, and the registered repositories. It's stored in the
//! same directory as the project manifest.
//!
//! # Lock File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "output_root": "/work/proj/build",
//!   "modules": {
//!     "app": "/work/proj/build/app",
//!     "core": "/work/proj/build/core"
//!   },
//!   "evaluation_order": ["app", "core"],
//!   "repositories": [
//!     { "name": "vendor", "url": "https://maven.google.com" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repos::ArtifactRepository;

/// Current lock file format version.
pub const LOCK_VERSION: u32 = 1;

/// Lock file name.
pub const LOCK_FILENAME: &str = "outlay.lock";

/// The serializable product of configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLayout {
  /// Lock file format version.
  pub version: u32,

  /// Shared output root for the whole tree.
  pub output_root: PathBuf,

  /// Module name to relocated output directory.
  pub modules: BTreeMap<String, PathBuf>,

  /// Configuration evaluation order (anchor first).
  pub evaluation_order: Vec<String>,

  /// Artifact repositories registered on every node.
  pub repositories: Vec<ArtifactRepository>,
}

/// Errors that can occur when working with lock files.
#[derive(Debug, Error)]
pub enum LayoutError {
  /// Failed to read the lock file.
  #[error("failed to read lock file: {0}")]
  Read(#[source] io::Error),

  /// Failed to write the lock file.
  #[error("failed to write lock file: {0}")]
  Write(#[source] io::Error),

  /// Failed to parse the lock file JSON.
  #[error("failed to parse lock file: {0}")]
  Parse(#[source] serde_json::Error),

  /// Failed to serialize the lock file.
  #[error("failed to serialize lock file: {0}")]
  Serialize(#[source] serde_json::Error),
}

impl ResolvedLayout {
  /// Load the lock file from a directory, if present.
  pub fn load(dir: &Path) -> Result<Option<Self>, LayoutError> {
    let path = dir.join(LOCK_FILENAME);
    if !path.exists() {
      return Ok(None);
    }

    let text = fs::read_to_string(&path).map_err(LayoutError::Read)?;
    let layout = serde_json::from_str(&text).map_err(LayoutError::Parse)?;
    Ok(Some(layout))
  }

  /// Write the lock file into a directory if its content changed.
  ///
  /// Returns `true` when the file was written, `false` when the on-disk
  /// content was already up to date.
  pub fn save_if_changed(&self, dir: &Path) -> Result<bool, LayoutError> {
    let path = dir.join(LOCK_FILENAME);
    let mut text = serde_json::to_string_pretty(self).map_err(LayoutError::Serialize)?;
    text.push('\n');

    if let Ok(existing) = fs::read_to_string(&path)
      && existing == text
    {
      return Ok(false);
    }

    fs::write(&path, text).map_err(LayoutError::Write)?;
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::repos::default_repositories;
  use tempfile::TempDir;

  fn sample_layout() -> ResolvedLayout {
    let mut modules = BTreeMap::new();
    modules.insert("app".to_string(), PathBuf::from("/work/proj/build/app"));
    modules.insert("core".to_string(), PathBuf::from("/work/proj/build/core"));

    ResolvedLayout {
      version: LOCK_VERSION,
      output_root: PathBuf::from("/work/proj/build"),
      modules,
      evaluation_order: vec!["app".to_string(), "core".to_string()],
      repositories: default_repositories(),
    }
  }

  #[test]
  fn save_and_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let layout = sample_layout();

    assert!(layout.save_if_changed(temp.path()).unwrap());

    let loaded = ResolvedLayout::load(temp.path()).unwrap().unwrap();
    assert_eq!(loaded, layout);
  }

  #[test]
  fn unchanged_content_is_not_rewritten() {
    let temp = TempDir::new().unwrap();
    let layout = sample_layout();

    assert!(layout.save_if_changed(temp.path()).unwrap());
    assert!(!layout.save_if_changed(temp.path()).unwrap());
  }

  #[test]
  fn changed_content_is_rewritten() {
    let temp = TempDir::new().unwrap();
    let mut layout = sample_layout();

    assert!(layout.save_if_changed(temp.path()).unwrap());

    layout.evaluation_order.push("ui".to_string());
    assert!(layout.save_if_changed(temp.path()).unwrap());
  }

  #[test]
  fn load_without_lock_file_is_none() {
    let temp = TempDir::new().unwrap();
    assert!(ResolvedLayout::load(temp.path()).unwrap().is_none());
  }
}
