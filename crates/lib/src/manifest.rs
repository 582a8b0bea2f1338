//! Project manifest loading.
//!
//! The manifest (`outlay.toml`) is the static project-tree definition consumed
//! by configuration: the project root and the ordered list of module names.
//! It's stored at the top of the directory tree being configured.
//!
//! # Format
//!
//! ```toml
//! [project]
//! name = "handheld"
//! root = "android"
//! modules = ["app", "core", "ui"]
//! ```
//!
//! `root` is resolved against the manifest's directory; when absent, the
//! manifest's directory itself is the project root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Project manifest file name.
pub const MANIFEST_FILENAME: &str = "outlay.toml";

/// The static project-tree definition.
///
/// The module set is fixed before configuration begins; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectManifest {
  /// Project name, for display.
  pub name: String,

  /// Absolute project root.
  pub root_dir: PathBuf,

  /// Declared module names, in declaration order.
  ///
  /// Names are unique among siblings by convention; duplicates are not
  /// rejected here.
  pub modules: Vec<String>,
}

/// Errors that can occur when loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// Failed to read the manifest file.
  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to parse the manifest TOML.
  #[error("failed to parse manifest: {0}")]
  Parse(#[source] toml::de::Error),

  /// The manifest declares no modules.
  #[error("manifest declares no modules")]
  NoModules,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
  project: RawProject,
}

#[derive(Debug, Deserialize)]
struct RawProject {
  name: Option<String>,
  root: Option<PathBuf>,
  modules: Vec<String>,
}

impl ProjectManifest {
  /// Create a manifest directly from its parts.
  ///
  /// `root_dir` is taken as-is; callers are expected to pass an absolute
  /// path. Fails if `modules` is empty.
  pub fn new(
    name: impl Into<String>,
    root_dir: impl Into<PathBuf>,
    modules: Vec<String>,
  ) -> Result<Self, ManifestError> {
    if modules.is_empty() {
      return Err(ManifestError::NoModules);
    }

    Ok(Self {
      name: name.into(),
      root_dir: root_dir.into(),
      modules,
    })
  }

  /// Load a manifest from a TOML file.
  ///
  /// A relative `root` resolves against the manifest's directory; an absent
  /// one means the directory itself.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let raw: RawManifest = toml::from_str(&text).map_err(ManifestError::Parse)?;
    let manifest_dir = path.parent().unwrap_or(Path::new("."));

    let root_dir = match raw.project.root {
      Some(root) if root.is_absolute() => root,
      Some(root) => manifest_dir.join(root),
      None => manifest_dir.to_path_buf(),
    };

    let name = raw.project.name.unwrap_or_else(|| {
      root_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
    });

    Self::new(name, root_dir, raw.project.modules)
  }
}
