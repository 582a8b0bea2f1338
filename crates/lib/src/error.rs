//! Error types for outlay-lib

use thiserror::Error;

/// Errors that can occur while configuring a project tree
#[derive(Debug, Error)]
pub enum ConfigureError {
  #[error("manifest error: {0}")]
  Manifest(#[from] crate::manifest::ManifestError),

  #[error("ordering error: {0}")]
  Ordering(#[from] crate::ordering::OrderingError),
}
