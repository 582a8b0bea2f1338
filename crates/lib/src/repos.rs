//! Artifact repository registration.
//!
//! Every node in the project tree (the root and each module) receives the
//! same two artifact sources: the vendor binary repository and the public
//! artifact repository. Registration is purely additive and idempotent;
//! actual dependency resolution belongs to the external build engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::project::ProjectTree;

/// An artifact source modules may resolve dependencies from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRepository {
  /// Short name used in logs and the resolved layout.
  pub name: String,

  /// Base URL of the repository index.
  pub url: String,
}

impl ArtifactRepository {
  /// The vendor-provided binary repository.
  pub fn vendor() -> Self {
    Self {
      name: "vendor".to_string(),
      url: "https://maven.google.com".to_string(),
    }
  }

  /// The general public artifact repository.
  pub fn central() -> Self {
    Self {
      name: "central".to_string(),
      url: "https://repo.maven.apache.org/maven2".to_string(),
    }
  }
}

/// The fixed set of repositories every project node receives.
pub fn default_repositories() -> Vec<ArtifactRepository> {
  vec![ArtifactRepository::vendor(), ArtifactRepository::central()]
}

/// Register the default repositories on the root project and every module.
///
/// Registering an already-present URL is a no-op, so running this twice
/// leaves the tree unchanged.
pub fn register_repositories(tree: &mut ProjectTree) {
  for repo in default_repositories() {
    add_if_absent(&mut tree.repositories, repo);
  }

  for module in &mut tree.modules {
    for repo in default_repositories() {
      add_if_absent(&mut module.repositories, repo);
    }
  }

  debug!(modules = tree.modules.len(), "registered artifact repositories");
}

fn add_if_absent(repos: &mut Vec<ArtifactRepository>, repo: ArtifactRepository) {
  if !repos.iter().any(|r| r.url == repo.url) {
    repos.push(repo);
  }
}
