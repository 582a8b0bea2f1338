//! Configuration orchestration.
//!
//! Runs the configuration steps over a project tree in declaration order:
//! repository registration, evaluation-ordering validation, output
//! relocation, compiler policy, clean-task registration. All steps execute
//! single-threaded and synchronously; any parallelism in actual compilation
//! belongs to the external build engine.

use std::path::Path;

use tracing::info;

use crate::clean::CleanTask;
use crate::consts::EVALUATION_ANCHOR;
use crate::error::ConfigureError;
use crate::layout::{LOCK_VERSION, ResolvedLayout};
use crate::manifest::ProjectManifest;
use crate::ordering::EvaluationGraph;
use crate::policy::CompilerPolicy;
use crate::project::ProjectTree;
use crate::relocate::relocate_outputs;
use crate::repos::register_repositories;
use crate::tasks::TaskRegistry;

/// A fully configured project tree.
pub struct Configuration {
  /// The tree with repositories registered and outputs relocated.
  pub tree: ProjectTree,

  /// The configuration-order constraint between modules.
  pub evaluation: EvaluationGraph,

  /// The compiler policy installed on the task registry.
  pub policy: CompilerPolicy,

  /// The surface the engine materializes tasks into.
  pub tasks: TaskRegistry,

  /// The registered clean task, bound to the shared output root.
  pub clean: CleanTask,
}

/// Configure a project tree from its manifest.
///
/// The evaluation ordering is validated before anything else mutates the
/// tree: a missing anchor halts configuration with no output path rebound
/// and no clean task registered.
pub fn configure(manifest: &ProjectManifest) -> Result<Configuration, ConfigureError> {
  let mut tree = ProjectTree::from_manifest(manifest);

  register_repositories(&mut tree);

  let evaluation = EvaluationGraph::from_modules(&manifest.modules, EVALUATION_ANCHOR)?;

  relocate_outputs(&mut tree);

  let mut tasks = TaskRegistry::new();
  let policy = CompilerPolicy::suppress_option_warnings();
  policy.install(&mut tasks);

  let clean = CleanTask::new(tree.output_dir.clone());

  info!(
    project = %manifest.name,
    modules = tree.modules.len(),
    output_root = %tree.output_dir.display(),
    "project configured"
  );

  Ok(Configuration {
    tree,
    evaluation,
    policy,
    tasks,
    clean,
  })
}

/// Load a manifest from disk and configure the project tree it declares.
pub fn configure_file(manifest_path: &Path) -> Result<Configuration, ConfigureError> {
  let manifest = ProjectManifest::load(manifest_path)?;
  configure(&manifest)
}

impl Configuration {
  /// The serializable view of this configuration, for the lock file.
  pub fn layout(&self) -> ResolvedLayout {
    let modules = self
      .tree
      .modules
      .iter()
      .map(|m| (m.name.clone(), m.output_dir.clone()))
      .collect();

    ResolvedLayout {
      version: LOCK_VERSION,
      output_root: self.tree.output_dir.clone(),
      modules,
      evaluation_order: self.evaluation.evaluation_order(),
      repositories: self.tree.repositories.clone(),
    }
  }
}
