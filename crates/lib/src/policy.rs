//! Uniform compiler-flag policy.
//!
//! The policy is a fixed, immutable set of compiler arguments applied
//! identically to every compilation task of one toolchain kind, across all
//! modules. Application is additive: flags are appended to whatever arguments
//! a task already carries, never replacing them.

use crate::consts::{COMPILER_POLICY_FLAGS, JAVA_COMPILE};
use crate::tasks::TaskRegistry;

/// A fixed set of compiler arguments for one task kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerPolicy {
  kind: String,
  flags: Vec<String>,
}

impl CompilerPolicy {
  /// Create a policy for an arbitrary task kind.
  pub fn new(kind: impl Into<String>, flags: Vec<String>) -> Self {
    Self {
      kind: kind.into(),
      flags,
    }
  }

  /// The default policy: suppress the toolchain's option-compatibility
  /// warning class on every compile task.
  pub fn suppress_option_warnings() -> Self {
    Self::new(
      JAVA_COMPILE,
      COMPILER_POLICY_FLAGS.iter().map(|f| f.to_string()).collect(),
    )
  }

  /// The task kind this policy matches.
  pub fn kind(&self) -> &str {
    &self.kind
  }

  /// The flags appended to matching tasks.
  pub fn flags(&self) -> &[String] {
    &self.flags
  }

  /// Install the policy on a registry.
  ///
  /// Flags are appended to every matching task already materialized and to
  /// every matching task registered afterwards.
  pub fn install(&self, registry: &mut TaskRegistry) {
    let flags = self.flags.clone();
    registry.configure_each(self.kind.clone(), move |task| {
      task.args.extend(flags.iter().cloned());
    });
  }
}
