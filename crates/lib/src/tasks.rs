//! Task registry and lazy task configuration.
//!
//! The external build engine materializes tasks into this registry as modules
//! are configured. Configuration rules that must also cover tasks created
//! *after* they are declared (the compiler policy, for one) register a
//! kind-keyed configurator instead of iterating a fixed task set: the
//! configurator runs against every matching task already present and against
//! every matching task registered later.

use tracing::debug;

/// A task materialized by the build engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
  /// Task name, unique within its module by engine convention.
  pub name: String,

  /// The module the task belongs to.
  pub module: String,

  /// Task kind, e.g. a toolchain compile kind.
  pub kind: String,

  /// Argument list handed to the underlying tool.
  pub args: Vec<String>,
}

impl Task {
  /// Create a task with an initial argument list.
  pub fn new(
    name: impl Into<String>,
    module: impl Into<String>,
    kind: impl Into<String>,
    args: Vec<String>,
  ) -> Self {
    Self {
      name: name.into(),
      module: module.into(),
      kind: kind.into(),
      args,
    }
  }
}

type Configurator = Box<dyn FnMut(&mut Task)>;

/// The configuration surface tasks are materialized into.
#[derive(Default)]
pub struct TaskRegistry {
  tasks: Vec<Task>,
  configurators: Vec<(String, Configurator)>,
}

impl TaskRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Materialize a task, applying every configurator registered for its kind.
  pub fn register(&mut self, mut task: Task) -> &Task {
    for (kind, configure) in &mut self.configurators {
      if *kind == task.kind {
        configure(&mut task);
      }
    }

    debug!(name = %task.name, module = %task.module, kind = %task.kind, "task materialized");
    self.tasks.push(task);
    self.tasks.last().expect("task was just pushed")
  }

  /// Apply `configure` to every existing task of `kind` and to every matching
  /// task registered afterwards.
  pub fn configure_each(&mut self, kind: impl Into<String>, mut configure: impl FnMut(&mut Task) + 'static) {
    let kind = kind.into();

    for task in self.tasks.iter_mut().filter(|t| t.kind == kind) {
      configure(task);
    }

    self.configurators.push((kind, Box::new(configure)));
  }

  /// All materialized tasks, in registration order.
  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  /// Materialized tasks of one kind.
  pub fn tasks_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Task> {
    self.tasks.iter().filter(move |t| t.kind == kind)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn compile_task(module: &str) -> Task {
    Task::new("compileSources", module, "java-compile", vec!["-g".to_string()])
  }

  #[test]
  fn configurator_covers_existing_tasks() {
    let mut registry = TaskRegistry::new();
    registry.register(compile_task("app"));

    registry.configure_each("java-compile", |task| task.args.push("-verbose".to_string()));

    assert_eq!(registry.tasks()[0].args, vec!["-g", "-verbose"]);
  }

  #[test]
  fn configurator_covers_tasks_registered_later() {
    let mut registry = TaskRegistry::new();
    registry.configure_each("java-compile", |task| task.args.push("-verbose".to_string()));

    let task = registry.register(compile_task("core"));

    assert_eq!(task.args, vec!["-g", "-verbose"]);
  }

  #[test]
  fn other_kinds_are_untouched() {
    let mut registry = TaskRegistry::new();
    registry.configure_each("java-compile", |task| task.args.push("-verbose".to_string()));

    let task = registry.register(Task::new("package", "app", "package", Vec::new()));

    assert!(task.args.is_empty());
  }

  #[test]
  fn all_configurators_for_a_kind_apply() {
    let mut registry = TaskRegistry::new();
    registry.configure_each("java-compile", |task| task.args.push("-a".to_string()));
    registry.configure_each("java-compile", |task| task.args.push("-b".to_string()));

    let task = registry.register(Task::new("compileSources", "app", "java-compile", Vec::new()));

    assert_eq!(task.args, vec!["-a", "-b"]);
  }

  #[test]
  fn tasks_of_kind_filters() {
    let mut registry = TaskRegistry::new();
    registry.register(compile_task("app"));
    registry.register(Task::new("package", "app", "package", Vec::new()));
    registry.register(compile_task("core"));

    assert_eq!(registry.tasks_of_kind("java-compile").count(), 2);
    assert_eq!(registry.tasks_of_kind("package").count(), 1);
  }
}
