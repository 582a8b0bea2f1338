//! Evaluation ordering between modules.
//!
//! Some modules' configuration reads values that are only finalized once the
//! anchor module has configured itself. The [`EvaluationGraph`] records that
//! constraint explicitly: one edge anchor → module per non-anchor module,
//! meaning "the anchor is evaluated before this module". The edge affects
//! configuration-time evaluation only, never the later task execution order.
//!
//! The graph is validated at construction time: an anchor that is not among
//! the declared modules is a fatal configuration error, raised before any
//! output path is rebound.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building the evaluation graph.
#[derive(Debug, Error)]
pub enum OrderingError {
  /// The anchor module is not among the declared modules.
  #[error("evaluation anchor '{anchor}' is not a declared module")]
  AnchorNotFound { anchor: String },

  /// The graph contains a cycle.
  #[error("cycle detected in evaluation graph")]
  CycleDetected,
}

/// The configuration-order constraint between modules.
///
/// Edges run from the anchor to each dependent module (dependency to
/// dependent), so a topological order always evaluates the anchor first.
#[derive(Debug)]
pub struct EvaluationGraph {
  /// The underlying graph; node weights are module names.
  graph: DiGraph<String, ()>,

  /// Map from module name to node index.
  nodes: HashMap<String, NodeIndex>,

  /// The anchor module every other module is configured after.
  anchor: String,
}

impl EvaluationGraph {
  /// Build the evaluation graph for a module set.
  ///
  /// Duplicate sibling names share one node, so the one-edge-per-module
  /// invariant holds regardless of declaration noise.
  ///
  /// # Errors
  ///
  /// Returns `AnchorNotFound` if `anchor` is not among `modules`. Nothing is
  /// partially constructed in that case.
  pub fn from_modules<S: AsRef<str>>(modules: &[S], anchor: &str) -> Result<Self, OrderingError> {
    let mut graph = DiGraph::new();
    let mut nodes = HashMap::new();

    for module in modules {
      let name = module.as_ref().to_string();
      if nodes.contains_key(&name) {
        continue;
      }
      let idx = graph.add_node(name.clone());
      nodes.insert(name, idx);
    }

    let Some(&anchor_idx) = nodes.get(anchor) else {
      return Err(OrderingError::AnchorNotFound {
        anchor: anchor.to_string(),
      });
    };

    // Edge from the anchor to each dependent: anchor is evaluated first.
    let indices: Vec<NodeIndex> = graph.node_indices().collect();
    for idx in indices {
      if graph[idx] != anchor {
        graph.add_edge(anchor_idx, idx, ());
      }
    }

    let ordering = Self {
      graph,
      nodes,
      anchor: anchor.to_string(),
    };

    // Verify no cycles
    ordering.verify_acyclic()?;

    debug!(
      modules = ordering.nodes.len(),
      anchor, "evaluation ordering declared"
    );
    Ok(ordering)
  }

  /// Verify that the graph is acyclic.
  fn verify_acyclic(&self) -> Result<(), OrderingError> {
    toposort(&self.graph, None).map_err(|_| OrderingError::CycleDetected)?;
    Ok(())
  }

  /// The anchor module name.
  pub fn anchor(&self) -> &str {
    &self.anchor
  }

  /// Number of distinct modules in the graph.
  pub fn module_count(&self) -> usize {
    self.nodes.len()
  }

  /// Whether a module is part of the graph.
  pub fn contains(&self, module: &str) -> bool {
    self.nodes.contains_key(module)
  }

  /// The module a given module must be configured after, if any.
  ///
  /// Returns `None` for the anchor itself and for unknown names.
  pub fn configured_after(&self, module: &str) -> Option<&str> {
    let &idx = self.nodes.get(module)?;
    self
      .graph
      .neighbors_directed(idx, Direction::Incoming)
      .next()
      .map(|pred| self.graph[pred].as_str())
  }

  /// All declared edges as (module, configured-after) pairs.
  pub fn edges(&self) -> Vec<(String, String)> {
    let mut edges = Vec::new();
    for edge in self.graph.edge_indices() {
      if let Some((from, to)) = self.graph.edge_endpoints(edge) {
        edges.push((self.graph[to].clone(), self.graph[from].clone()));
      }
    }
    edges
  }

  /// Modules in evaluation order: the anchor first, then the remaining
  /// modules in declaration order.
  pub fn evaluation_order(&self) -> Vec<String> {
    let mut order = vec![self.anchor.clone()];
    for idx in self.graph.node_indices() {
      if self.graph[idx] != self.anchor {
        order.push(self.graph[idx].clone());
      }
    }
    order
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_module_is_configured_after_the_anchor() {
    let graph = EvaluationGraph::from_modules(&["app", "core", "ui"], "app").unwrap();

    assert_eq!(graph.configured_after("core"), Some("app"));
    assert_eq!(graph.configured_after("ui"), Some("app"));
    assert_eq!(graph.configured_after("app"), None);
  }

  #[test]
  fn edges_exist_exactly_once_per_module() {
    let graph = EvaluationGraph::from_modules(&["app", "core", "ui"], "app").unwrap();

    let mut edges = graph.edges();
    edges.sort();
    assert_eq!(
      edges,
      vec![
        ("core".to_string(), "app".to_string()),
        ("ui".to_string(), "app".to_string()),
      ]
    );
  }

  #[test]
  fn missing_anchor_fails_fast() {
    let result = EvaluationGraph::from_modules(&["lib"], "app");

    let err = result.unwrap_err();
    assert!(matches!(err, OrderingError::AnchorNotFound { ref anchor } if anchor == "app"));
    assert_eq!(err.to_string(), "evaluation anchor 'app' is not a declared module");
  }

  #[test]
  fn anchor_alone_is_valid() {
    let graph = EvaluationGraph::from_modules(&["app"], "app").unwrap();

    assert_eq!(graph.module_count(), 1);
    assert!(graph.edges().is_empty());
    assert_eq!(graph.evaluation_order(), vec!["app"]);
  }

  #[test]
  fn evaluation_order_is_anchor_then_declaration_order() {
    let graph = EvaluationGraph::from_modules(&["core", "app", "ui"], "app").unwrap();

    assert_eq!(graph.evaluation_order(), vec!["app", "core", "ui"]);
  }

  #[test]
  fn duplicate_sibling_names_share_one_node() {
    let graph = EvaluationGraph::from_modules(&["app", "core", "core"], "app").unwrap();

    assert_eq!(graph.module_count(), 2);
    assert_eq!(graph.edges().len(), 1);
  }

  #[test]
  fn contains_reports_declared_modules() {
    let graph = EvaluationGraph::from_modules(&["app", "core"], "app").unwrap();

    assert!(graph.contains("core"));
    assert!(!graph.contains("ui"));
  }
}
