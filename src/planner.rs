//! Topological ordering of the nodes a `run()` call needs to evaluate,
//! plus an optional human-readable execution plan for verbose mode.
//!
//! Adapted from ironbeam's `planner.rs`: that module also runs a fusion
//! optimizer over a fine-grained stateless-op chain, which has no analogue
//! here (a `Graph` node already holds its full stage list), so only the
//! ordering and reporting halves survive.

use std::collections::HashSet;
use std::fmt;

use crate::graph::{Registry, Source};
use crate::graph_id::GraphId;

/// The order in which nodes must be evaluated so every upstream is ready
/// before its consumer runs, computed by post-order DFS from `root`
/// (mirrors the original engine's stack-based `_topological_sort`).
pub(crate) fn topological_order(registry: &Registry, root: GraphId) -> Vec<GraphId> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    visit(registry, root, &mut visited, &mut order);
    order
}

fn visit(registry: &Registry, id: GraphId, visited: &mut HashSet<GraphId>, order: &mut Vec<GraphId>) {
    if !visited.insert(id) {
        return;
    }
    match &registry.node(id).source {
        Source::Input(_) => {}
        Source::Upstream(parent) => visit(registry, *parent, visited, order),
        Source::Join { left, right, .. } => {
            visit(registry, *left, visited, order);
            visit(registry, *right, visited, order);
        }
    }
    order.push(id);
}

/// A human-readable rundown of the nodes a `run()` call will visit, printed
/// by the `verbose` stderr sink (see `observability`).
pub struct ExecutionPlan {
    pub steps: Vec<String>,
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "execution plan ({} node(s)):", self.steps.len())?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {:>2}. {step}", i + 1)?;
        }
        Ok(())
    }
}

pub(crate) fn explain(registry: &Registry, order: &[GraphId]) -> ExecutionPlan {
    let steps = order
        .iter()
        .map(|id| {
            let node = registry.node(*id);
            let source = match &node.source {
                Source::Input(name) => format!("input `{name}`"),
                Source::Upstream(_) => "upstream".to_string(),
                Source::Join { strategy, keys, .. } => {
                    format!("join({strategy:?}, keys={keys:?})")
                }
            };
            let stages: Vec<&str> = node.stages.iter().map(|s| s.label()).collect();
            format!("{} <- {source} [{}]", node.label, stages.join(", "))
        })
        .collect();
    ExecutionPlan { steps }
}
