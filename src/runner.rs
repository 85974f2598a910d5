//! The scheduler/executor: resolves a topological order, evaluates each
//! node into a fully materialized batch, and caches that batch so any
//! fan-out consumer replays the exact same records.
//!
//! Adapted from ironbeam's `runner.rs` (`run_collect`'s linear backwalk plus
//! `exec_seq`'s per-node evaluation); there is no `exec_par` counterpart
//! since §5 rules out parallel execution.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Error;
use crate::graph::{Graph, Source};
use crate::join;
use crate::observability::{NullSink, Sink};
use crate::planner::{explain, topological_order, ExecutionPlan};
use crate::value::Record;

/// Named external inputs, resolved against `Source::Input` nodes at
/// `run()` time.
pub type Bindings = HashMap<String, Vec<Record>>;

/// Run `graph` to completion and return its output records.
///
/// `bindings` supplies the records for every named source the graph's
/// ancestry depends on; a missing binding is a `Configuration` error, not a
/// panic, since it is a caller mistake discovered before any record is
/// touched. Pass `verbose: true` to trace graph/stage boundaries to stderr
/// when no `sink` is supplied.
pub fn run(graph: &Graph, bindings: &Bindings, verbose: bool) -> Result<Vec<Record>, Error> {
    #[cfg(feature = "metrics")]
    {
        if verbose {
            return run_with_sink(graph, bindings, &crate::observability::StderrSink);
        }
    }
    #[cfg(not(feature = "metrics"))]
    let _ = verbose;

    run_with_sink(graph, bindings, &NullSink)
}

/// Run `graph` reporting graph/stage boundaries to an explicit sink.
pub fn run_with_sink(graph: &Graph, bindings: &Bindings, sink: &dyn Sink) -> Result<Vec<Record>, Error> {
    let registry = graph.registry.borrow();
    let order = topological_order(&registry, graph.id());
    let mut cache: HashMap<_, Rc<Vec<Record>>> = HashMap::with_capacity(order.len());

    for id in &order {
        let node = registry.node(*id);
        sink.graph_started(&node.label);

        let mut batch: Vec<Record> = match &node.source {
            Source::Input(name) => bindings
                .get(name)
                .cloned()
                .ok_or_else(|| Error::configuration(format!("no binding supplied for source `{name}`")))?,
            Source::Upstream(parent) => (**cache.get(parent).expect("upstream evaluated before consumer")).clone(),
            Source::Join {
                left,
                right,
                keys,
                strategy,
            } => {
                let left_batch = cache.get(left).expect("join side evaluated before consumer");
                let right_batch = cache.get(right).expect("join side evaluated before consumer");
                join::execute(left_batch, right_batch, keys, *strategy).map_err(|e| e.with_stage(node.label.clone()))?
            }
        };

        for stage in &node.stages {
            sink.stage_started(&node.label, stage.label());
            batch = stage.apply(batch).map_err(|e| e.with_stage(node.label.clone()))?;
        }

        sink.graph_finished(&node.label, batch.len());
        cache.insert(*id, Rc::new(batch));
    }

    Ok((*cache.remove(&graph.id()).expect("root evaluated")).clone())
}

/// Build the execution plan `run(graph, ..., verbose: true)` would trace,
/// without evaluating anything.
pub fn explain_plan(graph: &Graph) -> ExecutionPlan {
    let registry = graph.registry.borrow();
    let order = topological_order(&registry, graph.id());
    explain(&registry, &order)
}
