//! Informational observability, following the narrowed shape ironbeam's
//! `metrics` module takes when there is no process-wide collector to report
//! into: a sink trait passed explicitly into `run()`, never a global.
//!
//! A sink is consulted purely for reporting. Nothing here ever influences
//! scheduling or correctness — swapping sinks must never change a run's
//! output.

/// Reports graph/stage boundaries as a `run()` call crosses them.
pub trait Sink {
    fn graph_started(&self, _label: &str) {}
    fn graph_finished(&self, _label: &str, _record_count: usize) {}
    fn stage_started(&self, _graph_label: &str, _stage_label: &str) {}
}

/// Discards every event; the default when no sink is supplied and
/// `verbose` is `false`.
#[derive(Default)]
pub struct NullSink;

impl Sink for NullSink {}

/// Prints a one-line trace of each graph/stage boundary to stderr, used
/// when `run(..., verbose: true, ...)` is requested without an explicit
/// sink. Gated behind the `metrics` feature; without it `verbose` is
/// accepted but has no sink to report through and behaves like `false`.
#[cfg(feature = "metrics")]
#[derive(Default)]
pub struct StderrSink;

#[cfg(feature = "metrics")]
impl Sink for StderrSink {
    fn graph_started(&self, label: &str) {
        eprintln!("[compgraph] start {label}");
    }

    fn graph_finished(&self, label: &str, record_count: usize) {
        eprintln!("[compgraph] done  {label} -> {record_count} record(s)");
    }

    fn stage_started(&self, graph_label: &str, stage_label: &str) {
        eprintln!("[compgraph]   {graph_label} applying {stage_label}");
    }
}
