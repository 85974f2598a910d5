//! `compgraph` — a miniature dataflow engine for composing and executing
//! computational graphs over streams of structured records.
//!
//! A [`graph::Graph`] is a handle into a [`graph::GraphBuilder`]'s DAG: call
//! [`graph::Graph::map`], [`graph::Graph::sort`], [`graph::Graph::fold`],
//! [`graph::Graph::reduce`], or [`graph::Graph::join`] to chain an operator
//! onto it, then hand the result to [`runner::run`] with a [`runner::Bindings`]
//! map supplying each named source's input records.
//!
//! ```
//! use compgraph::graph::GraphBuilder;
//! use compgraph::runner::{run, Bindings};
//! use compgraph::value::{record, Value};
//!
//! let builder = GraphBuilder::new();
//! let doubled = builder.source("numbers").map(|rec| {
//!     let n = match rec.get("n") {
//!         Some(Value::Int(n)) => *n,
//!         _ => return Err(compgraph::error::Error::schema("expected int column `n`")),
//!     };
//!     Ok(vec![record([("n", Value::Int(n * 2))])])
//! });
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("numbers".into(), vec![record([("n", Value::Int(21))])]);
//!
//! let out = run(&doubled, &bindings, false).unwrap();
//! assert_eq!(out[0]["n"], Value::Int(42));
//! ```

pub mod error;
pub mod graph;
mod graph_id;
pub mod io;
pub mod join;
pub mod observability;
pub mod planner;
pub mod runner;
pub mod stage;
pub mod testing;
pub mod value;

pub use error::Error;
pub use graph::{Graph, GraphBuilder};
pub use join::JoinStrategy;
pub use runner::{run, Bindings};
pub use value::{Record, Value};
