//! The graph builder: a DAG of coarse-grained `Graph` nodes, each an ordered
//! list of [`Stage`]s reading from one source.
//!
//! Adapted from ironbeam's `Pipeline`/`NodeId` split: a `Pipeline` there owns
//! a `HashMap<NodeId, Node>` behind `Arc<Mutex<_>>` because its executor can
//! fan work out across threads. Nothing here runs in parallel (§5), so the
//! registry is a plain `Vec<Node>` behind `Rc<RefCell<_>>` and handles are
//! `GraphId`s rather than owning references — the same shape, a cheaper lock.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;
use crate::graph_id::GraphId;
use crate::join::JoinStrategy;
use crate::stage::{FoldFn, MapFn, ReduceFn, Stage};
use crate::value::Record;

#[derive(Debug)]
pub(crate) enum Source {
    /// An externally bound input, resolved by name at `run()` time.
    Input(String),
    /// The output of another node in the same registry.
    Upstream(GraphId),
    /// The sort-merge join of two nodes in the same registry.
    Join {
        left: GraphId,
        right: GraphId,
        keys: Vec<String>,
        strategy: JoinStrategy,
    },
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) source: Source,
    pub(crate) stages: Vec<Stage>,
    pub(crate) label: String,
}

#[derive(Default, Debug)]
pub(crate) struct Registry {
    nodes: Vec<Node>,
}

impl Registry {
    fn insert(&mut self, node: Node) -> GraphId {
        let id = GraphId::new(self.nodes.len() as u64);
        self.nodes.push(node);
        id
    }

    pub(crate) fn node(&self, id: GraphId) -> &Node {
        &self.nodes[id.raw() as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Owns the shared registry that every `Graph` built from it is a handle
/// into. Graphs from two different builders cannot be joined.
#[derive(Clone, Default)]
pub struct GraphBuilder {
    registry: Rc<RefCell<Registry>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    /// Declare a graph whose records are bound by name at `run()` time.
    pub fn source(&self, name: impl Into<String>) -> Graph {
        let name = name.into();
        let label = format!("source({name})");
        let id = self.registry.borrow_mut().insert(Node {
            source: Source::Input(name),
            stages: Vec::new(),
            label,
        });
        Graph {
            registry: self.registry.clone(),
            id,
        }
    }
}

/// A handle into a [`GraphBuilder`]'s registry: one DAG node plus the
/// ordered stages applied to its source before this handle's output.
#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) registry: Rc<RefCell<Registry>>,
    pub(crate) id: GraphId,
}

impl Graph {
    pub(crate) fn id(&self) -> GraphId {
        self.id
    }

    fn chain(&self, stage: Stage, label: impl Into<String>) -> Graph {
        let id = self.registry.borrow_mut().insert(Node {
            source: Source::Upstream(self.id),
            stages: vec![stage],
            label: label.into(),
        });
        Graph {
            registry: self.registry.clone(),
            id,
        }
    }

    /// Apply `f` to every input record, emitting zero, one, or many output
    /// records per input, in input order.
    pub fn map<F>(&self, f: F) -> Graph
    where
        F: Fn(&Record) -> Result<Vec<Record>, Error> + 'static,
    {
        let n = self.registry.borrow().len();
        self.chain(Stage::Map(Box::new(f) as Box<MapFn>), format!("map#{n}"))
    }

    /// Stable-sort by the given key columns, ascending (`Null` first) unless
    /// `reverse` is set, in which case the order is descending (`Null`
    /// last). Ties always preserve input order either way.
    pub fn sort<I, S>(&self, keys: I, reverse: bool) -> Graph
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let n = self.registry.borrow().len();
        self.chain(Stage::Sort { keys, reverse }, format!("sort#{n}"))
    }

    /// Fold the whole input down to a single record, starting from `init`.
    pub fn fold<F>(&self, init: Record, step: F) -> Graph
    where
        F: Fn(Record, &Record) -> Result<Record, Error> + 'static,
    {
        let n = self.registry.borrow().len();
        self.chain(
            Stage::Fold {
                init,
                step: Box::new(step) as Box<FoldFn>,
            },
            format!("fold#{n}"),
        )
    }

    /// Apply `reducer` to each maximal run of equal-`keys` records. The
    /// input is assumed already grouped by `keys`, typically by a preceding
    /// [`Graph::sort`] over the same columns.
    pub fn reduce<I, S, F>(&self, keys: I, reducer: F) -> Graph
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[Record]) -> Result<Vec<Record>, Error> + 'static,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let n = self.registry.borrow().len();
        self.chain(
            Stage::Reduce {
                keys,
                reducer: Box::new(reducer) as Box<ReduceFn>,
            },
            format!("reduce#{n}"),
        )
    }

    /// Sort-merge join `self` (left) with `other` (right) on `keys`.
    ///
    /// Both sides are assumed already sorted by `keys`. `keys` is ignored
    /// for [`JoinStrategy::Cross`]. Fails with `Error::Configuration` if
    /// `self` and `other` were built from different [`GraphBuilder`]s.
    pub fn join<I, S>(&self, other: &Graph, keys: I, strategy: JoinStrategy) -> Result<Graph, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !Rc::ptr_eq(&self.registry, &other.registry) {
            return Err(Error::configuration(
                "cannot join graphs built from different GraphBuilders",
            ));
        }
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let n = self.registry.borrow().len();
        let label = format!("join#{n}");
        let id = self.registry.borrow_mut().insert(Node {
            source: Source::Join {
                left: self.id,
                right: other.id,
                keys,
                strategy,
            },
            stages: Vec::new(),
            label,
        });
        Ok(Graph {
            registry: self.registry.clone(),
            id,
        })
    }
}
