//! The operator kernels that can be chained onto a [`crate::graph::Graph`]
//! node: Map, Sort, Fold, and Reduce. (Join is not a `Stage` — it combines
//! two upstream graphs into a new node's *source*, see `crate::join`.)

use crate::error::Error;
use crate::value::{compare_key_tuples, key_tuple, Record};

/// A mapper closure: zero, one, or many output records per input record.
pub type MapFn = dyn Fn(&Record) -> Result<Vec<Record>, Error>;

/// A fold step: current state by value, next input by reference, next state
/// or an `Operator` error, matching §7's requirement that a folder's errors
/// propagate like a mapper's or reducer's.
pub type FoldFn = dyn Fn(Record, &Record) -> Result<Record, Error>;

/// A reducer over one materialized maximal run of equal-key records.
pub type ReduceFn = dyn Fn(&[Record]) -> Result<Vec<Record>, Error>;

pub enum Stage {
    Map(Box<MapFn>),
    Sort {
        keys: Vec<String>,
        reverse: bool,
    },
    Fold {
        init: Record,
        step: Box<FoldFn>,
    },
    Reduce {
        keys: Vec<String>,
        reducer: Box<ReduceFn>,
    },
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Map(_) => f.debug_tuple("Map").finish(),
            Stage::Sort { keys, reverse } => f
                .debug_struct("Sort")
                .field("keys", keys)
                .field("reverse", reverse)
                .finish(),
            Stage::Fold { init, .. } => f.debug_struct("Fold").field("init", init).finish(),
            Stage::Reduce { keys, .. } => f.debug_struct("Reduce").field("keys", keys).finish(),
        }
    }
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Map(_) => "map",
            Stage::Sort { .. } => "sort",
            Stage::Fold { .. } => "fold",
            Stage::Reduce { .. } => "reduce",
        }
    }

    /// Apply this stage to a fully materialized input batch, producing the
    /// next materialized batch. Stages run single-threaded and in order; a
    /// `Stage::Sort` produces a stable order ( Rust's `sort_by` is stable,
    /// matching §4.3's "ties MUST preserve input order") regardless of
    /// `reverse`.
    pub fn apply(&self, input: Vec<Record>) -> Result<Vec<Record>, Error> {
        match self {
            Stage::Map(f) => {
                let mut out = Vec::with_capacity(input.len());
                for rec in &input {
                    out.extend(f(rec)?);
                }
                Ok(out)
            }
            Stage::Sort { keys, reverse } => {
                let mut out = input;
                let mut err = None;
                out.sort_by(|a, b| {
                    if err.is_some() {
                        return std::cmp::Ordering::Equal;
                    }
                    let (ka, kb) = match (key_tuple(a, keys), key_tuple(b, keys)) {
                        (Ok(ka), Ok(kb)) => (ka, kb),
                        (Err(e), _) | (_, Err(e)) => {
                            err = Some(e);
                            return std::cmp::Ordering::Equal;
                        }
                    };
                    match compare_key_tuples(&ka, &kb) {
                        Ok(ord) => {
                            if *reverse {
                                ord.reverse()
                            } else {
                                ord
                            }
                        }
                        Err(e) => {
                            err = Some(e);
                            std::cmp::Ordering::Equal
                        }
                    }
                });
                match err {
                    Some(e) => Err(e),
                    None => Ok(out),
                }
            }
            Stage::Fold { init, step } => {
                let mut state = init.clone();
                for rec in &input {
                    state = step(state, rec)?;
                }
                Ok(vec![state])
            }
            Stage::Reduce { keys, reducer } => apply_reduce(keys, reducer.as_ref(), &input),
        }
    }
}

/// Scan `input` for maximal runs of equal key-column values and invoke
/// `reducer` once per run, in order. `input` is assumed already grouped by
/// `keys` (typically by a preceding `Stage::Sort`); non-contiguous repeats of
/// the same key form separate groups, matching a single streaming pass.
fn apply_reduce(keys: &[String], reducer: &ReduceFn, input: &[Record]) -> Result<Vec<Record>, Error> {
    let mut out = Vec::new();
    let mut start = 0usize;
    while start < input.len() {
        let mut end = start + 1;
        let start_key = key_tuple(&input[start], keys)?;
        while end < input.len() {
            let next_key = key_tuple(&input[end], keys)?;
            if compare_key_tuples(&start_key, &next_key)? == std::cmp::Ordering::Equal {
                end += 1;
            } else {
                break;
            }
        }
        out.extend(reducer(&input[start..end])?);
        start = end;
    }
    Ok(out)
}
