//! Sort-merge join kernel.
//!
//! Grounded in the original computational-graph engine's `Join` class
//! (`_join`, `_cross_join`, `_get_next_table_part`, and the three
//! `_cartesian_product_*` helpers for the non-equal-key tails): both
//! `left` and `right` are assumed already sorted by `keys` — this kernel
//! merges, it does not sort. A preceding `Stage::Sort` on each side is the
//! caller's responsibility, mirroring the source pipelines that always
//! `.sort(keys)` each side before `.join(...)`.
//!
//! The collision set is the full intersection of first-record column names
//! on each side (`_left_table_keys & _right_table_keys` in the original),
//! which includes the key columns themselves: a key column, present on both
//! sides under the same name, always collides and is always emitted as
//! `<key>_left`/`<key>_right`, never as a bare `<key>`. Missing-side columns
//! in an outer join are filled with `Value::Null` rather than omitted, so
//! every output record shares one schema.

use std::cmp::Ordering;

use indexmap::IndexSet;

use crate::error::Error;
use crate::value::{compare_key_tuples, key_tuple, Record, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinStrategy {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// Sort-merge join two already key-sorted record batches.
///
/// Per the kernel's pre-pass (kept as originally specified): for every
/// strategy other than `Cross`, an empty `left` or `right` batch makes the
/// join produce nothing, even for `Left`/`Right`/`Full` where one might
/// expect the non-empty side to pass through with nulls. This is a
/// deliberate fidelity choice, not an oversight.
///
/// A non-`Cross` strategy requires at least one key column.
pub fn execute(
    left: &[Record],
    right: &[Record],
    keys: &[String],
    strategy: JoinStrategy,
) -> Result<Vec<Record>, Error> {
    if strategy == JoinStrategy::Cross {
        return cross_join(left, right);
    }
    if keys.is_empty() {
        return Err(Error::configuration(format!(
            "{strategy:?} join requires at least one key column"
        )));
    }
    if left.is_empty() || right.is_empty() {
        return Ok(Vec::new());
    }

    let schema = Schema::build(left, right);
    let mut out = Vec::new();
    let mut i = 0usize;
    let mut j = 0usize;

    while i < left.len() && j < right.len() {
        let lk = key_tuple(&left[i], keys)?;
        let rk = key_tuple(&right[j], keys)?;
        match compare_key_tuples(&lk, &rk)? {
            Ordering::Less => {
                if matches!(strategy, JoinStrategy::Left | JoinStrategy::Full) {
                    out.push(schema.merge(Some(&left[i]), None));
                }
                i += 1;
            }
            Ordering::Greater => {
                if matches!(strategy, JoinStrategy::Right | JoinStrategy::Full) {
                    out.push(schema.merge(None, Some(&right[j])));
                }
                j += 1;
            }
            Ordering::Equal => {
                let li0 = i;
                while i < left.len() && same_key(&left[li0], &left[i], keys)? {
                    i += 1;
                }
                let rj0 = j;
                while j < right.len() && same_key(&right[rj0], &right[j], keys)? {
                    j += 1;
                }
                for l in &left[li0..i] {
                    for r in &right[rj0..j] {
                        out.push(schema.merge(Some(l), Some(r)));
                    }
                }
            }
        }
    }

    if matches!(strategy, JoinStrategy::Left | JoinStrategy::Full) {
        while i < left.len() {
            out.push(schema.merge(Some(&left[i]), None));
            i += 1;
        }
    }
    if matches!(strategy, JoinStrategy::Right | JoinStrategy::Full) {
        while j < right.len() {
            out.push(schema.merge(None, Some(&right[j])));
            j += 1;
        }
    }

    Ok(out)
}

fn same_key(a: &Record, b: &Record, keys: &[String]) -> Result<bool, Error> {
    let ka = key_tuple(a, keys)?;
    let kb = key_tuple(b, keys)?;
    Ok(compare_key_tuples(&ka, &kb)? == Ordering::Equal)
}

fn cross_join(left: &[Record], right: &[Record]) -> Result<Vec<Record>, Error> {
    let schema = Schema::build(left, right);
    let mut out = Vec::with_capacity(left.len() * right.len());
    for l in left {
        for r in right {
            out.push(schema.merge(Some(l), Some(r)));
        }
    }
    Ok(out)
}

/// Precomputed column layout shared by every output record of one join:
/// the full set of columns each side can ever contribute (so a missing
/// side fills every one of its columns with Null instead of silently
/// omitting them) and which of those columns collide between the two sides
/// and therefore need a `_left`/`_right` suffix. Key columns are ordinary
/// members of both sets and always collide.
struct Schema {
    left_cols: IndexSet<String>,
    right_cols: IndexSet<String>,
    collisions: IndexSet<String>,
}

impl Schema {
    fn build(left: &[Record], right: &[Record]) -> Self {
        let mut left_cols = IndexSet::new();
        for rec in left {
            for col in rec.keys() {
                left_cols.insert(col.clone());
            }
        }
        let mut right_cols = IndexSet::new();
        for rec in right {
            for col in rec.keys() {
                right_cols.insert(col.clone());
            }
        }
        let collisions = left_cols.intersection(&right_cols).cloned().collect();
        Schema {
            left_cols,
            right_cols,
            collisions,
        }
    }

    fn merge(&self, left: Option<&Record>, right: Option<&Record>) -> Record {
        let mut out = Record::new();

        for col in &self.left_cols {
            let name = if self.collisions.contains(col) {
                format!("{col}_left")
            } else {
                col.clone()
            };
            let v = left.and_then(|l| l.get(col)).cloned().unwrap_or(Value::Null);
            out.insert(name, v);
        }

        for col in &self.right_cols {
            let name = if self.collisions.contains(col) {
                format!("{col}_right")
            } else {
                col.clone()
            };
            let v = right.and_then(|r| r.get(col)).cloned().unwrap_or(Value::Null);
            out.insert(name, v);
        }

        out
    }
}
