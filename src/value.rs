//! The dynamically-typed value model that flows through every graph.
//!
//! A [`Record`] is an insertion-ordered mapping from column name to [`Value`].
//! Unlike ironbeam's `PCollection<T>`, which is generic over a compile-time
//! element type, every stage in this crate moves the same concrete `Record`
//! type — there is no type-erasure layer to build (no `Partition`, no
//! `VecOps`) because there is only ever one element type to carry.

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;

use crate::error::Error;

/// A scalar or homogeneous-list value held by a [`Record`] column.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    List(Vec<Value>),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::List(_) => "list",
        }
    }

    /// Total order over same-variant values, `Null` ordered before everything
    /// else. Two non-null values of different variants are a schema mismatch.
    ///
    /// Grounded in `utils::OrdF64`'s use of `total_cmp` for float ordering.
    pub fn compare(&self, other: &Value) -> Result<Ordering, Error> {
        use Value::*;
        match (self, other) {
            (Null, Null) => Ok(Ordering::Equal),
            (Null, _) => Ok(Ordering::Less),
            (_, Null) => Ok(Ordering::Greater),
            (Int(a), Int(b)) => Ok(a.cmp(b)),
            (Float(a), Float(b)) => Ok(a.total_cmp(b)),
            (Str(a), Str(b)) => Ok(a.cmp(b)),
            (Bool(a), Bool(b)) => Ok(a.cmp(b)),
            (List(a), List(b)) => compare_lists(a, b),
            _ => Err(Error::schema(format!(
                "cannot compare incompatible value types `{}` and `{}`",
                self.type_name(),
                other.type_name()
            ))),
        }
    }
}

fn compare_lists(a: &[Value], b: &[Value]) -> Result<Ordering, Error> {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.compare(y)? {
            Ordering::Equal => continue,
            ord => return Ok(ord),
        }
    }
    Ok(a.len().cmp(&b.len()))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Null => write!(f, "null"),
            Value::List(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// An ordered mapping from column name to [`Value`].
///
/// Column order is not semantically significant (§3) but insertion order is
/// preserved by `IndexMap`, which keeps debugging output and JSON-lines
/// round-trips stable without any extra bookkeeping.
pub type Record = IndexMap<String, Value>;

/// Build a [`Record`] from `(name, value)` pairs, for tests and demos.
///
/// ```
/// use compgraph::value::{record, Value};
///
/// let r = record([("id", Value::Int(1)), ("name", Value::Str("Alice".into()))]);
/// assert_eq!(r["id"], Value::Int(1));
/// ```
pub fn record<const N: usize>(fields: [(&str, Value); N]) -> Record {
    fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Fetch the tuple of key-column values used to compare two records for
/// Sort/Reduce/Join, failing with `SchemaError` if a column is missing.
pub fn key_tuple<'a>(rec: &'a Record, columns: &[String]) -> Result<Vec<&'a Value>, Error> {
    columns
        .iter()
        .map(|c| {
            rec.get(c)
                .ok_or_else(|| Error::schema(format!("record is missing key column `{c}`")))
        })
        .collect()
}

/// Compare two key tuples component-wise (lexicographic), per §4.3/§4.6.
pub fn compare_key_tuples(a: &[&Value], b: &[&Value]) -> Result<Ordering, Error> {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.compare(y)? {
            Ordering::Equal => continue,
            ord => return Ok(ord),
        }
    }
    Ok(a.len().cmp(&b.len()))
}
