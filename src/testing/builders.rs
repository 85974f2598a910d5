use crate::value::{Record, Value};

/// Build a `Vec<Record>` from an array of `(name, value)` row literals, for
/// test fixtures and demos.
///
/// ```
/// use compgraph::testing::rows;
/// use compgraph::value::Value;
///
/// let batch = rows([
///     vec![("id", Value::Int(1)), ("name", Value::Str("a".into()))],
///     vec![("id", Value::Int(2)), ("name", Value::Str("b".into()))],
/// ]);
/// assert_eq!(batch.len(), 2);
/// ```
pub fn rows<const N: usize>(table: [Vec<(&str, Value)>; N]) -> Vec<Record> {
    table
        .into_iter()
        .map(|fields| {
            let mut rec = Record::new();
            for (k, v) in fields {
                rec.insert(k.to_string(), v);
            }
            rec
        })
        .collect()
}
