//! Word count over a small in-memory corpus.
//!
//! Demonstrates:
//! - `map` to tokenize a document into one record per word
//! - `sort` + `reduce` as a streaming group-by-key
//!
//! Run with: `cargo run --example word_count`

use compgraph::error::Error;
use compgraph::graph::GraphBuilder;
use compgraph::runner::{run, Bindings};
use compgraph::value::{record, Value};

fn main() -> Result<(), Error> {
    println!("📚 Word Count Example\n");

    let builder = GraphBuilder::new();

    let words = builder
        .source("docs")
        .map(|rec| {
            let text = match rec.get("text") {
                Some(Value::Str(s)) => s.clone(),
                _ => return Err(Error::schema("expected a string column `text`")),
            };
            Ok(text
                .split_whitespace()
                .map(|w| record([("word", Value::Str(w.to_lowercase()))]))
                .collect())
        })
        .sort(["word"], false)
        .reduce(["word"], |group| {
            let word = group[0]["word"].clone();
            Ok(vec![record([("word", word), ("count", Value::Int(group.len() as i64))])])
        })
        .sort(["word"], false);

    let mut bindings = Bindings::new();
    bindings.insert(
        "docs".into(),
        vec![
            record([("text", Value::Str("the quick brown fox".into()))]),
            record([("text", Value::Str("the quick fox jumps".into()))]),
        ],
    );

    for rec in run(&words, &bindings, false)? {
        println!("  {:<8} {}", rec["word"], rec["count"]);
    }

    Ok(())
}
