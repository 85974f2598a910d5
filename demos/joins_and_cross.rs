//! Join strategies over users and orders.
//!
//! Demonstrates:
//! - `inner`/`left`/`full` sort-merge joins with column-collision suffixes
//! - a `cross` join as a small cartesian-product sanity check
//!
//! Run with: `cargo run --example joins_and_cross`

use compgraph::error::Error;
use compgraph::graph::GraphBuilder;
use compgraph::join::JoinStrategy;
use compgraph::runner::{run, Bindings};
use compgraph::value::{record, Value};

fn main() -> Result<(), Error> {
    println!("🔗 Joins Example\n");

    let builder = GraphBuilder::new();

    let users = builder.source("users").sort(["user_id"], false);
    let orders = builder.source("orders").sort(["user_id"], false);

    let mut bindings = Bindings::new();
    bindings.insert(
        "users".into(),
        vec![
            record([("user_id", Value::Int(1)), ("name", Value::Str("Alice".into()))]),
            record([("user_id", Value::Int(2)), ("name", Value::Str("Bob".into()))]),
            record([("user_id", Value::Int(3)), ("name", Value::Str("Charlie".into()))]),
        ],
    );
    bindings.insert(
        "orders".into(),
        vec![
            record([("user_id", Value::Int(1)), ("product", Value::Str("widget".into()))]),
            record([("user_id", Value::Int(1)), ("product", Value::Str("gadget".into()))]),
            record([("user_id", Value::Int(5)), ("product", Value::Str("orphan".into()))]),
        ],
    );

    println!("📊 Inner join (users ⋈ orders)");
    let inner = users.join(&orders, ["user_id"], JoinStrategy::Inner)?;
    for rec in run(&inner, &bindings, false)? {
        println!("  {rec:?}");
    }

    println!("\n📊 Left join (users ⟕ orders) — Charlie has no orders, so left-only rows are suppressed");
    let left = orders.join(&users, ["user_id"], JoinStrategy::Left)?;
    for rec in run(&left, &bindings, false)? {
        println!("  {rec:?}");
    }

    println!("\n📊 Cross join (users × orders, first two of each)");
    let cross = users.join(&orders, Vec::<String>::new(), JoinStrategy::Cross)?;
    let rows = run(&cross, &bindings, false)?;
    println!("  produced {} rows ({} users * {} orders)", rows.len(), 3, 3);

    Ok(())
}
