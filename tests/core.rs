use compgraph::error::Error;
use compgraph::graph::GraphBuilder;
use compgraph::runner::{run, Bindings};
use compgraph::testing::{assert_records_eq_ordered, assert_records_eq_unordered, rows};
use compgraph::value::Value;

fn single_binding(name: &str, batch: Vec<compgraph::Record>) -> Bindings {
    let mut b = Bindings::new();
    b.insert(name.to_string(), batch);
    b
}

#[test]
fn map_preserves_input_order_and_can_fan_out_records() {
    let builder = GraphBuilder::new();
    let doubled = builder.source("nums").map(|rec| {
        let n = match rec["n"] {
            Value::Int(n) => n,
            _ => unreachable!(),
        };
        Ok(vec![
            compgraph::value::record([("n", Value::Int(n))]),
            compgraph::value::record([("n", Value::Int(n * 10))]),
        ])
    });

    let bindings = single_binding(
        "nums",
        rows([vec![("n", Value::Int(1))], vec![("n", Value::Int(2))]]),
    );

    let out = run(&doubled, &bindings, false).unwrap();
    let expected = rows([
        vec![("n", Value::Int(1))],
        vec![("n", Value::Int(10))],
        vec![("n", Value::Int(2))],
        vec![("n", Value::Int(20))],
    ]);
    assert_records_eq_ordered(&out, &expected);
}

#[test]
fn map_errors_propagate_as_operator_errors() {
    let builder = GraphBuilder::new();
    let fails = builder
        .source("nums")
        .map(|_| Err(Error::operator("always fails")));

    let bindings = single_binding("nums", rows([vec![("n", Value::Int(1))]]));
    let err = run(&fails, &bindings, false).unwrap_err();
    assert!(matches!(err, Error::Operator { .. }));
}

#[test]
fn sort_is_stable_and_orders_nulls_first() {
    let builder = GraphBuilder::new();
    let sorted = builder.source("rows").sort(["k"], false);

    let bindings = single_binding(
        "rows",
        rows([
            vec![("k", Value::Int(2)), ("tag", Value::Str("a".into()))],
            vec![("k", Value::Null), ("tag", Value::Str("b".into()))],
            vec![("k", Value::Int(1)), ("tag", Value::Str("c".into()))],
            vec![("k", Value::Int(2)), ("tag", Value::Str("d".into()))],
        ]),
    );

    let out = run(&sorted, &bindings, false).unwrap();
    let tags: Vec<&str> = out
        .iter()
        .map(|r| match &r["tag"] {
            Value::Str(s) => s.as_str(),
            _ => unreachable!(),
        })
        .collect();
    // null first, then 1, then the two k=2 rows in original relative order (stability)
    assert_eq!(tags, vec!["b", "c", "a", "d"]);
}

#[test]
fn sort_reverse_is_descending_and_still_stable() {
    let builder = GraphBuilder::new();
    let sorted = builder.source("rows").sort(["k"], true);

    let bindings = single_binding(
        "rows",
        rows([
            vec![("k", Value::Int(1)), ("tag", Value::Str("a".into()))],
            vec![("k", Value::Null), ("tag", Value::Str("b".into()))],
            vec![("k", Value::Int(2)), ("tag", Value::Str("c".into()))],
            vec![("k", Value::Int(2)), ("tag", Value::Str("d".into()))],
        ]),
    );

    let out = run(&sorted, &bindings, false).unwrap();
    let tags: Vec<&str> = out
        .iter()
        .map(|r| match &r["tag"] {
            Value::Str(s) => s.as_str(),
            _ => unreachable!(),
        })
        .collect();
    // descending: 2, 2 (stable, original relative order), 1, then null last
    assert_eq!(tags, vec!["c", "d", "a", "b"]);
}

#[test]
fn sort_on_mismatched_value_types_is_a_schema_error() {
    let builder = GraphBuilder::new();
    let sorted = builder.source("rows").sort(["k"], false);

    let bindings = single_binding(
        "rows",
        rows([
            vec![("k", Value::Int(1))],
            vec![("k", Value::Str("oops".into()))],
        ]),
    );

    let err = run(&sorted, &bindings, false).unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
}

#[test]
fn fold_reduces_the_whole_batch_to_one_record() {
    let builder = GraphBuilder::new();
    let total = builder
        .source("nums")
        .fold(compgraph::value::record([("sum", Value::Int(0))]), |state, rec| {
            let s = match state["sum"] {
                Value::Int(s) => s,
                _ => unreachable!(),
            };
            let n = match rec["n"] {
                Value::Int(n) => n,
                _ => unreachable!(),
            };
            Ok(compgraph::value::record([("sum", Value::Int(s + n))]))
        });

    let bindings = single_binding(
        "nums",
        rows([vec![("n", Value::Int(1))], vec![("n", Value::Int(2))], vec![("n", Value::Int(3))]]),
    );

    let out = run(&total, &bindings, false).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["sum"], Value::Int(6));
}

#[test]
fn fold_errors_propagate_as_operator_errors() {
    let builder = GraphBuilder::new();
    let fails = builder
        .source("nums")
        .fold(compgraph::value::record([("sum", Value::Int(0))]), |_state, _rec| {
            Err(Error::operator("fold always fails"))
        });

    let bindings = single_binding("nums", rows([vec![("n", Value::Int(1))]]));
    let err = run(&fails, &bindings, false).unwrap_err();
    assert!(matches!(err, Error::Operator { .. }));
}

#[test]
fn fold_over_empty_input_yields_the_initial_state() {
    let builder = GraphBuilder::new();
    let total = builder
        .source("nums")
        .fold(compgraph::value::record([("sum", Value::Int(42))]), |state, _rec| Ok(state));

    let bindings = single_binding("nums", vec![]);
    let out = run(&total, &bindings, false).unwrap();
    assert_eq!(out, vec![compgraph::value::record([("sum", Value::Int(42))])]);
}

#[test]
fn reduce_groups_maximal_runs_of_equal_keys() {
    let builder = GraphBuilder::new();
    let counted = builder
        .source("rows")
        .sort(["k"], false)
        .reduce(["k"], |group| {
            Ok(vec![compgraph::value::record([
                ("k", group[0]["k"].clone()),
                ("count", Value::Int(group.len() as i64)),
            ])])
        });

    let bindings = single_binding(
        "rows",
        rows([
            vec![("k", Value::Str("a".into()))],
            vec![("k", Value::Str("b".into()))],
            vec![("k", Value::Str("a".into()))],
        ]),
    );

    let out = run(&counted, &bindings, false).unwrap();
    let expected = rows([
        vec![("k", Value::Str("a".into())), ("count", Value::Int(2))],
        vec![("k", Value::Str("b".into())), ("count", Value::Int(1))],
    ]);
    assert_records_eq_unordered(&out, &expected);
}

#[test]
fn reduce_can_drop_or_multiply_records_per_group() {
    let builder = GraphBuilder::new();
    // drop groups of size 1, duplicate groups of size >= 2
    let filtered = builder.source("rows").sort(["k"], false).reduce(["k"], |group| {
        if group.len() < 2 {
            Ok(vec![])
        } else {
            Ok(vec![group[0].clone(), group[0].clone()])
        }
    });

    let bindings = single_binding(
        "rows",
        rows([
            vec![("k", Value::Int(1))],
            vec![("k", Value::Int(2))],
            vec![("k", Value::Int(2))],
        ]),
    );

    let out = run(&filtered, &bindings, false).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["k"], Value::Int(2));
}

#[test]
fn missing_binding_is_a_configuration_error() {
    let builder = GraphBuilder::new();
    let g = builder.source("missing").sort(["k"], false);
    let err = run(&g, &Bindings::new(), false).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}
