use crate::value::Record;

/// Assert two batches hold the same records, ignoring order — for stages
/// like `Reduce`/`Join` where group/match order is not a documented
/// guarantee. Panics with a diff-style message on mismatch.
pub fn assert_records_eq_unordered(actual: &[Record], expected: &[Record]) {
    let mut matched = vec![false; expected.len()];
    let mut unmatched_actual = Vec::new();

    for rec in actual {
        match expected.iter().position(|exp| exp == rec) {
            Some(idx) if !matched[idx] => matched[idx] = true,
            _ => unmatched_actual.push(rec),
        }
    }

    let missing: Vec<&Record> = expected
        .iter()
        .zip(matched.iter())
        .filter(|(_, m)| !**m)
        .map(|(r, _)| r)
        .collect();

    if !missing.is_empty() || !unmatched_actual.is_empty() {
        panic!(
            "record batches differ (order ignored)\n  missing from actual: {missing:#?}\n  unexpected in actual: {unmatched_actual:#?}",
        );
    }
}

/// Assert two batches are equal element-by-element, in order — for stages
/// like `Map`/`Sort`/`Fold` whose output order is part of the contract.
pub fn assert_records_eq_ordered(actual: &[Record], expected: &[Record]) {
    if actual != expected {
        panic!("record batches differ\n  actual:   {actual:#?}\n  expected: {expected:#?}");
    }
}
