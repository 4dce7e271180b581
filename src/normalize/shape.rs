//! Structural interpretations of a parsed payload.
//!
//! Endpoint versions nest their records differently. The shapes tried, in
//! order, are:
//!
//! 1. `FixedPath`: the `SeoulRtd.citydata_ppltn` key, following the key
//!    through repeated wrappers (the XML form nests it inside itself).
//! 2. `AlternateKey`: one of a few known list keys at the top level.
//! 3. `FirstList`: a bare list, a bare record, or the first top-level value
//!    that is a list of records.
//!
//! Single-key document wrappers (`{"response": {...}}`) are peeled before
//! steps 2 and 3. Only objects that carry a known record field count as
//! records, so result envelopes never pass for data.

use serde_json::{Map, Value};

use crate::normalize::fields::is_record;

pub const PRIMARY_KEY: &str = "SeoulRtd.citydata_ppltn";
pub const ALTERNATE_LIST_KEYS: [&str; 4] = ["CITYDATA_PPLTN", "citydata_ppltn", "row", "data"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    FixedPath,
    AlternateKey,
    FirstList,
}

/// A non-empty list of records and the shape that produced it.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    pub shape: Shape,
    pub records: Vec<&'a Map<String, Value>>,
}

/// Run the fallback chain. `None` means no shape produced any record.
pub fn candidate_records(root: &Value) -> Option<Candidates<'_>> {
    let attempts: [(Shape, fn(&Value) -> Vec<&Map<String, Value>>); 3] = [
        (Shape::FixedPath, fixed_path),
        (Shape::AlternateKey, alternate_key),
        (Shape::FirstList, first_list),
    ];

    attempts.into_iter().find_map(|(shape, attempt)| {
        let records = attempt(root);
        (!records.is_empty()).then_some(Candidates { shape, records })
    })
}

/// Follow `key` while the current value is an object that holds it again.
pub fn descend<'a>(mut value: &'a Value, keys: &[&str]) -> &'a Value {
    while let Value::Object(map) = value {
        match keys.iter().find_map(|k| map.get(*k)) {
            Some(inner) => value = inner,
            None => break,
        }
    }
    value
}

/// Records held by a value: list elements that are records, or the value itself.
pub fn records_in(value: &Value) -> Vec<&Map<String, Value>> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .filter(|obj| is_record(obj))
            .collect(),
        Value::Object(obj) if is_record(obj) => vec![obj],
        _ => Vec::new(),
    }
}

fn fixed_path(root: &Value) -> Vec<&Map<String, Value>> {
    let mut level = root;
    loop {
        let Value::Object(map) = level else {
            return Vec::new();
        };
        if let Some(found) = map.get(PRIMARY_KEY) {
            return records_in(descend(found, &[PRIMARY_KEY]));
        }
        match wrapped_object(map) {
            Some(inner) => level = inner,
            None => return Vec::new(),
        }
    }
}

fn alternate_key(root: &Value) -> Vec<&Map<String, Value>> {
    let Value::Object(map) = document_body(root) else {
        return Vec::new();
    };
    ALTERNATE_LIST_KEYS
        .iter()
        .filter_map(|k| map.get(*k))
        .map(|value| records_in(descend(value, &ALTERNATE_LIST_KEYS)))
        .find(|records| !records.is_empty())
        .unwrap_or_default()
}

fn first_list(root: &Value) -> Vec<&Map<String, Value>> {
    let body = document_body(root);
    match body {
        Value::Array(_) => records_in(body),
        Value::Object(map) if is_record(map) => vec![map],
        Value::Object(map) => map
            .values()
            .filter(|v| v.is_array())
            .map(records_in)
            .find(|records| !records.is_empty())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Strip single-key wrappers around an object (`{"doc": {...}}`).
fn document_body(root: &Value) -> &Value {
    let mut level = root;
    while let Value::Object(map) = level {
        match wrapped_object(map) {
            Some(inner) => level = inner,
            None => break,
        }
    }
    level
}

fn wrapped_object(map: &Map<String, Value>) -> Option<&Value> {
    if map.len() != 1 || is_record(map) {
        return None;
    }
    map.values().next().filter(|inner| inner.is_object())
}
