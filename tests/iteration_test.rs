//! Integration tests for collection iteration.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexSet;
use inputguard::collector::{self, from_iter, to_index_set, to_vec};
use inputguard::prelude::*;
use inputguard::{validators, ElementOrder, GuardFailure};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn not_empty() -> Validate<String> {
    Validate::new(validators::not_empty::<String>)
}

fn paths(failure: &GuardFailure) -> Vec<String> {
    failure
        .as_multi()
        .unwrap()
        .iter()
        .map(|f| f.path().to_string())
        .collect()
}

#[test]
fn test_every_invalid_element_is_reported() {
    let guard = builder::<Vec<String>>().process_each(not_empty(), to_vec()).build();

    let result = guard.process(strings(&["", "abc", "", "123", ""]));
    let failure = result.failure_ref().unwrap();

    assert_eq!(paths(failure), vec!["index [0]", "index [2]", "index [4]"]);
    assert_eq!(failure.value(), &json!(["", "abc", "", "123", ""]));
}

#[test]
fn test_property_scoped_collection_paths() {
    let guard = builder::<Vec<String>>().process_each(not_empty(), to_vec()).build();

    let result = guard.process_property(strings(&["ok", ""]), "tags");
    let failure = result.failure_ref().unwrap();

    assert_eq!(failure.path(), &Path::property("tags"));
    assert_eq!(paths(failure), vec!["tags[1]"]);
    assert_eq!(
        failure.message(),
        "Multiple failures while processing tags:\n  - Invalid tags[1]: must not be empty\n"
    );
}

#[test]
fn test_nested_collections_accumulate_paths() {
    let inner = builder::<Vec<String>>().process_each(not_empty(), to_vec()).build();
    let outer = builder::<Vec<Vec<String>>>().process_each(inner, to_vec()).build();

    let input = vec![strings(&["a"]), strings(&["b", ""])];
    let result = outer.process_property(input, "matrix");
    let failure = result.failure_ref().unwrap();

    let rows = failure.as_multi().unwrap().failures_at(&Path::index(1).at_property("matrix"));
    assert_eq!(rows.len(), 1);
    assert_eq!(paths(rows[0]), vec!["matrix[1][1]"]);
}

#[test]
fn test_mapped_elements_are_collected() {
    let guard = builder::<Vec<String>>()
        .process_each(Map::new(|s: &String| s.parse::<u32>()), from_iter::<Vec<u32>>())
        .build();

    assert_eq!(guard.process(strings(&["1", "22"])).get(), vec![1, 22]);

    let result = guard.process(strings(&["1", "x", "y"]));
    let multi = result.failure_ref().unwrap().as_multi().unwrap();
    assert!(multi.iter().all(|f| f.as_mapping().is_some()));
    assert_eq!(multi.len(), 2);
}

#[test]
fn test_filtered_out_elements_are_dropped() {
    let guard = builder::<Vec<String>>()
        .filter_and_process_each(|s: &String| !s.starts_with('#'), not_empty(), to_vec())
        .build();

    assert_eq!(guard.process(strings(&["#comment", "a", "b"])).get(), strings(&["a", "b"]));
}

#[test]
fn test_default_collectors() {
    let list = builder::<Vec<String>>()
        .process_list(Sanitize::new(|s: String| s.to_uppercase()))
        .build();
    let output: Arc<[String]> = list.process(strings(&["a", "b"])).get();
    assert_eq!(&*output, &strings(&["A", "B"])[..]);

    let set = builder::<IndexSet<String>>()
        .process_set(Sanitize::new(|s: String| s.to_lowercase()))
        .build();
    let input: IndexSet<String> = strings(&["A", "a", "B"]).into_iter().collect();
    let output = set.process(input).get();
    assert_eq!(output.into_iter().collect::<Vec<_>>(), strings(&["a", "b"]));
}

#[test]
fn test_unordered_collection_uses_element_paths() {
    let guard = builder::<IndexSet<String>>()
        .process_each_unordered(not_empty(), to_index_set())
        .build();

    let input: IndexSet<String> = strings(&["", "x"]).into_iter().collect();
    let result = guard.process_property(input, "labels");

    assert_eq!(paths(result.failure_ref().unwrap()), vec!["labels[?]"]);
}

#[test]
fn test_closure_collector() {
    let guard = IterationGuard::<Vec<String>, _, _, _>::sequenced(
        Map::new(|s: &String| s.parse::<i64>()),
        |values: Vec<i64>| values.into_iter().sum::<i64>(),
    );
    assert_eq!(guard.process(strings(&["1", "2", "3"])).get(), 6);
}

#[test]
fn test_collection_of_records() {
    #[derive(Debug, Clone, Serialize)]
    struct Entry {
        key: String,
        value: i32,
    }

    let entry = guard_entry();
    let guard = IterationGuard::<Vec<Entry>, _, _, _>::sequenced(
        entry,
        from_iter::<BTreeMap<String, i32>>(),
    );

    let input = vec![
        Entry { key: "a".into(), value: 1 },
        Entry { key: "".into(), value: 2 },
    ];
    let result = guard.process_property(input.clone(), "entries");
    assert_eq!(paths(result.failure_ref().unwrap()), vec!["entries[1].key"]);

    let valid = vec![input[0].clone()];
    assert_eq!(guard.process(valid).get(), BTreeMap::from([("a".to_string(), 1)]));

    fn guard_entry() -> inputguard::FnGuard<Entry, (String, i32)> {
        inputguard::guard_fn(|entry: Entry| {
            let value = entry.value;
            Validate::new(validators::not_empty::<String>)
                .process_property(entry.key, "key")
                .map(|key| (key, value))
        })
    }
}

#[test]
fn test_parallel_processing_matches_sequential() {
    let guard = IterationGuard::<Vec<String>, _, _, _>::sequenced(
        Map::new(|s: &String| s.parse::<i32>()),
        collector::to_vec(),
    )
    .filter(|s: &String| !s.is_empty());
    assert_eq!(guard.order(), ElementOrder::Sequenced);

    let input: Vec<String> = (0..200)
        .map(|i| if i % 7 == 0 { format!("x{i}") } else { i.to_string() })
        .collect();

    assert_eq!(guard.process_parallel(input.clone()), guard.process(input));
}
