//! Record (Keys) behavior beyond the basics: nesting, includes, key
//! identity, and the JSON bridge.

use conformal::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn nested_records_nest_their_paths() {
    let address = keys()
        .required("street", non_empty_string())
        .build()
        .unwrap();
    let person = keys()
        .required("name", non_empty_string())
        .required("address", address.into_def())
        .build()
        .unwrap();

    let input = Value::map([
        (Key::sym("name"), Value::text("ada")),
        (
            Key::sym("address"),
            Value::map([(Key::sym("street"), Value::text(""))]),
        ),
    ]);
    let result = person.conform(&input);
    assert!(result
        .errors()
        .iter()
        .any(|e| e.key() == "size_min" && e.path().as_str() == "/address/street"));
}

#[test]
fn include_behaves_like_inline_declarations() {
    let timestamps = keys()
        .required("created_at", value_type(ValueKind::Timestamp))
        .optional("updated_at", value_type(ValueKind::Timestamp))
        .build()
        .unwrap();

    let post = keys()
        .required("title", non_empty_string())
        .include(&timestamps)
        .build()
        .unwrap();

    let declared: Vec<_> = post.declared_keys().map(Key::name).collect();
    assert_eq!(declared, ["title", "created_at", "updated_at"]);

    let result = post.conform(&Value::map([(Key::sym("title"), Value::text("hi"))]));
    assert!(result
        .errors()
        .iter()
        .any(|e| e.key() == "missing_key" && e.path().as_str() == "/created_at"));
}

#[test]
fn symbolic_spec_rejects_textual_input_keys() {
    let def = keys()
        .required("id", value_type(ValueKind::Int))
        .build()
        .unwrap();

    // Same name, wrong key type: missing for the spec, unexpected as input.
    let input = Value::map([(Key::text("id"), Value::Int(1))]);
    let result = def.conform(&input);
    let codes: Vec<_> = result.root_errors().iter().map(ConformError::key).collect();
    assert_eq!(codes, ["unexpected_key", "missing_key"]);
}

#[test]
fn textual_specs_match_json_objects() {
    let def = keys()
        .required(Key::text("name"), non_empty_string())
        .required(Key::text("count"), value_type(ValueKind::Int))
        .build()
        .unwrap();

    let input = Value::from(serde_json::json!({"name": "widget", "count": 3}));
    let result = def.conform(&input);
    assert!(result.passed());
    assert_eq!(
        result.value().as_map().unwrap().get(&Key::text("count")),
        Some(&Value::Int(3))
    );
}

#[test]
fn defaults_fill_only_absent_keys() {
    let def = keys()
        .required("host", non_empty_string())
        .optional_default("port", value_type(ValueKind::Int), 5432)
        .build()
        .unwrap();

    let explicit = Value::map([
        (Key::sym("host"), Value::text("db")),
        (Key::sym("port"), Value::Int(6543)),
    ]);
    let out = def.conform(&explicit).into_value().unwrap();
    assert_eq!(out.as_map().unwrap().get(&Key::sym("port")), Some(&Value::Int(6543)));

    let absent = Value::map([(Key::sym("host"), Value::text("db"))]);
    let out = def.conform(&absent).into_value().unwrap();
    assert_eq!(out.as_map().unwrap().get(&Key::sym("port")), Some(&Value::Int(5432)));
}

#[test]
fn non_mapping_input_short_circuits() {
    let def = keys()
        .required("a", value_type(ValueKind::Int))
        .build()
        .unwrap();
    let result = def.conform(&Value::seq([Value::Int(1)]));
    assert_eq!(result.root_errors().len(), 1);
    let root = &result.root_errors()[0];
    assert_eq!(root.key(), "not_a_mapping");
    assert_eq!(root.args(), ["sequence"]);
    assert_eq!(root.path().as_str(), "");
}

#[test]
fn conforming_is_threadsafe_over_a_shared_tree() {
    let def = std::sync::Arc::new(
        keys()
            .required("n", value_type(ValueKind::Int))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let def = std::sync::Arc::clone(&def);
            std::thread::spawn(move || {
                let input = Value::map([(Key::sym("n"), Value::Int(i))]);
                def.conform(&input).passed()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
