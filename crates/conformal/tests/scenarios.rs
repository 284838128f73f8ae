//! End-to-end conforming scenarios over the whole algebra.

use chrono::{DateTime, Utc};
use conformal::prelude::*;
use pretty_assertions::assert_eq;

fn sym(name: &str) -> Key {
    Key::sym(name)
}

#[test]
fn type_checks_scalars() {
    let def = value_type(ValueKind::Text);
    assert_eq!(def.conform(&Value::text("hi")).value(), &Value::text("hi"));

    let result = def.conform(&Value::Int(3));
    assert!(result.failed());
    let error = &result.root_errors()[0];
    assert_eq!(error.path().as_str(), "");
    assert_eq!(error.key(), "type_error");
    assert_eq!(error.args(), ["string", "integer"]);
}

#[test]
fn record_with_typed_fields() {
    let def = keys()
        .required("name", value_type(ValueKind::Text))
        .required("time", value_type(ValueKind::Timestamp))
        .build()
        .unwrap();

    let at: DateTime<Utc> = DateTime::from_timestamp_millis(1_577_836_800_000).unwrap();
    let input = Value::map([
        (sym("name"), Value::text("test")),
        (sym("time"), Value::Timestamp(at)),
    ]);
    assert_eq!(def.conform(&input).value(), &input);

    let input = Value::map([
        (sym("name"), Value::text("test")),
        (sym("time"), Value::text("2020-01-01T00:00:00Z")),
    ]);
    let result = def.conform(&input);
    assert_eq!(result.root_errors().len(), 1);
    let error = &result.root_errors()[0];
    assert_eq!(error.path().as_str(), "/time");
    assert_eq!(error.nested()[0].key(), "type_error");
}

#[test]
fn each_reports_only_failing_indices() {
    let def = each(value_type(ValueKind::Int));

    let good = Value::seq([Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert_eq!(def.conform(&good).value(), &good);

    let bad = Value::seq([
        Value::Int(1),
        Value::Int(2),
        Value::text("3"),
        Value::Int(4),
    ]);
    let result = def.conform(&bad);
    assert_eq!(result.root_errors().len(), 1);
    let root = &result.root_errors()[0];
    assert_eq!(root.key(), "each_failed");
    assert_eq!(root.nested().len(), 1);
    assert_eq!(root.nested()[0].path().as_str(), "/2");
    assert_eq!(root.nested()[0].key(), "type_error");
}

#[test]
fn and_threads_and_reports_the_failing_side() {
    let range = and("range", [greater_than(5), less_than(10)]).unwrap();

    assert_eq!(range.conform(&Value::Int(7)).value(), &Value::Int(7));

    let result = range.conform(&Value::Int(4));
    let root = &result.root_errors()[0];
    assert_eq!(root.key(), "and_failed");
    assert_eq!(root.nested().len(), 1);
    assert_eq!(root.nested()[0].key(), "gt_failed");
    assert_eq!(root.nested()[0].args(), ["5"]);

    let result = range.conform(&Value::Int(11));
    let root = &result.root_errors()[0];
    assert_eq!(root.nested()[0].key(), "lt_failed");
    assert_eq!(root.nested()[0].args(), ["10"]);
}

#[test]
fn lambda_coerces_milliseconds_inside_a_record() {
    let ms_to_time = lambda("ms_to_time", |value, scope| {
        if let Value::Int(ms) = value {
            if let Some(at) = DateTime::from_timestamp_millis(*ms) {
                scope.conform_with(at);
            }
        }
    });
    let def = keys().required("pub", ms_to_time).build().unwrap();

    let input = Value::map([(sym("pub"), Value::Int(1_546_170_180_339))]);
    let result = def.conform(&input);
    let out = result.value().as_map().unwrap();
    let Some(Value::Timestamp(at)) = out.get(&sym("pub")) else {
        panic!("expected pub to be conformed into a timestamp");
    };
    assert_eq!(at.timestamp_millis(), 1_546_170_180_339);

    let input = Value::map([(sym("pub"), Value::text("x"))]);
    let result = def.conform(&input);
    assert!(result
        .errors()
        .iter()
        .any(|e| e.key() == "lambda_failed" && e.path().as_str() == "/pub"));
}

#[test]
fn extra_key_policy() {
    let def = keys()
        .required("title", non_empty_string())
        .build()
        .unwrap();
    let input = Value::map([
        (sym("title"), Value::text("")),
        (sym("extra"), Value::Int(1)),
    ]);

    let result = def.conform(&input);
    assert_eq!(result.root_errors().len(), 2);
    let hash = result.error_hash();
    assert!(hash.contains_key("title"));
    assert_eq!(hash["extra"][0].key(), "unexpected_key");
    assert!(result
        .errors()
        .iter()
        .any(|e| e.key() == "size_min" && e.path().as_str() == "/title"));

    let lenient = keys()
        .required("title", non_empty_string())
        .ignore_extra_keys()
        .build()
        .unwrap();
    let result = lenient.conform(&input);
    assert_eq!(result.root_errors().len(), 1);
    assert_eq!(result.root_errors()[0].path().as_str(), "/title");
}

#[test]
fn or_accepts_either_shape() {
    let id = or(
        "id",
        [value_type(ValueKind::Int), non_empty_string()],
    )
    .unwrap();
    assert!(id.conform(&Value::Int(3)).passed());
    assert!(id.conform(&Value::text("abc")).passed());

    let result = id.conform(&Value::Null);
    let root = &result.root_errors()[0];
    assert_eq!(root.key(), "or_failed");
    assert_eq!(root.nested().len(), 2);
}

#[test]
fn nilable_record_field() {
    let def = keys()
        .required("nick", nilable(value_type(ValueKind::Text)))
        .build()
        .unwrap();

    let input = Value::map([(sym("nick"), Value::Null)]);
    assert!(def.conform(&input).passed());

    let input = Value::map([(sym("nick"), Value::Int(1))]);
    let result = def.conform(&input);
    assert!(result
        .errors()
        .iter()
        .any(|e| e.key() == "type_error" && e.path().as_str() == "/nick"));
}
