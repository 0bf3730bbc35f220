//! End-to-end validation scenarios: boolean schemas, type gating,
//! per-keyword contracts and the composition laws.

use jsonvalid::{Registry, ValidationError};
use serde_json::{json, Value};

fn verdict(schema: &Value, instance: &Value) -> Result<(), ValidationError> {
    let registry = Registry::new();
    let root = registry
        .compile(&serde_json::to_vec(schema).expect("schema must serialise"))
        .unwrap_or_else(|e| panic!("schema {schema} must compile: {e}"));
    root.validate_value(&registry, instance)
}

fn accepts(schema: Value, instance: Value) {
    if let Err(e) = verdict(&schema, &instance) {
        panic!("schema {schema} must accept {instance}: {e}");
    }
}

fn rejects(schema: Value, instance: Value) -> String {
    match verdict(&schema, &instance) {
        Ok(()) => panic!("schema {schema} must reject {instance}"),
        Err(e) => e.to_string(),
    }
}

// ----------------------------------------------------------------- Boolean schemas

#[test]
fn test_empty_and_true_schemas_accept_everything() {
    for instance in [
        json!(null),
        json!(false),
        json!(42),
        json!(3.25),
        json!("text"),
        json!([1, [2], {"x": null}]),
        json!({"deep": {"nesting": []}}),
    ] {
        accepts(json!({}), instance.clone());
        accepts(json!(true), instance);
    }
}

#[test]
fn test_false_schema_rejects_everything() {
    for instance in [
        json!(null),
        json!(true),
        json!(0),
        json!(""),
        json!([]),
        json!({}),
    ] {
        let message = rejects(json!(false), instance);
        assert!(
            message.contains("validation failed in path /"),
            "got: {message}"
        );
    }
}

// ----------------------------------------------------------------- Type gating

#[test]
fn test_type_specific_keywords_ignore_other_types() {
    for instance in [json!(42), json!(true), json!(null), json!([]), json!({})] {
        accepts(json!({"minLength": 5}), instance);
    }
    for instance in [json!("x"), json!(true), json!(null), json!([]), json!({})] {
        accepts(json!({"multipleOf": 2}), instance);
    }
    for instance in [json!("x"), json!(42), json!(null), json!([])] {
        accepts(json!({"required": ["a"], "minProperties": 1}), instance);
    }
    for instance in [json!("x"), json!(42), json!(null), json!({})] {
        accepts(
            json!({"minItems": 3, "contains": {"type": "string"}}),
            instance,
        );
    }
}

// ----------------------------------------------------------------- type

#[test]
fn test_type_names() {
    accepts(json!({"type": "object"}), json!({}));
    accepts(json!({"type": "array"}), json!([]));
    accepts(json!({"type": "string"}), json!("s"));
    accepts(json!({"type": "boolean"}), json!(false));
    accepts(json!({"type": "null"}), json!(null));
    accepts(json!({"type": "number"}), json!(1.5));

    rejects(json!({"type": "object"}), json!([]));
    rejects(json!({"type": "string"}), json!(5));
    rejects(json!({"type": "null"}), json!(0));
}

#[test]
fn test_integer_matches_mathematically_integral_numbers() {
    // S2 / S3
    rejects(json!({"type": "integer"}), json!(3.5));
    accepts(json!({"type": "integer"}), json!(3.0));
    accepts(json!({"type": "integer"}), json!(-7));
}

#[test]
fn test_type_array_matches_any_listed_type() {
    let schema = json!({"type": ["string", "null"]});
    accepts(schema.clone(), json!("s"));
    accepts(schema.clone(), json!(null));
    rejects(schema, json!(5));
}

#[test]
fn test_invalid_type_name_surfaces_at_validation() {
    let message = rejects(json!({"type": "floop"}), json!(1));
    assert!(message.contains("invalid json type floop"), "got: {message}");
}

// ----------------------------------------------------------------- const / enum

#[test]
fn test_const_round_trip() {
    let values = [
        json!(null),
        json!(true),
        json!(3),
        json!(3.5),
        json!("s"),
        json!([1, 2]),
        json!({"a": [1], "b": null}),
    ];
    for value in &values {
        accepts(json!({"const": value}), value.clone());
        for other in &values {
            if other != value {
                rejects(json!({"const": value}), other.clone());
            }
        }
    }
}

#[test]
fn test_const_ignores_key_order() {
    accepts(
        json!({"const": {"a": 1, "b": 2}}),
        json!({"b": 2, "a": 1}),
    );
}

#[test]
fn test_enum_membership() {
    let schema = json!({"enum": [null, 2, "two", [2], {"n": 2}]});
    accepts(schema.clone(), json!(null));
    accepts(schema.clone(), json!(2));
    accepts(schema.clone(), json!("two"));
    accepts(schema.clone(), json!([2]));
    accepts(schema.clone(), json!({"n": 2}));
    rejects(schema.clone(), json!(3));
    rejects(schema.clone(), json!([3]));
    rejects(schema, json!({"n": 3}));
}

// ----------------------------------------------------------------- Strings

#[test]
fn test_min_length_rejection_names_the_keyword() {
    // S1
    let message = rejects(json!({"type": "string", "minLength": 3}), json!("hi"));
    assert!(message.contains("minLength"), "got: {message}");
    accepts(json!({"type": "string", "minLength": 3}), json!("hey"));
}

#[test]
fn test_length_counts_utf8_bytes() {
    // "héllo" is five scalar values but six bytes.
    rejects(json!({"maxLength": 5}), json!("héllo"));
    accepts(json!({"minLength": 6}), json!("héllo"));
}

#[test]
fn test_pattern() {
    accepts(json!({"pattern": "^a+b$"}), json!("aaab"));
    rejects(json!({"pattern": "^a+b$"}), json!("ba"));
}

#[test]
fn test_format_keyword() {
    // S8
    rejects(json!({"format": "ipv4"}), json!("127"));
    accepts(json!({"format": "ipv4"}), json!("1.2.3.4"));

    accepts(json!({"format": "date-time"}), json!("1985-04-12T23:20:50.52Z"));
    rejects(json!({"format": "date-time"}), json!("yesterday"));

    // Unknown format names are ignored.
    accepts(json!({"format": "quantum-leap"}), json!("anything"));
    // Non-strings are out of the keyword's reach.
    accepts(json!({"format": "ipv4"}), json!(127));
}

// ----------------------------------------------------------------- Numbers

#[test]
fn test_numeric_bounds() {
    accepts(json!({"minimum": 2}), json!(2));
    rejects(json!({"minimum": 2}), json!(1.9));
    accepts(json!({"maximum": 2}), json!(2));
    rejects(json!({"maximum": 2}), json!(2.1));

    accepts(json!({"exclusiveMinimum": 2}), json!(2.1));
    rejects(json!({"exclusiveMinimum": 2}), json!(2));
    accepts(json!({"exclusiveMaximum": 2}), json!(1.9));
    rejects(json!({"exclusiveMaximum": 2}), json!(2));
}

#[test]
fn test_multiple_of() {
    accepts(json!({"multipleOf": 3}), json!(9));
    accepts(json!({"multipleOf": 0.5}), json!(2.5));
    rejects(json!({"multipleOf": 3}), json!(10));
}

// ----------------------------------------------------------------- Objects

#[test]
fn test_properties_and_required() {
    // S4
    let schema = json!({"properties": {"a": {"type": "number"}}, "required": ["a"]});
    accepts(schema.clone(), json!({"a": 1}));

    let message = rejects(schema.clone(), json!({}));
    assert!(
        message.contains("validation failed in path /"),
        "got: {message}"
    );
    assert!(message.contains("required"), "got: {message}");

    rejects(schema, json!({"a": "one"}));
}

#[test]
fn test_required_accepts_explicit_null() {
    accepts(json!({"required": ["a"]}), json!({"a": null}));
}

#[test]
fn test_nested_failure_reports_deepest_path() {
    let schema = json!({
        "properties": {"a": {"properties": {"b": {"type": "number"}}}}
    });
    let message = rejects(schema, json!({"a": {"b": "s"}}));
    assert!(
        message.contains("validation failed in path /a/b"),
        "got: {message}"
    );
}

#[test]
fn test_additional_properties_reject_all() {
    let schema = json!({"additionalProperties": false});
    accepts(schema.clone(), json!({}));
    accepts(schema.clone(), json!("not an object"));
    let message = rejects(schema, json!({"anything": 1}));
    assert!(message.contains("additionalProperties"), "got: {message}");
}

#[test]
fn test_additional_properties_skips_named_and_pattern_matched() {
    let schema = json!({
        "properties": {"a": {}},
        "patternProperties": {"^p": {"type": "number"}},
        "additionalProperties": false
    });
    accepts(schema.clone(), json!({"a": true, "p1": 1, "p2": 2}));
    rejects(schema.clone(), json!({"q": 1}));
    // A pattern-matched property is still validated by patternProperties.
    rejects(schema, json!({"p1": "not a number"}));
}

#[test]
fn test_additional_properties_with_schema() {
    let schema = json!({
        "properties": {"a": {}},
        "additionalProperties": {"type": "string"}
    });
    accepts(schema.clone(), json!({"a": 1, "extra": "ok"}));
    rejects(schema, json!({"a": 1, "extra": 2}));
}

#[test]
fn test_property_names() {
    let schema = json!({"propertyNames": {"maxLength": 3}});
    accepts(schema.clone(), json!({"ab": 1, "abc": 2}));
    let message = rejects(schema, json!({"toolong": 1}));
    assert!(message.contains("propertyNames"), "got: {message}");
}

#[test]
fn test_dependencies_property_list() {
    let schema = json!({"dependencies": {"credit_card": ["billing_address"]}});
    accepts(schema.clone(), json!({"credit_card": 5555, "billing_address": "x"}));
    accepts(schema.clone(), json!({"billing_address": "x"}));
    let message = rejects(schema, json!({"credit_card": 5555}));
    assert!(message.contains("dependencies"), "got: {message}");
}

#[test]
fn test_dependencies_schema() {
    let schema = json!({
        "dependencies": {"credit_card": {"required": ["billing_address"]}}
    });
    accepts(schema.clone(), json!({"credit_card": 5555, "billing_address": "x"}));
    rejects(schema, json!({"credit_card": 5555}));
}

#[test]
fn test_dependencies_boolean_schema() {
    let schema = json!({"dependencies": {"a": false}});
    accepts(schema.clone(), json!({"b": 1}));
    rejects(schema, json!({"a": 1}));
}

#[test]
fn test_property_counts() {
    accepts(json!({"minProperties": 1, "maxProperties": 2}), json!({"a": 1}));
    rejects(json!({"minProperties": 1}), json!({}));
    rejects(json!({"maxProperties": 1}), json!({"a": 1, "b": 2}));
}

// ----------------------------------------------------------------- Arrays

#[test]
fn test_items_single_schema() {
    let schema = json!({"items": {"type": "number"}});
    accepts(schema.clone(), json!([]));
    accepts(schema.clone(), json!([1, 2.5, 3]));
    let message = rejects(schema, json!([1, "two"]));
    assert!(
        message.contains("validation failed in path /1"),
        "got: {message}"
    );
}

#[test]
fn test_items_tuple_and_additional_items() {
    // S5
    let schema = json!({
        "items": [{"type": "string"}, {"type": "number"}],
        "additionalItems": {"type": "boolean"}
    });
    accepts(schema.clone(), json!(["x", 1, true, false]));
    accepts(schema.clone(), json!(["x", 1]));
    let message = rejects(schema.clone(), json!(["x", 1, 0]));
    assert!(message.contains("additionalItems"), "got: {message}");
    rejects(schema.clone(), json!([1, 1]));
    // A tuple demands at least as many elements as it has schemas.
    rejects(schema, json!(["x"]));
}

#[test]
fn test_additional_items_inert_without_tuple_items() {
    let schema = json!({
        "items": {"type": "number"},
        "additionalItems": {"type": "boolean"}
    });
    accepts(schema, json!([1, 2, 3]));
}

#[test]
fn test_items_boolean_schema() {
    accepts(json!({"items": false}), json!([]));
    rejects(json!({"items": false}), json!([1]));
}

#[test]
fn test_contains() {
    let schema = json!({"contains": {"type": "string"}});
    accepts(schema.clone(), json!([1, 2, "found"]));
    let message = rejects(schema, json!([1, 2, 3]));
    assert!(message.contains("contains"), "got: {message}");
}

#[test]
fn test_item_counts() {
    accepts(json!({"minItems": 2, "maxItems": 3}), json!([1, 2]));
    rejects(json!({"minItems": 2}), json!([1]));
    rejects(json!({"maxItems": 2}), json!([1, 2, 3]));
}

#[test]
fn test_unique_items() {
    accepts(json!({"uniqueItems": true}), json!([1, 2, "1"]));
    rejects(json!({"uniqueItems": true}), json!([1, 2, 1]));
    // Equality is canonical-JSON equality: key order does not matter.
    rejects(
        json!({"uniqueItems": true}),
        json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}]),
    );
    // An explicit false imposes nothing.
    accepts(json!({"uniqueItems": false}), json!([1, 1]));
}

// ----------------------------------------------------------------- Composition

#[test]
fn test_single_element_all_of_and_any_of_behave_like_the_schema() {
    let inner = json!({"type": "integer", "minimum": 2});
    for instance in [json!(1), json!(2), json!(3.5), json!("x")] {
        let direct = verdict(&inner, &instance).is_ok();
        let all_of = verdict(&json!({"allOf": [inner.clone()]}), &instance).is_ok();
        let any_of = verdict(&json!({"anyOf": [inner.clone()]}), &instance).is_ok();
        assert_eq!(direct, all_of, "allOf [S] != S for {instance}");
        assert_eq!(direct, any_of, "anyOf [S] != S for {instance}");
    }
}

#[test]
fn test_double_negation_matches_the_schema() {
    let inner = json!({"type": "string"});
    for instance in [json!("s"), json!(5), json!(null)] {
        let direct = verdict(&inner, &instance).is_ok();
        let doubled = verdict(&json!({"not": {"not": inner.clone()}}), &instance).is_ok();
        assert_eq!(direct, doubled, "not(not(S)) != S for {instance}");
    }
}

#[test]
fn test_any_of() {
    let schema = json!({"anyOf": [{"type": "string"}, {"minimum": 10}]});
    accepts(schema.clone(), json!("s"));
    accepts(schema.clone(), json!(12));
    rejects(schema, json!(5));
}

#[test]
fn test_all_of() {
    let schema = json!({"allOf": [{"type": "number"}, {"minimum": 10}]});
    accepts(schema.clone(), json!(12));
    rejects(schema.clone(), json!(5));
    rejects(schema, json!("s"));
}

#[test]
fn test_one_of_requires_exactly_one_match() {
    // S7: every integer is also a number, so 1 matches both branches.
    let schema = json!({"oneOf": [{"type": "number"}, {"type": "integer"}]});
    let message = rejects(schema.clone(), json!(1));
    assert!(message.contains("oneOf"), "got: {message}");
    accepts(schema.clone(), json!(1.5));
    rejects(schema, json!("s"));
}

#[test]
fn test_not() {
    let schema = json!({"not": {"type": "string"}});
    accepts(schema.clone(), json!(5));
    rejects(schema, json!("s"));
}

#[test]
fn test_if_then_else() {
    let schema = json!({
        "if": {"type": "string"},
        "then": {"minLength": 3},
        "else": {"minimum": 10}
    });
    accepts(schema.clone(), json!("abc"));
    rejects(schema.clone(), json!("ab"));
    accepts(schema.clone(), json!(10));
    rejects(schema.clone(), json!(5));
    // `if` fails, `else` has nothing to say about booleans.
    accepts(schema, json!(true));
}

#[test]
fn test_if_without_branches_never_fails() {
    accepts(json!({"if": {"type": "string"}}), json!(5));
    accepts(json!({"if": {"type": "string"}}), json!("s"));
}

#[test]
fn test_then_without_if_is_inert() {
    accepts(json!({"then": {"type": "string"}}), json!(5));
}

// ----------------------------------------------------------------- Error surface

#[test]
fn test_error_path_accessor() {
    let err = verdict(&json!(false), &json!(1)).unwrap_err();
    assert_eq!(err.path(), Some("/"));

    let err = verdict(
        &json!({"properties": {"a": {"type": "string"}}}),
        &json!({"a": 1}),
    )
    .unwrap_err();
    assert_eq!(err.path(), Some("/a"));
}

#[test]
fn test_malformed_instance_bytes() {
    let registry = Registry::new();
    let root = registry.compile(b"{}").unwrap();
    let err = root.validate_bytes(&registry, b"{not json").unwrap_err();
    assert!(matches!(err, ValidationError::MalformedInstance(_)));
}

#[test]
fn test_global_registry_shims() {
    let root = jsonvalid::compile(br#"{"$id": "global-shim-test", "type": "array"}"#)
        .expect("schema must compile on the global registry");
    assert!(jsonvalid::validate(&root, b"[1, 2]").is_ok());
    assert!(jsonvalid::validate(&root, b"{}").is_err());
}

#[test]
fn test_first_reported_error_follows_keyword_order() {
    // `type` runs before the string keywords, so a non-string instance
    // trips `type`, not `minLength`.
    let message = rejects(json!({"minLength": 5, "type": "string"}), json!(42));
    assert!(message.contains("type"), "got: {message}");
    assert!(!message.contains("minLength"), "got: {message}");
}
