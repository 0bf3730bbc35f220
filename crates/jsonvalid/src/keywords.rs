//! The closed keyword assertion set.
//!
//! Every supported keyword is a variant of [`Assertion`], with any
//! sibling-dependent data baked in at compile time, and
//! [`validate_assertion`] is the single exhaustive dispatch. Each keyword
//! applies only to instances of its natural JSON type; any other instance
//! type succeeds vacuously (`type` itself is the keyword that polices
//! types).

use std::collections::HashMap;

use regex::Regex;
use serde_json::Value;

use crate::error::{AssertionError, KeywordValidationError};
use crate::node::{validate_node, JsonData, NodeId, Scope};

/// A schema-supplied regex, compiled once, with its source kept for error
/// messages.
#[derive(Debug, Clone)]
pub(crate) struct CompiledPattern {
    pub(crate) source: String,
    pub(crate) regex: Regex,
}

/// The `items` keyword: one schema for every element, or one schema per
/// position.
#[derive(Debug, Clone)]
pub(crate) enum Items {
    Single(NodeId),
    Tuple(Vec<NodeId>),
}

/// One entry of the `dependencies` keyword.
#[derive(Debug, Clone)]
pub(crate) enum Dependency {
    Schema(NodeId),
    Required(Vec<String>),
}

#[derive(Debug, Clone)]
pub(crate) enum Assertion {
    /// Raw `type` value; its shape is interrogated at validation time.
    Type(Value),
    /// Canonical re-serialisation of the `const` value.
    Const(String),
    /// Canonical re-serialisations of the `enum` members.
    Enum(Vec<String>),
    MinLength(u64),
    MaxLength(u64),
    Pattern(CompiledPattern),
    Format(String),
    MultipleOf(f64),
    Minimum(f64),
    Maximum(f64),
    ExclusiveMinimum(f64),
    ExclusiveMaximum(f64),
    Required(Vec<String>),
    PropertyNames(NodeId),
    Properties(Vec<(String, NodeId)>),
    AdditionalProperties {
        schema: NodeId,
        sibling_properties: Vec<String>,
        sibling_pattern_properties: Vec<CompiledPattern>,
    },
    PatternProperties(Vec<(CompiledPattern, NodeId)>),
    Dependencies(Vec<(String, Dependency)>),
    MinProperties(u64),
    MaxProperties(u64),
    Items(Items),
    Contains(NodeId),
    AdditionalItems {
        schema: NodeId,
        /// `Some(len)` when the sibling `items` is a tuple of `len` schemas;
        /// `None` deactivates the keyword.
        sibling_tuple_len: Option<usize>,
    },
    MinItems(u64),
    MaxItems(u64),
    UniqueItems(bool),
    AnyOf(Vec<NodeId>),
    AllOf(Vec<NodeId>),
    OneOf(Vec<NodeId>),
    Not(NodeId),
    If {
        schema: NodeId,
        sibling_then: Option<NodeId>,
        sibling_else: Option<NodeId>,
    },
}

fn fail(keyword: &str, reason: impl Into<String>) -> AssertionError {
    KeywordValidationError::new(keyword, reason).into()
}

pub(crate) fn validate_assertion(
    assertion: &Assertion,
    scope: Scope<'_>,
    path: &str,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    match assertion {
        Assertion::Type(raw) => validate_type(raw, data),
        Assertion::Const(expected) => validate_const(expected, data),
        Assertion::Enum(members) => validate_enum(members, data),
        Assertion::MinLength(min) => validate_min_length(*min, data),
        Assertion::MaxLength(max) => validate_max_length(*max, data),
        Assertion::Pattern(pattern) => validate_pattern(pattern, data),
        Assertion::Format(name) => validate_format(name, data),
        Assertion::MultipleOf(divisor) => validate_multiple_of(*divisor, data),
        Assertion::Minimum(bound) => validate_minimum(*bound, data),
        Assertion::Maximum(bound) => validate_maximum(*bound, data),
        Assertion::ExclusiveMinimum(bound) => validate_exclusive_minimum(*bound, data),
        Assertion::ExclusiveMaximum(bound) => validate_exclusive_maximum(*bound, data),
        Assertion::Required(names) => validate_required(names, data),
        Assertion::PropertyNames(schema) => validate_property_names(*schema, scope, data),
        Assertion::Properties(entries) => validate_properties(entries, scope, path, data),
        Assertion::AdditionalProperties {
            schema,
            sibling_properties,
            sibling_pattern_properties,
        } => validate_additional_properties(
            *schema,
            sibling_properties,
            sibling_pattern_properties,
            scope,
            path,
            data,
        ),
        Assertion::PatternProperties(entries) => {
            validate_pattern_properties(entries, scope, path, data)
        }
        Assertion::Dependencies(entries) => validate_dependencies(entries, scope, data),
        Assertion::MinProperties(min) => validate_min_properties(*min, data),
        Assertion::MaxProperties(max) => validate_max_properties(*max, data),
        Assertion::Items(items) => validate_items(items, scope, path, data),
        Assertion::Contains(schema) => validate_contains(*schema, scope, path, data),
        Assertion::AdditionalItems {
            schema,
            sibling_tuple_len,
        } => validate_additional_items(*schema, *sibling_tuple_len, scope, path, data),
        Assertion::MinItems(min) => validate_min_items(*min, data),
        Assertion::MaxItems(max) => validate_max_items(*max, data),
        Assertion::UniqueItems(enforce) => validate_unique_items(*enforce, data),
        Assertion::AnyOf(schemas) => validate_any_of(schemas, scope, data),
        Assertion::AllOf(schemas) => validate_all_of(schemas, scope, data),
        Assertion::OneOf(schemas) => validate_one_of(schemas, scope, data),
        Assertion::Not(schema) => validate_not(*schema, scope, data),
        Assertion::If {
            schema,
            sibling_then,
            sibling_else,
        } => validate_if(*schema, *sibling_then, *sibling_else, scope, data),
    }
}

// ----------------------------------------------------------------- Generic

fn validate_type(raw: &Value, data: &JsonData<'_>) -> Result<(), AssertionError> {
    match raw {
        Value::String(name) => assert_json_type(name, data.value).map_err(Into::into),
        Value::Array(names) => {
            for name in names {
                match name.as_str() {
                    Some(name) => {
                        if assert_json_type(name, data.value).is_ok() {
                            return Ok(());
                        }
                    }
                    None => {
                        return Err(fail(
                            "type",
                            "\"type\" field in schema must be string or array of strings",
                        ))
                    }
                }
            }
            Err(fail(
                "type",
                "inspected value does not match any of the valid types in the schema",
            ))
        }
        _ => Err(fail(
            "type",
            "\"type\" field in schema must be string or array of strings",
        )),
    }
}

fn assert_json_type(json_type: &str, value: &Value) -> Result<(), KeywordValidationError> {
    let matched = match json_type {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        // `integer` matches any number whose value is mathematically
        // integral, so 3.0 qualifies.
        "integer" => value.as_f64().map(|n| n.fract() == 0.0).unwrap_or(false),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        other => {
            return Err(KeywordValidationError::new(
                "type",
                format!("invalid json type {other}"),
            ))
        }
    };

    if matched {
        Ok(())
    } else {
        Err(KeywordValidationError::new(
            "type",
            format!("inspected value expected to be a json {json_type}"),
        ))
    }
}

fn validate_const(expected: &str, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if data.raw == expected {
        Ok(())
    } else {
        Err(fail(
            "const",
            format!("inspected value not equal to \"{expected}\""),
        ))
    }
}

fn validate_enum(members: &[String], data: &JsonData<'_>) -> Result<(), AssertionError> {
    if members.iter().any(|member| *member == data.raw) {
        Ok(())
    } else {
        Err(fail(
            "enum",
            "inspected value does not match any of the items in \"enum\" array",
        ))
    }
}

// ----------------------------------------------------------------- Strings

fn validate_min_length(min: u64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(s) = data.value.as_str() {
        if (s.len() as u64) < min {
            return Err(fail(
                "minLength",
                format!("inspected string is shorter than {min}"),
            ));
        }
    }
    Ok(())
}

fn validate_max_length(max: u64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(s) = data.value.as_str() {
        if (s.len() as u64) > max {
            return Err(fail(
                "maxLength",
                format!("inspected string is longer than {max}"),
            ));
        }
    }
    Ok(())
}

fn validate_pattern(pattern: &CompiledPattern, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(s) = data.value.as_str() {
        if !pattern.regex.is_match(s) {
            return Err(fail(
                "pattern",
                format!("value {s} does not match to pattern {}", pattern.source),
            ));
        }
    }
    Ok(())
}

fn validate_format(name: &str, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(s) = data.value.as_str() {
        jsonvalid_format::check(name, s)
            .map_err(|e| fail("format", format!("{name} incorrectly formatted: {e}")))?;
    }
    Ok(())
}

// ----------------------------------------------------------------- Numbers

fn validate_multiple_of(divisor: f64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(v) = data.value.as_f64() {
        if v % divisor != 0.0 {
            return Err(fail(
                "multipleOf",
                format!("inspected value is not a multiple of {divisor}"),
            ));
        }
    }
    Ok(())
}

fn validate_minimum(bound: f64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(v) = data.value.as_f64() {
        if v < bound {
            return Err(fail(
                "minimum",
                format!("inspected value is less than {bound}"),
            ));
        }
    }
    Ok(())
}

fn validate_maximum(bound: f64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(v) = data.value.as_f64() {
        if v > bound {
            return Err(fail(
                "maximum",
                format!("inspected value is greater than {bound}"),
            ));
        }
    }
    Ok(())
}

fn validate_exclusive_minimum(bound: f64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(v) = data.value.as_f64() {
        if v <= bound {
            return Err(fail(
                "exclusiveMinimum",
                format!("inspected value is not greater than {bound}"),
            ));
        }
    }
    Ok(())
}

fn validate_exclusive_maximum(bound: f64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(v) = data.value.as_f64() {
        if v >= bound {
            return Err(fail(
                "exclusiveMaximum",
                format!("inspected value is not less than {bound}"),
            ));
        }
    }
    Ok(())
}

// ----------------------------------------------------------------- Objects

fn validate_required(names: &[String], data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        for name in names {
            if !object.contains_key(name) {
                return Err(fail(
                    "required",
                    format!("Missing required property - {name}"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_property_names(
    schema: NodeId,
    scope: Scope<'_>,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        for name in object.keys() {
            let name_value = Value::String(name.clone());
            validate_node(scope, schema, "", &name_value).map_err(|e| {
                fail(
                    "propertyNames",
                    format!("property name \"{name}\" failed in validation: {e}"),
                )
            })?;
        }
    }
    Ok(())
}

fn validate_properties(
    entries: &[(String, NodeId)],
    scope: Scope<'_>,
    path: &str,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        for (key, schema) in entries {
            if object.contains_key(key) {
                validate_node(scope, *schema, &format!("{path}/{key}"), data.value)?;
            }
        }
    }
    Ok(())
}

fn validate_additional_properties(
    schema: NodeId,
    sibling_properties: &[String],
    sibling_pattern_properties: &[CompiledPattern],
    scope: Scope<'_>,
    path: &str,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        for key in object.keys() {
            let named = sibling_properties.iter().any(|name| name == key);
            let matched = sibling_pattern_properties
                .iter()
                .any(|pattern| pattern.regex.is_match(key));
            if named || matched {
                continue;
            }

            validate_node(scope, schema, &format!("{path}/{key}"), data.value).map_err(|e| {
                fail(
                    "additionalProperties",
                    format!("property \"{key}\" failed in validation: {e}"),
                )
            })?;
        }
    }
    Ok(())
}

fn validate_pattern_properties(
    entries: &[(CompiledPattern, NodeId)],
    scope: Scope<'_>,
    path: &str,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        for (pattern, schema) in entries {
            for key in object.keys() {
                if !pattern.regex.is_match(key) {
                    continue;
                }
                validate_node(scope, *schema, &format!("{path}/{key}"), data.value).map_err(
                    |e| {
                        fail(
                            "patternProperties",
                            format!(
                                "property \"{key}\" that matches the pattern \"{}\" failed in validation: {e}",
                                pattern.source
                            ),
                        )
                    },
                )?;
            }
        }
    }
    Ok(())
}

fn validate_dependencies(
    entries: &[(String, Dependency)],
    scope: Scope<'_>,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        for (trigger, dependency) in entries {
            if !object.contains_key(trigger) {
                continue;
            }
            match dependency {
                Dependency::Schema(schema) => {
                    validate_node(scope, *schema, "", data.value).map_err(|e| {
                        fail(
                            "dependencies",
                            format!(
                                "inspected value failed in validation against sub-schema given in \"{trigger}\" dependency: {e}"
                            ),
                        )
                    })?;
                }
                Dependency::Required(names) => {
                    for name in names {
                        if !object.contains_key(name) {
                            return Err(fail(
                                "dependencies",
                                format!(
                                    "missing property \"{name}\" although it is required according to \"{trigger}\" dependency"
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn validate_min_properties(min: u64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        if (object.len() as u64) < min {
            return Err(fail(
                "minProperties",
                format!("inspected value must contain at least {min} properties"),
            ));
        }
    }
    Ok(())
}

fn validate_max_properties(max: u64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(object) = data.value.as_object() {
        if (object.len() as u64) > max {
            return Err(fail(
                "maxProperties",
                format!("inspected value may contain at most {max} properties"),
            ));
        }
    }
    Ok(())
}

// ----------------------------------------------------------------- Arrays

fn validate_items(
    items: &Items,
    scope: Scope<'_>,
    path: &str,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if let Some(array) = data.value.as_array() {
        match items {
            Items::Single(schema) => {
                for index in 0..array.len() {
                    validate_node(scope, *schema, &format!("{path}/{index}"), data.value)?;
                }
            }
            Items::Tuple(schemas) => {
                if array.len() < schemas.len() {
                    return Err(fail(
                        "items",
                        "when \"items\" field contains a list of schemas, the inspected array must contain at least the same amount of items",
                    ));
                }
                for (index, schema) in schemas.iter().enumerate() {
                    validate_node(scope, *schema, &format!("{path}/{index}"), data.value)?;
                }
            }
        }
    }
    Ok(())
}

fn validate_contains(
    schema: NodeId,
    scope: Scope<'_>,
    path: &str,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if let Some(array) = data.value.as_array() {
        for index in 0..array.len() {
            if validate_node(scope, schema, &format!("{path}/{index}"), data.value).is_ok() {
                return Ok(());
            }
        }
        return Err(fail(
            "contains",
            "could not validate any of the inspected array's items against the given schema",
        ));
    }
    Ok(())
}

fn validate_additional_items(
    schema: NodeId,
    sibling_tuple_len: Option<usize>,
    scope: Scope<'_>,
    path: &str,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    // Active only when the sibling `items` is a tuple of schemas.
    let tuple_len = match sibling_tuple_len {
        Some(len) => len,
        None => return Ok(()),
    };

    if let Some(array) = data.value.as_array() {
        for index in tuple_len..array.len() {
            validate_node(scope, schema, &format!("{path}/{index}"), data.value).map_err(|e| {
                fail(
                    "additionalItems",
                    format!("item at position {index} failed in validation: {e}"),
                )
            })?;
        }
    }
    Ok(())
}

fn validate_min_items(min: u64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(array) = data.value.as_array() {
        if (array.len() as u64) < min {
            return Err(fail(
                "minItems",
                format!("inspected array must contain at least {min} items"),
            ));
        }
    }
    Ok(())
}

fn validate_max_items(max: u64, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if let Some(array) = data.value.as_array() {
        if (array.len() as u64) > max {
            return Err(fail(
                "maxItems",
                format!("inspected array must contain at most {max} items"),
            ));
        }
    }
    Ok(())
}

fn validate_unique_items(enforce: bool, data: &JsonData<'_>) -> Result<(), AssertionError> {
    if !enforce {
        return Ok(());
    }
    if let Some(array) = data.value.as_array() {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (index, item) in array.iter().enumerate() {
            let raw = serde_json::to_string(item).unwrap_or_default();
            if let Some(&previous) = seen.get(&raw) {
                return Err(fail(
                    "uniqueItems",
                    format!(
                        "the inspected array contains two equal items at indices: {previous}, {index}"
                    ),
                ));
            }
            seen.insert(raw, index);
        }
    }
    Ok(())
}

// ----------------------------------------------------------------- Composition

fn validate_any_of(
    schemas: &[NodeId],
    scope: Scope<'_>,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    for schema in schemas {
        if validate_node(scope, *schema, "", data.value).is_ok() {
            return Ok(());
        }
    }
    Err(fail(
        "anyOf",
        "inspected value could not be validated against any of the given schemas",
    ))
}

fn validate_all_of(
    schemas: &[NodeId],
    scope: Scope<'_>,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    for schema in schemas {
        if validate_node(scope, *schema, "", data.value).is_err() {
            return Err(fail(
                "allOf",
                "inspected value could not be validated against all of the given schemas",
            ));
        }
    }
    Ok(())
}

fn validate_one_of(
    schemas: &[NodeId],
    scope: Scope<'_>,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    let mut matched = false;
    for schema in schemas {
        if validate_node(scope, *schema, "", data.value).is_ok() {
            if matched {
                return Err(fail(
                    "oneOf",
                    "inspected data is valid against more than one given schema",
                ));
            }
            matched = true;
        }
    }

    if matched {
        Ok(())
    } else {
        Err(fail(
            "oneOf",
            "inspected value could not be validated against any of the given schemas",
        ))
    }
}

fn validate_not(
    schema: NodeId,
    scope: Scope<'_>,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    if validate_node(scope, schema, "", data.value).is_ok() {
        Err(fail(
            "not",
            "inspected value did not fail on validation against the schema defined by this keyword",
        ))
    } else {
        Ok(())
    }
}

fn validate_if(
    schema: NodeId,
    sibling_then: Option<NodeId>,
    sibling_else: Option<NodeId>,
    scope: Scope<'_>,
    data: &JsonData<'_>,
) -> Result<(), AssertionError> {
    // The outcome of `if` itself is never a failure; it only selects which
    // of `then`/`else` applies.
    let branch = if validate_node(scope, schema, "", data.value).is_ok() {
        sibling_then
    } else {
        sibling_else
    };

    if let Some(branch) = branch {
        validate_node(scope, branch, "", data.value)?;
    }
    Ok(())
}
