//! Schema compiler: raw JSON in, an arena of schema nodes plus the
//! subschema index out.
//!
//! Subschemas are compiled depth-first, so children occupy lower arena slots
//! than the node that owns them. Every interior subschema is recorded in the
//! index under its canonical path — the source document's field names
//! verbatim, with the historical no-separator forms for `dependencies` keys
//! and `items` tuple positions.

use std::collections::HashMap;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaCompilationError;
use crate::keywords::{Assertion, CompiledPattern, Dependency, Items};
use crate::node::{NodeId, SchemaNode};
use crate::root::RootSchema;

pub(crate) fn compile_root(schema: &[u8]) -> Result<RootSchema, SchemaCompilationError> {
    let document: Value = serde_json::from_slice(schema).map_err(|e| {
        SchemaCompilationError::new("", format!("schema document is not valid JSON: {e}"))
    })?;

    let mut compiler = Compiler::default();
    let entry = compiler.compile_node(&document, "")?;
    let id = compiler.nodes[entry.0].id.clone().unwrap_or_default();

    Ok(RootSchema::new(id, entry, compiler.nodes, compiler.index))
}

#[derive(Default)]
struct Compiler {
    nodes: Vec<SchemaNode>,
    index: HashMap<String, NodeId>,
}

impl Compiler {
    fn push(&mut self, node: SchemaNode, path: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        // The root itself is not indexed under the empty path.
        if !path.is_empty() {
            self.index.entry(path.to_string()).or_insert(id);
        }
        id
    }

    fn compile_node(
        &mut self,
        schema: &Value,
        path: &str,
    ) -> Result<NodeId, SchemaCompilationError> {
        match schema {
            Value::Bool(true) => Ok(self.push(SchemaNode::empty(), path)),
            Value::Bool(false) => Ok(self.push(SchemaNode::reject_all(), path)),
            Value::Object(fields) => self.compile_object(fields, path),
            _ => Err(SchemaCompilationError::new(
                path,
                "a valid json schema must be a json object or a boolean",
            )),
        }
    }

    fn compile_object(
        &mut self,
        fields: &Map<String, Value>,
        path: &str,
    ) -> Result<NodeId, SchemaCompilationError> {
        let mut node = SchemaNode::empty();
        node.id = optional_string(fields, "$id", path)?;
        node.reference = optional_string(fields, "$ref", path)?;

        // Assertions are pushed in the driver's fixed evaluation order:
        // type checks, strings, numbers, objects, arrays, composition.
        if let Some(raw) = fields.get("type") {
            node.assertions.push(Assertion::Type(raw.clone()));
        }
        if let Some(value) = fields.get("const") {
            node.assertions.push(Assertion::Const(canonical(value, path)?));
        }
        if let Some(value) = fields.get("enum") {
            let members = value.as_array().ok_or_else(|| {
                SchemaCompilationError::new(path, "\"enum\" must be an array")
            })?;
            let members = members
                .iter()
                .map(|member| canonical(member, path))
                .collect::<Result<Vec<_>, _>>()?;
            node.assertions.push(Assertion::Enum(members));
        }

        if let Some(value) = fields.get("minLength") {
            node.assertions
                .push(Assertion::MinLength(count(value, "minLength", path)?));
        }
        if let Some(value) = fields.get("maxLength") {
            node.assertions
                .push(Assertion::MaxLength(count(value, "maxLength", path)?));
        }
        if let Some(value) = fields.get("pattern") {
            let source = string(value, "pattern", path)?;
            node.assertions
                .push(Assertion::Pattern(compile_pattern(source, path)?));
        }
        if let Some(value) = fields.get("format") {
            node.assertions
                .push(Assertion::Format(string(value, "format", path)?.to_string()));
        }

        if let Some(value) = fields.get("multipleOf") {
            node.assertions
                .push(Assertion::MultipleOf(number(value, "multipleOf", path)?));
        }
        if let Some(value) = fields.get("minimum") {
            node.assertions
                .push(Assertion::Minimum(number(value, "minimum", path)?));
        }
        if let Some(value) = fields.get("maximum") {
            node.assertions
                .push(Assertion::Maximum(number(value, "maximum", path)?));
        }
        if let Some(value) = fields.get("exclusiveMinimum") {
            node.assertions.push(Assertion::ExclusiveMinimum(number(
                value,
                "exclusiveMinimum",
                path,
            )?));
        }
        if let Some(value) = fields.get("exclusiveMaximum") {
            node.assertions.push(Assertion::ExclusiveMaximum(number(
                value,
                "exclusiveMaximum",
                path,
            )?));
        }

        if let Some(value) = fields.get("required") {
            node.assertions
                .push(Assertion::Required(string_array(value, "required", path)?));
        }
        if let Some(value) = fields.get("propertyNames") {
            let schema = self.compile_node(value, &format!("{path}/propertyNames"))?;
            node.assertions.push(Assertion::PropertyNames(schema));
        }
        if let Some(value) = fields.get("properties") {
            let map = value.as_object().ok_or_else(|| {
                SchemaCompilationError::new(path, "\"properties\" must be an object")
            })?;
            let mut entries = Vec::with_capacity(map.len());
            for (key, subschema) in map {
                let child = self.compile_node(subschema, &format!("{path}/properties/{key}"))?;
                entries.push((key.clone(), child));
            }
            node.assertions.push(Assertion::Properties(entries));
        }
        if let Some(value) = fields.get("additionalProperties") {
            let schema = self.compile_node(value, &format!("{path}/additionalProperties"))?;
            node.assertions.push(Assertion::AdditionalProperties {
                schema,
                sibling_properties: sibling_property_names(fields),
                sibling_pattern_properties: sibling_patterns(fields, path)?,
            });
        }
        if let Some(value) = fields.get("patternProperties") {
            let map = value.as_object().ok_or_else(|| {
                SchemaCompilationError::new(path, "\"patternProperties\" must be an object")
            })?;
            let mut entries = Vec::with_capacity(map.len());
            for (key, subschema) in map {
                let pattern = compile_pattern(key, path)?;
                let child =
                    self.compile_node(subschema, &format!("{path}/patternProperties/{key}"))?;
                entries.push((pattern, child));
            }
            node.assertions.push(Assertion::PatternProperties(entries));
        }
        if let Some(value) = fields.get("dependencies") {
            let map = value.as_object().ok_or_else(|| {
                SchemaCompilationError::new(path, "\"dependencies\" must be an object")
            })?;
            let mut entries = Vec::with_capacity(map.len());
            for (key, dependency) in map {
                let dependency_path = format!("{path}/dependencies{key}");
                let compiled = match dependency {
                    Value::Object(_) | Value::Bool(_) => {
                        Dependency::Schema(self.compile_node(dependency, &dependency_path)?)
                    }
                    Value::Array(_) => Dependency::Required(string_array(
                        dependency,
                        "dependencies",
                        &dependency_path,
                    )?),
                    _ => {
                        return Err(SchemaCompilationError::new(
                            &dependency_path,
                            "dependency value must be a json schema or a json array",
                        ))
                    }
                };
                entries.push((key.clone(), compiled));
            }
            node.assertions.push(Assertion::Dependencies(entries));
        }
        if let Some(value) = fields.get("minProperties") {
            node.assertions
                .push(Assertion::MinProperties(count(value, "minProperties", path)?));
        }
        if let Some(value) = fields.get("maxProperties") {
            node.assertions
                .push(Assertion::MaxProperties(count(value, "maxProperties", path)?));
        }

        if let Some(value) = fields.get("items") {
            let items = match value {
                Value::Object(_) | Value::Bool(_) => {
                    Items::Single(self.compile_node(value, &format!("{path}/items"))?)
                }
                Value::Array(list) => {
                    let mut schemas = Vec::with_capacity(list.len());
                    for (index, subschema) in list.iter().enumerate() {
                        schemas.push(self.compile_node(subschema, &format!("{path}/items{index}"))?);
                    }
                    Items::Tuple(schemas)
                }
                _ => {
                    return Err(SchemaCompilationError::new(
                        path,
                        "\"items\" field value in schema must be a valid json schema or an array of json schemas",
                    ))
                }
            };
            node.assertions.push(Assertion::Items(items));
        }
        if let Some(value) = fields.get("contains") {
            let schema = self.compile_node(value, &format!("{path}/contains"))?;
            node.assertions.push(Assertion::Contains(schema));
        }
        if let Some(value) = fields.get("additionalItems") {
            let schema = self.compile_node(value, &format!("{path}/additionalItems"))?;
            let sibling_tuple_len = fields
                .get("items")
                .and_then(Value::as_array)
                .map(|tuple| tuple.len());
            node.assertions.push(Assertion::AdditionalItems {
                schema,
                sibling_tuple_len,
            });
        }
        if let Some(value) = fields.get("minItems") {
            node.assertions
                .push(Assertion::MinItems(count(value, "minItems", path)?));
        }
        if let Some(value) = fields.get("maxItems") {
            node.assertions
                .push(Assertion::MaxItems(count(value, "maxItems", path)?));
        }
        if let Some(value) = fields.get("uniqueItems") {
            let enforce = value.as_bool().ok_or_else(|| {
                SchemaCompilationError::new(path, "\"uniqueItems\" must be a boolean")
            })?;
            node.assertions.push(Assertion::UniqueItems(enforce));
        }

        if let Some(value) = fields.get("anyOf") {
            let schemas = self.compile_schema_array(value, "anyOf", path)?;
            node.assertions.push(Assertion::AnyOf(schemas));
        }
        if let Some(value) = fields.get("allOf") {
            let schemas = self.compile_schema_array(value, "allOf", path)?;
            node.assertions.push(Assertion::AllOf(schemas));
        }
        if let Some(value) = fields.get("oneOf") {
            let schemas = self.compile_schema_array(value, "oneOf", path)?;
            node.assertions.push(Assertion::OneOf(schemas));
        }
        if let Some(value) = fields.get("not") {
            let schema = self.compile_node(value, &format!("{path}/not"))?;
            node.assertions.push(Assertion::Not(schema));
        }
        if let Some(value) = fields.get("if") {
            let schema = self.compile_node(value, &format!("{path}/if"))?;
            // `then` and `else` only take effect (and are only indexed)
            // alongside an `if` at the same level.
            let sibling_then = match fields.get("then") {
                Some(subschema) => Some(self.compile_node(subschema, &format!("{path}/then"))?),
                None => None,
            };
            let sibling_else = match fields.get("else") {
                Some(subschema) => Some(self.compile_node(subschema, &format!("{path}/else"))?),
                None => None,
            };
            node.assertions.push(Assertion::If {
                schema,
                sibling_then,
                sibling_else,
            });
        }

        // `definitions` carries no assertion; its subschemas exist to be
        // referenced, so they are compiled and indexed like any other.
        if let Some(value) = fields.get("definitions") {
            let map = value.as_object().ok_or_else(|| {
                SchemaCompilationError::new(path, "\"definitions\" must be an object")
            })?;
            for (key, subschema) in map {
                self.compile_node(subschema, &format!("{path}/definitions/{key}"))?;
            }
        }

        Ok(self.push(node, path))
    }

    fn compile_schema_array(
        &mut self,
        value: &Value,
        keyword: &str,
        path: &str,
    ) -> Result<Vec<NodeId>, SchemaCompilationError> {
        let list = value.as_array().ok_or_else(|| {
            SchemaCompilationError::new(path, format!("\"{keyword}\" must be an array of schemas"))
        })?;
        let mut schemas = Vec::with_capacity(list.len());
        for (index, subschema) in list.iter().enumerate() {
            schemas.push(self.compile_node(subschema, &format!("{path}/{keyword}/{index}"))?);
        }
        Ok(schemas)
    }
}

fn sibling_property_names(fields: &Map<String, Value>) -> Vec<String> {
    fields
        .get("properties")
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn sibling_patterns(
    fields: &Map<String, Value>,
    path: &str,
) -> Result<Vec<CompiledPattern>, SchemaCompilationError> {
    match fields.get("patternProperties").and_then(Value::as_object) {
        Some(map) => map.keys().map(|key| compile_pattern(key, path)).collect(),
        None => Ok(Vec::new()),
    }
}

fn compile_pattern(source: &str, path: &str) -> Result<CompiledPattern, SchemaCompilationError> {
    Regex::new(source)
        .map(|regex| CompiledPattern {
            source: source.to_string(),
            regex,
        })
        .map_err(|e| SchemaCompilationError::new(path, format!("invalid regex \"{source}\": {e}")))
}

fn canonical(value: &Value, path: &str) -> Result<String, SchemaCompilationError> {
    serde_json::to_string(value).map_err(|e| SchemaCompilationError::new(path, e.to_string()))
}

fn optional_string(
    fields: &Map<String, Value>,
    keyword: &str,
    path: &str,
) -> Result<Option<String>, SchemaCompilationError> {
    match fields.get(keyword) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SchemaCompilationError::new(
            path,
            format!("\"{keyword}\" must be a string"),
        )),
        None => Ok(None),
    }
}

fn string<'a>(
    value: &'a Value,
    keyword: &str,
    path: &str,
) -> Result<&'a str, SchemaCompilationError> {
    value.as_str().ok_or_else(|| {
        SchemaCompilationError::new(path, format!("\"{keyword}\" must be a string"))
    })
}

fn count(value: &Value, keyword: &str, path: &str) -> Result<u64, SchemaCompilationError> {
    value.as_u64().ok_or_else(|| {
        SchemaCompilationError::new(path, format!("\"{keyword}\" must be a non-negative integer"))
    })
}

fn number(value: &Value, keyword: &str, path: &str) -> Result<f64, SchemaCompilationError> {
    value.as_f64().ok_or_else(|| {
        SchemaCompilationError::new(path, format!("\"{keyword}\" must be a number"))
    })
}

fn string_array(
    value: &Value,
    keyword: &str,
    path: &str,
) -> Result<Vec<String>, SchemaCompilationError> {
    let list = value.as_array().ok_or_else(|| {
        SchemaCompilationError::new(path, format!("\"{keyword}\" must be an array of strings"))
    })?;
    list.iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                SchemaCompilationError::new(
                    path,
                    format!("\"{keyword}\" must be an array of strings"),
                )
            })
        })
        .collect()
}
