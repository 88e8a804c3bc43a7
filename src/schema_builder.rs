//! Incremental JSON Schema inference from sample documents.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

const SCHEMA_URI: &str = "http://json-schema.org/schema#";

/// Builds a JSON Schema by merging sample documents and existing schemas.
///
/// ```
/// use ollama_structured::SchemaBuilder;
/// use serde_json::json;
///
/// let mut builder = SchemaBuilder::new();
/// builder.add_object(&json!({"name": "Ada", "age": 36}));
/// builder.add_object(&json!({"name": "Alan"}));
///
/// let schema = builder.to_schema();
/// assert_eq!(schema["properties"]["age"]["type"], "integer");
/// assert_eq!(schema["required"], json!(["name"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaBuilder {
    root: Option<Node>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a sample document into the schema.
    pub fn add_object(&mut self, value: &Value) -> &mut Self {
        self.root.get_or_insert_with(Node::default).add_value(value);
        self
    }

    /// Merge an existing schema. Non-object schema documents contribute nothing.
    pub fn add_schema(&mut self, schema: &Value) -> &mut Self {
        if let Value::Object(schema) = schema {
            self.root.get_or_insert_with(Node::default).add_schema(schema);
        }
        self
    }

    /// Consuming variant of [`SchemaBuilder::add_object`].
    pub fn with_object(mut self, value: &Value) -> Self {
        self.add_object(value);
        self
    }

    /// Consuming variant of [`SchemaBuilder::add_schema`].
    pub fn with_schema(mut self, schema: &Value) -> Self {
        self.add_schema(schema);
        self
    }

    /// Whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The schema built so far.
    pub fn to_schema(&self) -> Value {
        let mut schema = match &self.root {
            Some(node) => node.to_schema(),
            None => Map::new(),
        };
        schema.insert("$schema".to_string(), Value::String(SCHEMA_URI.to_string()));
        Value::Object(schema)
    }

    /// The schema built so far, serialized.
    pub fn to_json(&self) -> String {
        self.to_schema().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Node {
    scalars: BTreeSet<&'static str>,
    object: Option<ObjectNode>,
    array: Option<ArrayNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ObjectNode {
    properties: BTreeMap<String, Node>,
    // None until the first object is merged; afterwards the intersection of keys.
    required: Option<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ArrayNode {
    items: Option<Box<Node>>,
}

impl ObjectNode {
    fn merge_required(&mut self, keys: BTreeSet<String>) {
        self.required = Some(match self.required.take() {
            Some(required) => required.intersection(&keys).cloned().collect(),
            None => keys,
        });
    }
}

impl Node {
    fn add_value(&mut self, value: &Value) {
        match value {
            Value::Null => {
                self.scalars.insert("null");
            }
            Value::Bool(_) => {
                self.scalars.insert("boolean");
            }
            Value::Number(n) if n.is_i64() || n.is_u64() => {
                self.scalars.insert("integer");
            }
            Value::Number(_) => {
                self.scalars.insert("number");
            }
            Value::String(_) => {
                self.scalars.insert("string");
            }
            Value::Array(values) => {
                let array = self.array.get_or_insert_with(ArrayNode::default);
                for item in values {
                    array
                        .items
                        .get_or_insert_with(Box::default)
                        .add_value(item);
                }
            }
            Value::Object(map) => {
                let object = self.object.get_or_insert_with(ObjectNode::default);
                for (key, value) in map {
                    object
                        .properties
                        .entry(key.clone())
                        .or_default()
                        .add_value(value);
                }
                object.merge_required(map.keys().cloned().collect());
            }
        }
    }

    fn add_schema(&mut self, schema: &Map<String, Value>) {
        match schema.get("type") {
            Some(Value::String(name)) => self.add_type_name(name),
            Some(Value::Array(names)) => {
                for name in names.iter().filter_map(Value::as_str) {
                    self.add_type_name(name);
                }
            }
            _ => {}
        }

        if let Some(Value::Object(properties)) = schema.get("properties") {
            let object = self.object.get_or_insert_with(ObjectNode::default);
            for (key, property) in properties {
                if let Value::Object(property) = property {
                    object
                        .properties
                        .entry(key.clone())
                        .or_default()
                        .add_schema(property);
                }
            }
        }

        if let Some(object) = self.object.as_mut() {
            if schema.contains_key("properties") || schema.contains_key("required") {
                let required = schema
                    .get("required")
                    .and_then(Value::as_array)
                    .map(|keys| {
                        keys.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                object.merge_required(required);
            }
        }

        if let Some(Value::Object(items)) = schema.get("items") {
            self.array
                .get_or_insert_with(ArrayNode::default)
                .items
                .get_or_insert_with(Box::default)
                .add_schema(items);
        }
    }

    fn add_type_name(&mut self, name: &str) {
        match name {
            "object" => {
                self.object.get_or_insert_with(ObjectNode::default);
            }
            "array" => {
                self.array.get_or_insert_with(ArrayNode::default);
            }
            "null" => {
                self.scalars.insert("null");
            }
            "boolean" => {
                self.scalars.insert("boolean");
            }
            "integer" => {
                self.scalars.insert("integer");
            }
            "number" => {
                self.scalars.insert("number");
            }
            "string" => {
                self.scalars.insert("string");
            }
            _ => {}
        }
    }

    fn to_schema(&self) -> Map<String, Value> {
        let mut types: Vec<&str> = self.scalars.iter().copied().collect();
        // integer is a subset of number
        if self.scalars.contains("number") {
            types.retain(|t| *t != "integer");
        }
        if self.object.is_some() {
            types.push("object");
        }
        if self.array.is_some() {
            types.push("array");
        }
        types.sort_unstable();

        let mut schema = Map::new();
        match types.as_slice() {
            [] => {}
            [single] => {
                schema.insert("type".to_string(), Value::String(single.to_string()));
            }
            many => {
                let names = many.iter().map(|t| Value::String(t.to_string())).collect();
                schema.insert("type".to_string(), Value::Array(names));
            }
        }

        if let Some(object) = &self.object {
            let properties = object
                .properties
                .iter()
                .map(|(key, node)| (key.clone(), Value::Object(node.to_schema())))
                .collect();
            schema.insert("properties".to_string(), Value::Object(properties));

            if let Some(required) = object.required.as_ref().filter(|r| !r.is_empty()) {
                let required = required.iter().cloned().map(Value::String).collect();
                schema.insert("required".to_string(), Value::Array(required));
            }
        }

        if let Some(items) = self.array.as_ref().and_then(|array| array.items.as_ref()) {
            schema.insert("items".to_string(), Value::Object(items.to_schema()));
        }

        schema
    }
}
