//! The output-type vocabulary callers use to constrain generation.

use crate::schema::{derive_json_schema, SchemaModel};
use crate::schema_builder::SchemaBuilder;
use crate::Result;
use serde_json::Value;
use std::fmt;

/// A constraint on the shape of generated text.
///
/// "No constraint" is expressed as `Option::<OutputType>::None` at call sites.
#[derive(Debug, Clone)]
pub enum OutputType {
    /// A raw JSON Schema document.
    JsonSchema(JsonSchema),
    /// A regular expression the output must match.
    Regex(Regex),
    /// A context-free grammar the output must follow.
    Cfg(Cfg),
    /// A record-like type such as a struct deriving `schemars::JsonSchema`.
    Record(TypeSchema),
    /// A dictionary-shaped type such as `BTreeMap<String, V>`.
    Dictionary(TypeSchema),
    /// A validated model type implementing [`SchemaModel`].
    Model(TypeSchema),
    /// A schema built incrementally from samples.
    SchemaBuilder(SchemaBuilder),
    /// Any other type; carries its name for error reporting.
    Unsupported { type_name: String },
}

impl OutputType {
    pub fn json_schema(schema: impl Into<String>) -> Self {
        OutputType::JsonSchema(JsonSchema::new(schema))
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        OutputType::Regex(Regex::new(pattern))
    }

    pub fn cfg(definition: impl Into<String>) -> Self {
        OutputType::Cfg(Cfg::new(definition))
    }

    pub fn record<T: schemars::JsonSchema>() -> Self {
        OutputType::Record(TypeSchema::of::<T>())
    }

    pub fn dictionary<T: schemars::JsonSchema>() -> Self {
        OutputType::Dictionary(TypeSchema::of::<T>())
    }

    pub fn model<T: SchemaModel>() -> Self {
        OutputType::Model(TypeSchema::of_model::<T>())
    }

    /// Mark `T` as a type with no schema reduction.
    pub fn unsupported<T: ?Sized>() -> Self {
        OutputType::Unsupported {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OutputType::JsonSchema(_) => "json_schema",
            OutputType::Regex(_) => "regex",
            OutputType::Cfg(_) => "cfg",
            OutputType::Record(_) => "record",
            OutputType::Dictionary(_) => "dictionary",
            OutputType::Model(_) => "model",
            OutputType::SchemaBuilder(_) => "schema_builder",
            OutputType::Unsupported { .. } => "unsupported",
        }
    }
}

impl From<JsonSchema> for OutputType {
    fn from(schema: JsonSchema) -> Self {
        OutputType::JsonSchema(schema)
    }
}

impl From<Regex> for OutputType {
    fn from(regex: Regex) -> Self {
        OutputType::Regex(regex)
    }
}

impl From<Cfg> for OutputType {
    fn from(cfg: Cfg) -> Self {
        OutputType::Cfg(cfg)
    }
}

impl From<SchemaBuilder> for OutputType {
    fn from(builder: SchemaBuilder) -> Self {
        OutputType::SchemaBuilder(builder)
    }
}

/// A JSON Schema document kept in its textual form until it is formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchema {
    pub schema: String,
}

impl JsonSchema {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    /// Parse the document.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.schema)?)
    }
}

impl From<Value> for JsonSchema {
    fn from(value: Value) -> Self {
        Self::new(value.to_string())
    }
}

impl From<&Value> for JsonSchema {
    fn from(value: &Value) -> Self {
        Self::new(value.to_string())
    }
}

/// A regular expression constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pub pattern: String,
}

impl Regex {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// A context-free grammar constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cfg {
    pub definition: String,
}

impl Cfg {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
        }
    }
}

/// A Rust type whose JSON Schema is derived on demand.
#[derive(Clone, Copy)]
pub struct TypeSchema {
    type_name: &'static str,
    derive: fn() -> Result<Value>,
}

impl TypeSchema {
    /// Describe `T` through the shared derivation helper.
    pub fn of<T: schemars::JsonSchema>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            derive: derive_json_schema::<T>,
        }
    }

    /// Describe `T` through its own [`SchemaModel::model_json_schema`].
    pub fn of_model<T: SchemaModel>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            derive: T::model_json_schema,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn json_schema(&self) -> Result<Value> {
        (self.derive)()
    }
}

impl fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSchema")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(schemars::JsonSchema)]
    #[allow(dead_code)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_constructors_and_kind() {
        assert_eq!(OutputType::regex("[0-9]+").kind(), "regex");
        assert_eq!(OutputType::cfg("start: 'a'").kind(), "cfg");
        assert_eq!(OutputType::record::<Point>().kind(), "record");
        assert_eq!(OutputType::from(SchemaBuilder::new()).kind(), "schema_builder");
    }

    #[test]
    fn test_unsupported_type_name() {
        match OutputType::unsupported::<i64>() {
            OutputType::Unsupported { type_name } => assert_eq!(type_name, "i64"),
            other => panic!("Expected Unsupported, got {other:?}"),
        }
    }

    #[test]
    fn test_json_schema_from_value() {
        let schema = JsonSchema::from(json!({"type": "string"}));
        assert_eq!(schema.to_value().unwrap(), json!({"type": "string"}));
    }

    #[test]
    fn test_type_schema_debug_names_type() {
        let schema = TypeSchema::of::<Point>();
        assert!(schema.type_name().ends_with("Point"));
        assert!(format!("{schema:?}").contains("Point"));
    }
}
