//! JSON Schema derivation for Rust types.
//!
//! Record-like, dictionary-shaped and model types all go through
//! [`derive_json_schema`] so that every integration sees the same schema for
//! the same type.

use crate::Result;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::Value;

/// Generate an inlined draft-07 JSON Schema for `T`.
///
/// Subschemas are inlined because Ollama expects the entire schema in the
/// `format` field and does not resolve `$ref` pointers.
pub fn derive_json_schema<T>() -> Result<Value>
where
    T: JsonSchema,
{
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let root = generator.into_root_schema_for::<T>();

    Ok(serde_json::to_value(root)?)
}

/// A type that validates its own data and knows its JSON Schema.
///
/// The default schema is the derived one; implementors can override
/// [`SchemaModel::model_json_schema`] to tighten it (extra keywords,
/// patterns, descriptions the derive cannot express).
pub trait SchemaModel: JsonSchema + Sized {
    fn model_json_schema() -> Result<Value> {
        derive_json_schema::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Person {
        name: String,
        age: i64,
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Team {
        lead: Person,
        members: Vec<Person>,
    }

    #[test]
    fn test_record_schema_properties() {
        let schema = derive_json_schema::<Person>().unwrap();
        assert_eq!(schema["type"], "object");

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties["name"]["type"], "string");
        assert_eq!(properties["age"]["type"], "integer");
    }

    #[test]
    fn test_nested_schema_is_inlined() {
        let schema = derive_json_schema::<Team>().unwrap();
        let text = schema.to_string();
        assert!(!text.contains("$ref"));
        assert_eq!(schema["properties"]["lead"]["properties"]["name"]["type"], "string");
    }

    #[test]
    fn test_dictionary_schema() {
        let schema = derive_json_schema::<BTreeMap<String, f64>>().unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"]["type"], "number");
    }
}
