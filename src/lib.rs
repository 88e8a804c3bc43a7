//! Structured generation on top of an Ollama client.
//!
//! Callers describe the output they want with an [`OutputType`] (a JSON Schema
//! document, a Rust type deriving `schemars::JsonSchema`, a [`SchemaBuilder`],
//! ...). The [`Ollama`] model reduces it to the JSON Schema Ollama accepts in
//! its `format` field, forwards the prompt to a [`GenerateClient`], and returns
//! the generated text either whole or as a [`TextStream`].

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod ndjson_stream;
pub mod providers;
pub mod response;
pub mod schema;
pub mod schema_builder;
pub mod types;

// Re-export core types for easy usage
pub use client::{ChunkStream, GenerateClient, GenerateRequest, GenerateResponse};
pub use config::OllamaConfig;
pub use error::{Error, Result};
pub use model::{Model, ModelTypeAdapter};
pub use providers::*;
pub use response::TextStream;
pub use schema::{derive_json_schema, SchemaModel};
pub use schema_builder::SchemaBuilder;
pub use types::*;
