//! The call contract a backend client must fulfil.

use crate::types::GenerateOptions;
use crate::Result;
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::pin::Pin;

/// Stream of response envelopes, one per chunk received from the backend.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<GenerateResponse>> + Send>>;

/// A client able to run generate calls against a backend.
///
/// The model facade only needs these two call shapes, so tests can swap in a
/// stub without a running server.
#[async_trait::async_trait]
pub trait GenerateClient: Send + Sync {
    /// Run a single-response generation.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;

    /// Run a streaming generation.
    async fn generate_stream(&self, request: &GenerateRequest) -> Result<ChunkStream>;
}

/// A fully formatted generate request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerateRequest {
    /// Assemble a request from a formatted prompt, an optional format
    /// constraint and the caller's extra options.
    pub fn new(
        prompt: impl Into<String>,
        format: Option<Value>,
        stream: bool,
        options: GenerateOptions,
    ) -> Self {
        Self {
            model: options.model,
            prompt: prompt.into(),
            format,
            stream,
            system: options.system,
            keep_alive: options.keep_alive,
            options: options.options,
            extra: options.extra,
        }
    }
}

/// The backend's response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
}

impl GenerateResponse {
    /// An envelope carrying only text, as produced by a single chunk.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Self::default()
        }
    }
}
