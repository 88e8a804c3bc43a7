use crate::client::GenerateResponse;
use serde::Deserialize;

/// Body of an Ollama error response, also sent as a stream line when
/// generation fails mid-stream.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaErrorBody {
    pub error: serde_json::Value,
}

impl OllamaErrorBody {
    /// The error text; non-string payloads are rendered as JSON.
    pub fn message(&self) -> String {
        match &self.error {
            serde_json::Value::String(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// One line of an Ollama `/api/generate` stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OllamaStreamLine {
    // Must stay first: every field of a chunk is optional, so a chunk would
    // match an error line too.
    Error(OllamaErrorBody),
    Chunk(GenerateResponse),
}
