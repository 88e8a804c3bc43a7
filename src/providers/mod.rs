//! Provider implementations for different model backends.

pub mod ollama;

// Re-export commonly used provider types
pub use ollama::{from_ollama, Ollama, OllamaClient, OllamaTypeAdapter};
