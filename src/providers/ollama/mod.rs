//! Ollama integration.

pub mod adapter;
pub mod client;
pub mod model;
pub mod types;

pub use adapter::OllamaTypeAdapter;
pub use client::OllamaClient;
pub use model::{from_ollama, Ollama};
