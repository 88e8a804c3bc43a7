//! Stream a JSON answer constrained by a Rust type.
//!
//! Needs a running Ollama server with the model pulled:
//!
//! ```bash
//! export OLLAMA_HOST=localhost:11434
//! export OLLAMA_MODEL=llama3.2
//! cargo run --example structured_ollama
//! ```

use futures_util::StreamExt;
use ollama_structured::{
    from_ollama, Error, GenerateOptions, Model, OllamaClient, OllamaConfig, OutputType,
};
use serde::Deserialize;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[allow(dead_code)]
struct Country {
    name: String,
    capital: String,
    population: u64,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = OllamaConfig::from_env()?;
    let model_name = config.model.clone().or_else(|| Some("llama3.2".to_string()));
    let client = Arc::new(OllamaClient::from_config(&config)?);
    let model = from_ollama(client, model_name);

    let output_type = OutputType::record::<Country>();
    let mut stream = model
        .generate_stream(
            "Describe France as JSON.".into(),
            Some(&output_type),
            GenerateOptions::new().temperature(0.0),
        )
        .await?;

    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        print!("{fragment}");
        std::io::stdout().flush().ok();
        text.push_str(&fragment);
    }
    println!();

    let country: Country = serde_json::from_str(&text)?;
    println!("Parsed: {country:?}");

    Ok(())
}
