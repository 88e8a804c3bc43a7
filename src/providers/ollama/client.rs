use super::types::{OllamaErrorBody, OllamaStreamLine};
use crate::client::{ChunkStream, GenerateClient, GenerateRequest, GenerateResponse};
use crate::config::OllamaConfig;
use crate::ndjson_stream::NdjsonStreamExt;
use crate::Error;
use futures_util::StreamExt;
use reqwest::Client;

const PROVIDER: &str = "Ollama";

/// HTTP client for a running Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the server at `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Self::from_config(&OllamaConfig::new(base_url))
    }

    /// Create a client from configuration.
    pub fn from_config(config: &OllamaConfig) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from environment variables (see [`OllamaConfig::from_env`]).
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(&OllamaConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request and turn non-success statuses into provider errors.
    async fn send(&self, request: &GenerateRequest) -> Result<reqwest::Response, Error> {
        tracing::debug!(
            base_url = %self.base_url,
            model = ?request.model,
            stream = request.stream,
            "POST /api/generate"
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            let message = serde_json::from_str::<OllamaErrorBody>(&error_text)
                .map(|body| body.message())
                .unwrap_or(error_text);
            tracing::warn!(%status, %message, "Ollama request failed");
            return Err(Error::provider(
                PROVIDER,
                format!("API error ({status}): {message}"),
            ));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl GenerateClient for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, Error> {
        let mut request = request.clone();
        request.stream = false;

        let response = self.send(&request).await?;
        match response.json::<OllamaStreamLine>().await? {
            OllamaStreamLine::Chunk(envelope) => Ok(envelope),
            OllamaStreamLine::Error(body) => Err(Error::provider(PROVIDER, body.message())),
        }
    }

    async fn generate_stream(&self, request: &GenerateRequest) -> Result<ChunkStream, Error> {
        let mut request = request.clone();
        request.stream = true;

        let response = self.send(&request).await?;
        let chunks = response
            .bytes_stream()
            .ndjson::<OllamaStreamLine>()
            .map(|line| -> Result<GenerateResponse, Error> {
                match line? {
                    OllamaStreamLine::Chunk(envelope) => Ok(envelope),
                    OllamaStreamLine::Error(body) => Err(Error::provider(PROVIDER, body.message())),
                }
            });

        Ok(Box::pin(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new("localhost:11434").unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_client_from_config() {
        let config = OllamaConfig::new("http://10.0.0.2:11434/").with_timeout(Duration::from_secs(5));
        let client = OllamaClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.2:11434");
    }
}
