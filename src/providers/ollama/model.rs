use super::adapter::OllamaTypeAdapter;
use crate::client::{GenerateClient, GenerateRequest};
use crate::model::{Model, ModelTypeAdapter};
use crate::{Error, GenerateOptions, ModelInput, OutputType, TextStream};
use std::sync::Arc;

/// Thin wrapper around an Ollama client.
///
/// Converts the input and output types given at a higher level into the
/// arguments the client takes, and unwraps the response envelope into text.
/// The client is shared, not owned: whoever built it controls its lifetime.
#[derive(Clone)]
pub struct Ollama {
    client: Arc<dyn GenerateClient>,
    model_name: Option<String>,
    type_adapter: OllamaTypeAdapter,
}

impl Ollama {
    /// Create a model from an already configured client and an optional
    /// default model name.
    pub fn new(client: Arc<dyn GenerateClient>, model_name: Option<String>) -> Self {
        Self {
            client,
            model_name,
            type_adapter: OllamaTypeAdapter,
        }
    }

    /// The default model name, if one was configured.
    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    /// Shape the request. Fails before anything is sent if the input or
    /// output type cannot be expressed for Ollama.
    fn build_request(
        &self,
        input: ModelInput,
        output_type: Option<&OutputType>,
        mut options: GenerateOptions,
        stream: bool,
    ) -> Result<GenerateRequest, Error> {
        if options.model.is_none() {
            options.model = self.model_name.clone();
        }

        let prompt = self.type_adapter.format_input(input)?;
        let format = self.type_adapter.format_output_type(output_type)?;

        tracing::debug!(
            model = ?options.model,
            output_type = output_type.map(OutputType::kind),
            constrained = format.is_some(),
            stream,
            "Generating with Ollama"
        );

        Ok(GenerateRequest::new(prompt, format, stream, options))
    }
}

#[async_trait::async_trait]
impl Model for Ollama {
    /// Generate text using Ollama.
    async fn generate(
        &self,
        input: ModelInput,
        output_type: Option<&OutputType>,
        options: GenerateOptions,
    ) -> Result<String, Error> {
        let request = self.build_request(input, output_type, options, false)?;
        let response = self.client.generate(&request).await?;
        Ok(response.response)
    }

    /// Stream text using Ollama.
    async fn generate_stream(
        &self,
        input: ModelInput,
        output_type: Option<&OutputType>,
        options: GenerateOptions,
    ) -> Result<TextStream, Error> {
        let request = self.build_request(input, output_type, options, true)?;
        let chunks = self.client.generate_stream(&request).await?;
        Ok(TextStream::from_chunks(chunks))
    }
}

/// Create an [`Ollama`] model from an existing client.
pub fn from_ollama(client: Arc<dyn GenerateClient>, model_name: Option<String>) -> Ollama {
    Ollama::new(client, model_name)
}
