use crate::{Error, GenerateOptions, ModelInput, OutputType, TextStream};

/// A model that turns a prompt and an optional output constraint into text.
#[async_trait::async_trait]
pub trait Model: Send + Sync {
    /// Generate the full response text.
    async fn generate(
        &self,
        input: ModelInput,
        output_type: Option<&OutputType>,
        options: GenerateOptions,
    ) -> Result<String, Error>;

    /// Generate the response as a lazy stream of text fragments.
    async fn generate_stream(
        &self,
        input: ModelInput,
        output_type: Option<&OutputType>,
        options: GenerateOptions,
    ) -> Result<TextStream, Error>;
}

/// Translates the generic input and output vocabulary into the arguments a
/// particular backend accepts.
pub trait ModelTypeAdapter {
    /// The prompt argument the backend takes.
    type Input;
    /// The output constraint argument the backend takes.
    type Format;

    fn format_input(&self, input: ModelInput) -> Result<Self::Input, Error>;

    fn format_output_type(
        &self,
        output_type: Option<&OutputType>,
    ) -> Result<Option<Self::Format>, Error>;
}
