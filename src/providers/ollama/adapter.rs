use crate::model::ModelTypeAdapter;
use crate::{Error, ModelInput, OutputType};
use serde_json::Value;

/// Type adapter for the Ollama model.
///
/// Ollama only understands a single prompt string and, as an output
/// constraint, either nothing or a JSON Schema. Everything else is reduced to
/// one of those or rejected here, before any request is sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OllamaTypeAdapter;

impl ModelTypeAdapter for OllamaTypeAdapter {
    type Input = String;
    type Format = Value;

    fn format_input(&self, input: ModelInput) -> Result<String, Error> {
        match input {
            ModelInput::Text(prompt) => Ok(prompt),
            other => {
                tracing::debug!(kind = other.kind(), "Rejecting model input");
                Err(Error::unsupported_input(format!(
                    "The input type `{}` is not available. Ollama does not support batch inference.",
                    other.kind()
                )))
            }
        }
    }

    fn format_output_type(&self, output_type: Option<&OutputType>) -> Result<Option<Value>, Error> {
        let Some(output_type) = output_type else {
            return Ok(None);
        };

        let schema = match output_type {
            OutputType::Regex(_) => {
                return Err(Error::unsupported_constraint(
                    "Regex-based structured outputs are not supported by Ollama. \
                     Use an open source model in the meantime.",
                ));
            }
            OutputType::Cfg(_) => {
                return Err(Error::unsupported_constraint(
                    "CFG-based structured outputs are not supported by Ollama. \
                     Use an open source model in the meantime.",
                ));
            }
            OutputType::JsonSchema(schema) => schema.to_value()?,
            OutputType::Record(ty) | OutputType::Dictionary(ty) | OutputType::Model(ty) => {
                ty.json_schema()?
            }
            OutputType::SchemaBuilder(builder) => builder.to_schema(),
            OutputType::Unsupported { type_name } => {
                return Err(Error::unsupported_output(format!(
                    "The type `{type_name}` is not supported by Ollama. \
                     Consider using a local model instead."
                )));
            }
        };

        tracing::trace!(kind = output_type.kind(), "Formatted output type as JSON Schema");
        Ok(Some(schema))
    }
}
