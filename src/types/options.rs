use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extra options forwarded to the client alongside the prompt and format.
///
/// `model` overrides the facade's default model name. Runtime parameters
/// (temperature, seed, ...) land in the `options` object Ollama expects;
/// anything else goes to `extra` and is sent as top-level request fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// How long the backend keeps the model loaded after the call, e.g. `"5m"`.
    pub fn keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }

    pub fn temperature(self, temperature: f32) -> Self {
        self.option("temperature", temperature)
    }

    pub fn top_p(self, top_p: f32) -> Self {
        self.option("top_p", top_p)
    }

    pub fn top_k(self, top_k: u32) -> Self {
        self.option("top_k", top_k)
    }

    /// Maximum number of tokens to generate.
    pub fn num_predict(self, num_predict: i32) -> Self {
        self.option("num_predict", num_predict)
    }

    pub fn seed(self, seed: i64) -> Self {
        self.option("seed", seed)
    }

    pub fn stop<I, S>(self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop: Vec<String> = stop.into_iter().map(Into::into).collect();
        self.option("stop", stop)
    }

    /// Set an arbitrary runtime option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set an arbitrary top-level request field.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_places_runtime_options() {
        let options = GenerateOptions::new()
            .model("llama3.2")
            .temperature(0.5)
            .seed(42)
            .stop(["\n\n"])
            .extra("raw", true);

        assert_eq!(options.model.as_deref(), Some("llama3.2"));
        assert_eq!(options.options["seed"], json!(42));
        assert_eq!(options.options["stop"], json!(["\n\n"]));
        assert_eq!(options.extra["raw"], json!(true));
    }

    #[test]
    fn test_serialization_flattens_extra() {
        let options = GenerateOptions::new().keep_alive("5m").extra("raw", true);
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value, json!({"keep_alive": "5m", "raw": true}));
    }
}
