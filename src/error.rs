use thiserror::Error;

/// Errors that can occur when using the ollama-structured library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported input kind: {0}")]
    UnsupportedInputKind(String),

    #[error("Unsupported constraint kind: {0}")]
    UnsupportedConstraintKind(String),

    #[error("Unsupported output kind: {0}")]
    UnsupportedOutputKind(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Streaming error: {0}")]
    Streaming(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn unsupported_input(message: impl Into<String>) -> Self {
        Error::UnsupportedInputKind(message.into())
    }

    pub fn unsupported_constraint(message: impl Into<String>) -> Self {
        Error::UnsupportedConstraintKind(message.into())
    }

    pub fn unsupported_output(message: impl Into<String>) -> Self {
        Error::UnsupportedOutputKind(message.into())
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn streaming(message: impl Into<String>) -> Self {
        Error::Streaming(message.into())
    }
}
