use super::message::Message;

/// The input handed to a model by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    /// A single plain-text prompt.
    Text(String),
    /// Several prompts to be generated in one call.
    Batch(Vec<String>),
    /// A conversation made of role-tagged messages.
    Chat(Vec<Message>),
}

impl ModelInput {
    /// Short human-readable name of the input kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelInput::Text(_) => "text",
            ModelInput::Batch(_) => "batch",
            ModelInput::Chat(_) => "chat",
        }
    }

    /// Borrow the prompt if this is a plain-text input.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelInput::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for ModelInput {
    fn from(s: &str) -> Self {
        ModelInput::Text(s.to_string())
    }
}

impl From<String> for ModelInput {
    fn from(s: String) -> Self {
        ModelInput::Text(s)
    }
}

impl From<Vec<String>> for ModelInput {
    fn from(prompts: Vec<String>) -> Self {
        ModelInput::Batch(prompts)
    }
}

impl From<Vec<&str>> for ModelInput {
    fn from(prompts: Vec<&str>) -> Self {
        ModelInput::Batch(prompts.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Message>> for ModelInput {
    fn from(messages: Vec<Message>) -> Self {
        ModelInput::Chat(messages)
    }
}

impl From<Message> for ModelInput {
    fn from(message: Message) -> Self {
        ModelInput::Chat(vec![message])
    }
}
