use crate::client::ChatClient;
use crate::error::{ChatError, Result};
use crate::ollama::OllamaClient;
use crate::openai::OpenAiClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_HOST: &str = "http://localhost:11434";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Ollama,
    /// Any server speaking the OpenAI chat-completions protocol
    #[serde(alias = "openai-compatible")]
    OpenAi,
}

impl Backend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "openai-compatible" => Ok(Self::OpenAi),
            other => Err(ChatError::UnknownBackend(other.to_string())),
        }
    }
}

/// Which backend to talk to, and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub backend: Backend,
    pub model: String,
    pub host: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

/// Build the chat client described by `settings`
pub fn build_client(settings: &LlmSettings) -> Result<Box<dyn ChatClient>> {
    log::debug!(
        "Using {} backend at {} (model {})",
        settings.backend,
        settings.host,
        settings.model
    );
    Ok(match settings.backend {
        Backend::Ollama => Box::new(OllamaClient::new(&settings.host, &settings.model)?),
        Backend::OpenAi => Box::new(OpenAiClient::new(&settings.host, &settings.model)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("ollama".parse::<Backend>().unwrap(), Backend::Ollama);
        assert_eq!(" OpenAI ".parse::<Backend>().unwrap(), Backend::OpenAi);
        assert!(matches!(
            "anthropic".parse::<Backend>(),
            Err(ChatError::UnknownBackend(name)) if name == "anthropic"
        ));
    }

    #[test]
    fn test_build_client_for_each_backend() {
        let mut settings = LlmSettings::default();
        assert!(build_client(&settings).is_ok());
        settings.backend = Backend::OpenAi;
        assert!(build_client(&settings).is_ok());
    }
}
