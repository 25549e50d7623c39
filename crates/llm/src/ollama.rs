use crate::client::ChatClient;
use crate::error::{ChatError, Result};
use crate::response::clean_response;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Chat client for a local Ollama server (`/api/chat`)
#[derive(Clone, Debug)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ShowResponse {
    #[serde(default)]
    model_info: Option<Map<String, Value>>,
}

impl OllamaClient {
    pub fn new(host: &str, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: host.trim_end_matches('/').to_string(),
            model: model.into(),
            client: Client::builder().build()?,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn show(&self) -> Result<ShowResponse> {
        let url = format!("{}/api/show", self.base_url);
        let res = self
            .client
            .post(&url)
            .json(&json!({ "model": self.model }))
            .send()
            .await
            .map_err(|err| ChatError::from_send(&url, err))?;
        if !res.status().is_success() {
            return Err(ChatError::Status {
                status: res.status().as_u16(),
                body: res.text().await.unwrap_or_default(),
            });
        }
        Ok(res.json().await?)
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        json_mode: bool,
    ) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "stream": false,
        });
        if json_mode {
            body["format"] = json!("json");
        }

        log::debug!("POST {url} (model={}, json_mode={json_mode})", self.model);
        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ChatError::from_send(&url, err))?;

        if !res.status().is_success() {
            return Err(ChatError::Status {
                status: res.status().as_u16(),
                body: res.text().await.unwrap_or_default(),
            });
        }

        let payload: ChatResponse = res
            .json()
            .await
            .map_err(|err| ChatError::InvalidResponse(err.to_string()))?;
        Ok(clean_response(&payload.message.content))
    }

    async fn context_window(&self) -> Option<usize> {
        match self.show().await {
            Ok(show) => {
                let found = show.model_info.as_ref().and_then(extract_context_length);
                if found.is_none() {
                    log::debug!("Ollama did not report a context length for {}", self.model);
                }
                found
            }
            Err(err) => {
                log::debug!("Could not query model info for {}: {err}", self.model);
                None
            }
        }
    }
}

/// Architecture-specific key first (`llama.context_length`), then any key
/// mentioning `context_length`.
fn extract_context_length(info: &Map<String, Value>) -> Option<usize> {
    let arch_key = info
        .get("general.architecture")
        .and_then(Value::as_str)
        .map(|arch| format!("{arch}.context_length"));
    if let Some(value) = arch_key.and_then(|key| info.get(&key)).and_then(Value::as_u64) {
        return usize::try_from(value).ok();
    }

    info.iter()
        .filter(|(key, _)| key.contains("context_length"))
        .find_map(|(_, value)| value.as_u64())
        .and_then(|value| usize::try_from(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn extract_context_length_uses_arch_specific_key() {
        let info = info(&[
            ("general.architecture", json!("gemma3")),
            ("a.context_length", json!(1024)),
            ("gemma3.context_length", json!(32768)),
        ]);
        assert_eq!(extract_context_length(&info), Some(32768));
    }

    #[test]
    fn extract_context_length_falls_back_to_generic_key() {
        let info = info(&[("general.context_length", json!(8192))]);
        assert_eq!(extract_context_length(&info), Some(8192));
    }

    #[test]
    fn extract_context_length_missing() {
        let info = info(&[("general.parameter_count", json!(7_000_000_000u64))]);
        assert_eq!(extract_context_length(&info), None);
    }

    #[test]
    fn host_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/", "mistral").unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "mistral");
    }
}
