use crate::client::ChatClient;
use crate::error::{ChatError, Result};
use crate::response::clean_response;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Chat client for OpenAI-compatible servers (LM Studio, llama.cpp server, vLLM)
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    base_url: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    /// `host` may be given with or without the trailing `/v1`.
    pub fn new(host: &str, model: impl Into<String>) -> Result<Self> {
        let trimmed = host.trim_end_matches('/');
        let base_url = if trimmed.ends_with("/v1") {
            trimmed.to_string()
        } else {
            format!("{trimmed}/v1")
        };
        Ok(Self {
            base_url,
            model: model.into(),
            client: Client::builder().build()?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// `response_format` values to try, most structured first. Servers disagree on
/// which variants they accept, and `None` always works.
fn response_formats(json_mode: bool) -> Vec<Option<Value>> {
    if !json_mode {
        return vec![None];
    }
    vec![
        Some(json!({ "type": "json_object" })),
        Some(json!({
            "type": "json_schema",
            "json_schema": {
                "name": "search_results",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "relevant": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["relevant"],
                    "additionalProperties": false,
                },
            },
        })),
        None,
    ]
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        json_mode: bool,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let messages = json!([
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_prompt },
        ]);

        for format in response_formats(json_mode) {
            let mut body = json!({
                "model": self.model,
                "messages": messages,
            });
            if let Some(format) = &format {
                body["response_format"] = format.clone();
            }

            let res = self
                .client
                .post(&url)
                .bearer_auth("not-needed")
                .json(&body)
                .send()
                .await
                .map_err(|err| ChatError::from_send(&url, err))?;

            let status = res.status();
            if status == StatusCode::BAD_REQUEST {
                let kind = format
                    .as_ref()
                    .and_then(|f| f["type"].as_str())
                    .unwrap_or("text");
                log::debug!("Server rejected response_format '{kind}', trying the next one");
                continue;
            }
            if !status.is_success() {
                return Err(ChatError::Status {
                    status: status.as_u16(),
                    body: res.text().await.unwrap_or_default(),
                });
            }

            let payload: Value = res
                .json()
                .await
                .map_err(|err| ChatError::InvalidResponse(err.to_string()))?;
            let content = payload["choices"][0]["message"]["content"]
                .as_str()
                .unwrap_or_default();
            return Ok(clean_response(content));
        }

        log::warn!("Every response_format was rejected by {url}; returning an empty reply");
        Ok(String::new())
    }
}
