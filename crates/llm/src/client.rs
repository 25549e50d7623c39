use crate::error::Result;
use async_trait::async_trait;

/// A chat-capable language model.
///
/// `json_mode` is a hint: backends may ignore it, so callers parse the reply
/// defensively whatever the flag.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, system_prompt: &str, user_prompt: &str, json_mode: bool)
        -> Result<String>;

    /// Context window of the configured model in tokens, when the backend reports it
    async fn context_window(&self) -> Option<usize> {
        None
    }
}

#[async_trait]
impl<T: ChatClient + ?Sized> ChatClient for Box<T> {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        json_mode: bool,
    ) -> Result<String> {
        (**self).chat(system_prompt, user_prompt, json_mode).await
    }

    async fn context_window(&self) -> Option<usize> {
        (**self).context_window().await
    }
}
