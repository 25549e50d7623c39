#![allow(dead_code)]

use async_trait::async_trait;
use recall_llm::{ChatClient, ChatError};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

pub const EMPTY_RELEVANT: &str = r#"{"relevant": []}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub json_mode: bool,
}

/// Replies with canned responses in turn, cycling when they run out
#[derive(Default)]
pub struct ScriptedChat {
    responses: Vec<String>,
    context_window: Option<usize>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedChat {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_context_window(mut self, tokens: usize) -> Self {
        self.context_window = Some(tokens);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        json_mode: bool,
    ) -> recall_llm::Result<String> {
        let mut calls = self.calls.lock().unwrap();
        let reply = if self.responses.is_empty() {
            EMPTY_RELEVANT.to_string()
        } else {
            self.responses[calls.len() % self.responses.len()].clone()
        };
        calls.push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            json_mode,
        });
        Ok(reply)
    }

    async fn context_window(&self) -> Option<usize> {
        self.context_window
    }
}

/// Fails every call the way an unreachable backend would
pub struct FailingChat;

#[async_trait]
impl ChatClient for FailingChat {
    async fn chat(&self, _: &str, _: &str, _: bool) -> recall_llm::Result<String> {
        Err(ChatError::InvalidResponse("backend exploded".to_string()))
    }
}

pub fn make_meeting(base: &Path, folder: &str, summary: &str, transcript: Option<&str>) {
    let dir = base.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("summary.md"), summary).unwrap();
    if let Some(transcript) = transcript {
        fs::write(dir.join("transcript.md"), transcript).unwrap();
    }
}
