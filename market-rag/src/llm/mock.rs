//! Mock LLM for tests and offline runs.
//!
//! Plays back a fixed script of responses, one per `invoke`, and records every
//! message list it was called with so tests can inspect what the model saw.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;

/// Mock LLM: scripted assistant replies.
///
/// Each `invoke` returns the next scripted response; once the script is used up the
/// last response repeats, so a mock that always asks for tools keeps asking. A mock
/// built with `failing` returns `AgentError::ExecutionFailed` on every call.
///
/// **Interaction**: Implements `LlmClient`; used by ReasonNode in tests.
pub struct MockLlm {
    script: Vec<LlmResponse>,
    failure: Option<String>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Creates a mock that returns `responses` in order, then repeats the last one.
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self {
            script: responses,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that always answers in plain text.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::new(vec![LlmResponse::text(content)])
    }

    /// Creates a mock that first requests one retriever call for `query`, then answers `answer`.
    pub fn retrieve_then_answer(query: &str, answer: impl Into<String>) -> Self {
        Self::new(vec![
            LlmResponse::with_tool_calls(
                "",
                vec![ToolCall {
                    id: "call-1".into(),
                    name: "retriever_tool".into(),
                    arguments: serde_json::json!({ "query": query }).to_string(),
                }],
            ),
            LlmResponse::text(answer),
        ])
    }

    /// Creates a mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Vec::new(),
            failure: Some(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Message lists received so far, one entry per `invoke`.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let index = {
            let mut calls = self
                .calls
                .lock()
                .map_err(|_| AgentError::ExecutionFailed("mock call log poisoned".into()))?;
            calls.push(messages.to_vec());
            calls.len() - 1
        };
        if let Some(ref message) = self.failure {
            return Err(AgentError::ExecutionFailed(message.clone()));
        }
        self.script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .ok_or_else(|| AgentError::ExecutionFailed("mock script is empty".into()))
    }
}
