//! Reason node: build the per-call prompt, call the LLM, append its reply.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::prompts::{effective_system_prompt, EMPTY_RESPONSE_FALLBACK};
use crate::state::{RagState, ToolCall};

use super::AgentContext;

/// Node id of the reasoning step.
pub const REASON_NODE: &str = "reason";

pub struct ReasonNode {
    ctx: AgentContext,
}

impl ReasonNode {
    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }

    /// `[System(prompt)] + history`; the system message is never stored in state.
    fn request_messages(&self, state: &RagState) -> Vec<Message> {
        let exhausted = self
            .ctx
            .budget
            .must_answer(state.tool_call_count, state.tool_rounds);
        if exhausted {
            info!(
                tool_call_count = state.tool_call_count,
                tool_rounds = state.tool_rounds,
                "tool budget exhausted, asking for a final answer"
            );
        }
        let prompt = effective_system_prompt(&self.ctx.system_prompt, exhausted);
        let mut messages = Vec::with_capacity(state.messages.len() + 1);
        messages.push(Message::system(prompt));
        messages.extend(state.messages.iter().cloned());
        messages
    }
}

/// Gives every call without an id a `call_{n}` id unused anywhere in the conversation.
///
/// `n` starts at the call's position among all requested calls and skips ids the
/// model already supplied.
fn assign_missing_ids(tool_calls: Vec<ToolCall>, state: &RagState) -> Vec<ToolCall> {
    let already_requested = state.requested_tool_call_total();
    let mut used: HashSet<String> = state
        .messages
        .iter()
        .flat_map(Message::tool_calls)
        .chain(tool_calls.iter())
        .map(|tc| tc.id.clone())
        .filter(|id| !id.trim().is_empty())
        .collect();
    tool_calls
        .into_iter()
        .enumerate()
        .map(|(i, mut tc)| {
            if tc.id.trim().is_empty() {
                let mut n = already_requested + i + 1;
                while !used.insert(format!("call_{}", n)) {
                    n += 1;
                }
                tc.id = format!("call_{}", n);
            }
            tc
        })
        .collect()
}

fn preview(content: &str) -> String {
    content.chars().take(100).collect()
}

#[async_trait]
impl Node<RagState> for ReasonNode {
    fn id(&self) -> &str {
        REASON_NODE
    }

    async fn run(&self, mut state: RagState) -> Result<(RagState, Next), AgentError> {
        let request = self.request_messages(&state);
        let response = self.ctx.llm.invoke(&request).await?;
        info!(tool_calls = response.tool_calls.len(), "LLM has responded");
        debug!(content = %preview(&response.content), usage = ?response.usage, "LLM raw content");

        let content = if response.content.is_empty() && response.tool_calls.is_empty() {
            EMPTY_RESPONSE_FALLBACK.to_string()
        } else {
            response.content
        };
        let tool_calls = assign_missing_ids(response.tool_calls, &state);
        state
            .messages
            .push(Message::assistant_with_tools(content, tool_calls));
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::agent::ToolBudget;
    use crate::llm::{LlmResponse, MockLlm};
    use crate::prompts::BUDGET_EXHAUSTED_DIRECTIVE;
    use crate::tools::ToolRegistry;

    fn node(llm: Arc<MockLlm>) -> ReasonNode {
        ReasonNode::new(AgentContext::new(
            llm,
            "base prompt",
            Arc::new(ToolRegistry::new()),
            ToolBudget::default(),
        ))
    }

    /// **Scenario**: system prompt goes first in the request but is not stored in state.
    #[tokio::test]
    async fn prepends_system_prompt_without_storing_it() {
        let llm = Arc::new(MockLlm::with_no_tool_calls("answer"));
        let state = RagState::new(vec![Message::user("q")]);
        let (out, next) = node(llm.clone()).run(state).await.unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(out.messages, vec![Message::user("q"), Message::assistant("answer")]);
        let sent = &llm.calls()[0];
        assert_eq!(sent[0], Message::system("base prompt"));
        assert_eq!(sent[1], Message::user("q"));
    }

    /// **Scenario**: at the threshold the base prompt is used; one past it adds the directive.
    #[tokio::test]
    async fn directive_appears_only_past_threshold() {
        let llm = Arc::new(MockLlm::with_no_tool_calls("ok"));
        let n = node(llm.clone());
        let mut state = RagState::new(vec![Message::user("q")]);
        state.tool_call_count = 3;
        n.run(state.clone()).await.unwrap();
        state.tool_call_count = 4;
        n.run(state).await.unwrap();
        let calls = llm.calls();
        assert_eq!(calls[0][0], Message::system("base prompt"));
        assert!(calls[1][0].content().ends_with(BUDGET_EXHAUSTED_DIRECTIVE));
    }

    #[tokio::test]
    async fn empty_reply_uses_fallback_text() {
        let llm = Arc::new(MockLlm::new(vec![LlmResponse::text("")]));
        let (out, _) = node(llm).run(RagState::default()).await.unwrap();
        assert_eq!(out.last_assistant_reply().as_deref(), Some(EMPTY_RESPONSE_FALLBACK));
    }

    #[tokio::test]
    async fn missing_tool_call_ids_are_synthesized() {
        let call = |id: &str| ToolCall {
            id: id.into(),
            name: "retriever_tool".into(),
            arguments: "{}".into(),
        };
        let llm = Arc::new(MockLlm::new(vec![LlmResponse::with_tool_calls(
            "",
            vec![call(""), call("given"), call("")],
        )]));
        let state = RagState::new(vec![Message::assistant_with_tools("", vec![call("old")])]);
        let (out, _) = node(llm).run(state).await.unwrap();
        let ids: Vec<&str> = out.pending_tool_calls().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["call_2", "given", "call_4"]);
    }

    /// **Scenario**: a generated id never reuses one the model picked itself.
    #[tokio::test]
    async fn synthesized_ids_skip_ids_already_in_use() {
        let call = |id: &str| ToolCall {
            id: id.into(),
            name: "retriever_tool".into(),
            arguments: "{}".into(),
        };
        let llm = Arc::new(MockLlm::new(vec![LlmResponse::with_tool_calls(
            "",
            vec![call(""), call("call_3"), call("")],
        )]));
        let state = RagState::new(vec![Message::assistant_with_tools("", vec![call("call_2")])]);
        let (out, _) = node(llm).run(state).await.unwrap();
        let ids: Vec<&str> = out.pending_tool_calls().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["call_4", "call_3", "call_5"]);
    }

    /// **Scenario**: tool passes past the limit trigger the directive even with zero successes.
    #[tokio::test]
    async fn directive_appears_when_rounds_run_out() {
        let llm = Arc::new(MockLlm::with_no_tool_calls("ok"));
        let n = node(llm.clone());
        let mut state = RagState::new(vec![Message::user("q")]);
        state.tool_rounds = 3;
        n.run(state.clone()).await.unwrap();
        state.tool_rounds = 4;
        n.run(state).await.unwrap();
        let calls = llm.calls();
        assert_eq!(calls[0][0], Message::system("base prompt"));
        assert!(calls[1][0].content().ends_with(BUDGET_EXHAUSTED_DIRECTIVE));
    }

    #[tokio::test]
    async fn llm_failure_is_fatal() {
        let llm = Arc::new(MockLlm::failing("connection reset"));
        let err = node(llm).run(RagState::default()).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
