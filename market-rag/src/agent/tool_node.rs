//! Tool execution node: run every tool call of the last assistant message.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::RagState;
use crate::tool_source::ToolCallContext;

use super::AgentContext;

/// Node id of the tool execution step.
pub const TOOLS_NODE: &str = "tools";

/// Tool output for a call naming an unregistered tool.
pub const UNKNOWN_TOOL_MESSAGE: &str =
    "Incorrect Tool name, Please retry and select the correct Tool.";

/// Parses ToolCall.arguments string to JSON Value. Logs a warning on parse failure.
fn parse_tool_arguments(arguments: &str) -> Value {
    if arguments.trim().is_empty() {
        return serde_json::json!({});
    }
    match serde_json::from_str(arguments) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, arguments = %arguments, "tool arguments JSON parse failed, using empty object");
            serde_json::json!({})
        }
    }
}

/// Runs the pending tool calls in order and appends one result per call.
///
/// Unknown names and tool errors become result text; only successful calls of
/// registered tools bump `tool_call_count`. `tool_rounds` grows by one per run.
pub struct ToolExecNode {
    ctx: AgentContext,
}

impl ToolExecNode {
    pub fn new(ctx: AgentContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Node<RagState> for ToolExecNode {
    fn id(&self) -> &str {
        TOOLS_NODE
    }

    async fn run(&self, mut state: RagState) -> Result<(RagState, Next), AgentError> {
        let calls = state.pending_tool_calls().to_vec();
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            let args = parse_tool_arguments(&call.arguments);
            let query = args.get("query").and_then(Value::as_str).unwrap_or("");
            info!(tool = %call.name, query = %query, "tool call detected");

            let text = if !self.ctx.tools.contains(&call.name) {
                warn!(tool = %call.name, "tool not found in registry");
                UNKNOWN_TOOL_MESSAGE.to_string()
            } else {
                let call_ctx = ToolCallContext::new(state.tool_call_count, self.ctx.budget);
                match self.ctx.tools.call(&call.name, args, Some(&call_ctx)).await {
                    Ok(content) => {
                        state.tool_call_count += 1;
                        info!(tool = %call.name, tool_call_count = state.tool_call_count, "executed tool successfully");
                        content.text
                    }
                    Err(e) => {
                        error!(tool = %call.name, error = %e, "tool execution failed");
                        format!("Tool {} failed with error {}", call.name, e)
                    }
                }
            };
            results.push(Message::tool_result(call.id, call.name, text));
        }

        state.messages.extend(results);
        state.tool_rounds += 1;
        Ok((state, Next::Continue))
    }
}
