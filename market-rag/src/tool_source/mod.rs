//! Tool-facing types shared by the tool registry and the tool execution node.
//!
//! `ToolSpec` is what the model sees (name, description, JSON Schema);
//! `ToolCallContent` is what a tool returns; `ToolSourceError` covers lookup,
//! argument and execution failures. `ToolCallContext` carries per-call state
//! (the live tool-call counter and budget) into tools.

mod context;

pub use context::ToolCallContext;

use serde_json::Value;
use thiserror::Error;

/// Tool specification, aligned with the function-calling `tools[]` item.
///
/// **Interaction**: Returned by `Tool::spec()` / `ToolRegistry::list()`; bound to the
/// chat client with `ChatOpenAI::with_tools`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name the model uses to call it.
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result of a single tool call.
///
/// **Interaction**: Returned by `Tool::call()`; ToolExecNode copies `text` into a
/// `Message::ToolResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallContent {
    /// Result text shown to the model.
    pub text: String,
}

impl ToolCallContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors from calling a tool.
///
/// **Interaction**: Returned by `ToolRegistry::call()`; ToolExecNode turns every
/// variant into tool output text so the run continues.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("tool execution failed: {0}")]
    Execution(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of each ToolSourceError variant contains expected keywords.
    #[test]
    fn tool_source_error_display_all_variants() {
        let s = ToolSourceError::NotFound("x".into()).to_string();
        assert!(s.to_lowercase().contains("not found"), "{}", s);
        let s = ToolSourceError::Execution("index offline".into()).to_string();
        assert!(s.contains("index offline"), "{}", s);
    }

    #[test]
    fn tool_spec_serializes_schema() {
        let spec = ToolSpec {
            name: "retriever_tool".into(),
            description: Some("Search".into()),
            input_schema: serde_json::json!({"type": "object"}),
        };
        let js = serde_json::to_value(&spec).unwrap();
        assert_eq!(js["name"], "retriever_tool");
        assert_eq!(js["input_schema"]["type"], "object");
        assert_eq!(ToolCallContent::new("ok").text, "ok");
    }
}
