use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};

/// A single tool that can be called by the model.
///
/// Each tool has a unique name, a specification (description and JSON schema) and
/// the call logic. Tools are registered with `ToolRegistry` and invoked by
/// ToolExecNode.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use market_rag::tools::Tool;
/// use market_rag::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
///
/// struct EchoTool;
///
/// #[async_trait]
/// impl Tool for EchoTool {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "echo".to_string(),
///             description: Some("Echo the query".to_string()),
///             input_schema: serde_json::json!({}),
///         }
///     }
///
///     async fn call(
///         &self,
///         args: Value,
///         _ctx: Option<&ToolCallContext>,
///     ) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent::new(args.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of this tool; the model calls it by this name.
    fn name(&self) -> &str;

    /// Name, description and JSON schema advertised to the model.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with parsed JSON arguments and optional per-call context.
    ///
    /// Errors are turned into tool output text by the caller; they never abort a run.
    async fn call(
        &self,
        args: serde_json::Value,
        ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError>;
}
