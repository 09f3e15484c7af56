use std::collections::HashMap;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;

/// Name-keyed collection of tools.
///
/// Built once at initialization and then only read; shared behind an `Arc` by
/// the chat client setup (specs) and ToolExecNode (calls).
///
/// # Examples
///
/// ```
/// use market_rag::tools::{RetrieverTool, ToolRegistry};
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(RetrieverTool::unavailable()));
/// assert_eq!(registry.list()[0].name, "retriever_tool");
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool; replaces any tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Looks up a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Whether a tool with `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Specs of all registered tools, sorted by name.
    pub fn list(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|tool| tool.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Calls a tool by name.
    ///
    /// # Errors
    ///
    /// `ToolSourceError::NotFound` if `name` is not registered; otherwise whatever the tool returns.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(args, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        fn name(&self) -> &str {
            self.0
        }
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: self.0.to_string(),
                description: None,
                input_schema: json!({}),
            }
        }
        async fn call(
            &self,
            args: serde_json::Value,
            _ctx: Option<&ToolCallContext>,
        ) -> Result<ToolCallContent, ToolSourceError> {
            Ok(ToolCallContent::new(format!("{}:{}", self.0, args)))
        }
    }

    #[test]
    fn list_is_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(NamedTool("zeta")));
        registry.register(Box::new(NamedTool("alpha")));
        let names: Vec<String> = registry.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn register_same_name_replaces() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(NamedTool("a")));
        registry.register(Box::new(NamedTool("a")));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn call_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(NamedTool("echo")));
        let out = registry.call("echo", json!({"q": 1}), None).await.unwrap();
        assert_eq!(out.text, r#"echo:{"q":1}"#);
    }

    #[tokio::test]
    async fn call_unknown_returns_not_found() {
        let registry = ToolRegistry::new();
        let err = registry
            .call("lookup_weather", json!({}), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolSourceError::NotFound(ref n) if n == "lookup_weather"));
    }
}
