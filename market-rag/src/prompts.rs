//! Prompt text used by the reasoning step.

/// System prompt used when `SYSTEM_PROMPT` is not set.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a RAG agent with access to tools, who answers questions about Stock Market Performance in 2024 based on the PDF document loaded into your knowledge base.
Use the retriever tool available to answer questions about the stock market performance data. You can make multiple calls if needed.
If you need to look up some information before asking a follow up question, you are allowed to do that!
Please always cite the specific parts of the documents you use in your answers.
Answer clearly and concisely.
You will NOT perform any other task or answer any question NOT related to the Stock Market Performance PDF.";

/// Appended to the system prompt once the tool budget is exhausted.
pub const BUDGET_EXHAUSTED_DIRECTIVE: &str = "You have reached the maximum number of tool calls. \
Do not attempt to call any tools or functions. \
Only respond in plain text with your best possible answer using the data already provided.";

/// Assistant text used when the model returns neither text nor tool calls.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "No text response from the model. Please try again or check the API.";

/// Base prompt, plus the budget directive when `exhausted`.
pub fn effective_system_prompt(base: &str, exhausted: bool) -> String {
    if exhausted {
        format!("{}\n\n{}", base, BUDGET_EXHAUSTED_DIRECTIVE)
    } else {
        base.to_string()
    }
}
