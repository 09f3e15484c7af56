//! Seeding a turn's state from caller-supplied history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::state::RagState;

/// How many previous entries are kept by default.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Label heading the collapsed context message.
pub const HISTORY_LABEL: &str = "Previous conversation:";

/// One prior turn as stored by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Speaker, e.g. `"user"` or `"assistant"`.
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Collapses the last `window` entries into one User message; `None` when there are none.
pub fn collapse_history(previous: &[HistoryEntry], window: usize) -> Option<Message> {
    let start = previous.len().saturating_sub(window);
    let kept = &previous[start..];
    if kept.is_empty() {
        return None;
    }
    let mut text = String::from(HISTORY_LABEL);
    for entry in kept {
        text.push('\n');
        text.push_str(&entry.role);
        text.push_str(": ");
        text.push_str(&entry.content);
    }
    Some(Message::user(text))
}

/// Fresh state for one turn: optional collapsed history, then the new user input.
pub fn build_initial_state(previous: &[HistoryEntry], user_input: &str, window: usize) -> RagState {
    let mut messages = Vec::with_capacity(2);
    messages.extend(collapse_history(previous, window));
    messages.push(Message::user(user_input));
    RagState::new(messages)
}
