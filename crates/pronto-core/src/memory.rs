//! Agent memory — bounded conversation history plus a free-form context store.
//!
//! [`AgentMemory`] keeps at most `max_history` messages, evicting the oldest
//! first. The context map has no eviction; it is cleared only explicitly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

use crate::messages::Message;

/// Default conversation history bound.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Character budget for each message line in [`AgentMemory::summary`].
const SUMMARY_CONTENT_CHARS: usize = 100;

/// Number of trailing messages rendered by [`AgentMemory::summary`].
const SUMMARY_MESSAGES: usize = 5;

/// Per-agent memory: bounded message history, context map, session identifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentMemory {
    max_history: usize,
    messages: VecDeque<Message>,
    context: serde_json::Map<String, Value>,
    session_id: String,
}

impl AgentMemory {
    /// Create a memory bounded to `max_history` messages.
    #[must_use]
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            messages: VecDeque::new(),
            context: serde_json::Map::new(),
            session_id: uuid::Uuid::now_v7().to_string(),
        }
    }

    /// Append a message, evicting the oldest entries past `max_history`.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push_back(message);
        while self.messages.len() > self.max_history {
            let _ = self.messages.pop_front();
        }
    }

    /// The `n` most recent messages, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<Message> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }

    /// Set a context value.
    pub fn set_context(&mut self, key: impl Into<String>, value: Value) {
        let _ = self.context.insert(key.into(), value);
    }

    /// Read a context value.
    #[must_use]
    pub fn get_context(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Drop every context entry. Message history is untouched.
    pub fn clear_context(&mut self) {
        self.context.clear();
    }

    /// The full context map.
    #[must_use]
    pub fn context(&self) -> &serde_json::Map<String, Value> {
        &self.context
    }

    /// Render the trailing conversation as `role: content` lines.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.messages.is_empty() {
            return "No conversation history.".to_owned();
        }
        let skip = self.messages.len().saturating_sub(SUMMARY_MESSAGES);
        self.messages
            .iter()
            .skip(skip)
            .map(|msg| {
                let mut content: String =
                    msg.content.chars().take(SUMMARY_CONTENT_CHARS).collect();
                if msg.content.chars().count() > SUMMARY_CONTENT_CHARS {
                    content.push_str("...");
                }
                format!("{}: {content}", msg.role)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Configured history bound.
    #[must_use]
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Session identifier assigned at construction.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Default for AgentMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageRole;
    use proptest::prelude::*;
    use serde_json::json;

    fn user(content: &str) -> Message {
        Message::new(MessageRole::User, content)
    }

    #[test]
    fn new_memory_is_empty() {
        let mem = AgentMemory::new(10);
        assert!(mem.is_empty());
        assert_eq!(mem.max_history(), 10);
        assert!(!mem.session_id().is_empty());
    }

    #[test]
    fn add_message_grows_history() {
        let mut mem = AgentMemory::new(10);
        mem.add_message(user("one"));
        mem.add_message(user("two"));
        assert_eq!(mem.len(), 2);
    }

    #[test]
    fn eviction_keeps_most_recent_in_order() {
        let mut mem = AgentMemory::new(3);
        for i in 0..5 {
            mem.add_message(user(&format!("m{i}")));
        }
        assert_eq!(mem.len(), 3);
        let contents: Vec<String> = mem.recent(10).into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn one_hundred_fifty_adds_retain_last_hundred() {
        let mut mem = AgentMemory::new(100);
        for i in 0..150 {
            mem.add_message(user(&format!("m{i}")));
        }
        assert_eq!(mem.len(), 100);
        let recent = mem.recent(100);
        assert_eq!(recent[0].content, "m50");
        assert_eq!(recent[99].content, "m149");
    }

    #[test]
    fn recent_returns_tail() {
        let mut mem = AgentMemory::new(10);
        for i in 0..4 {
            mem.add_message(user(&format!("m{i}")));
        }
        let tail = mem.recent(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].content, "m2");
        assert_eq!(tail[1].content, "m3");
    }

    #[test]
    fn context_set_get_clear() {
        let mut mem = AgentMemory::new(10);
        mem.set_context("region", json!("Area D"));
        assert_eq!(mem.get_context("region"), Some(&json!("Area D")));
        assert!(mem.get_context("missing").is_none());
        mem.clear_context();
        assert!(mem.context().is_empty());
    }

    #[test]
    fn clear_context_preserves_messages() {
        let mut mem = AgentMemory::new(10);
        mem.add_message(user("kept"));
        mem.set_context("k", json!(1));
        mem.clear_context();
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn summary_empty_history() {
        let mem = AgentMemory::new(10);
        assert_eq!(mem.summary(), "No conversation history.");
    }

    #[test]
    fn summary_renders_last_five_truncated() {
        let mut mem = AgentMemory::new(10);
        for i in 0..6 {
            mem.add_message(user(&format!("m{i}")));
        }
        mem.add_message(user(&"x".repeat(150)));
        let summary = mem.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("user: m3"));
        assert!(lines[4].ends_with("..."));
        // 100 chars + "user: " + "..."
        assert_eq!(lines[4].len(), 6 + 100 + 3);
    }

    #[test]
    fn serde_roundtrip() {
        let mut mem = AgentMemory::new(5);
        mem.add_message(user("hello"));
        mem.set_context("k", json!({"nested": true}));
        let json = serde_json::to_string(&mem).unwrap();
        let back: AgentMemory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.max_history(), 5);
        assert_eq!(back.get_context("k"), Some(&json!({"nested": true})));
    }

    proptest! {
        #[test]
        fn history_never_exceeds_bound(
            contents in proptest::collection::vec(".{0,20}", 0..200),
            max in 1usize..50,
        ) {
            let mut mem = AgentMemory::new(max);
            for c in &contents {
                mem.add_message(user(c));
            }
            prop_assert!(mem.len() <= max);
            // Retained entries are the most recent, in original relative order.
            let expected: Vec<&String> =
                contents.iter().skip(contents.len().saturating_sub(max)).collect();
            let stored: Vec<String> =
                mem.recent(max).into_iter().map(|m| m.content).collect();
            prop_assert_eq!(stored.len(), expected.len());
            for (s, e) in stored.iter().zip(expected) {
                prop_assert_eq!(s, e);
            }
        }
    }
}
