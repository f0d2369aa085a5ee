//! Conversation context: the ordered, append-only history a run accumulates.
//!
//! The control loop only ever materializes a trailing window of this history
//! into the next prompt; the full sequence is kept for the life of the run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a context entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged text entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ContextEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Append-only conversation history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    entries: Vec<ContextEntry>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ContextEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The trailing `n` entries, oldest first.
    pub fn window(&self, n: usize) -> &[ContextEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Renders the trailing `n` entries as `ROLE: content` blocks separated
    /// by blank lines, the shape fed back to the generation service.
    pub fn render_window(&self, n: usize) -> String {
        self.window(n)
            .iter()
            .map(|entry| format!("{}: {}", entry.role.as_str().to_uppercase(), entry.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
