//! Message and history domain types.
//!
//! These are the value objects that flow through the pipeline: the browser
//! client sends a message plus its recent history → classifiers read them →
//! the prompt builder renders them. The core never mutates a message and
//! retains no history of its own; the caller owns the transcript.

use serde::{Deserialize, Serialize};

/// How many recent history entries the core ever consumes, per request.
///
/// The caller may send an unbounded transcript; everything older than this
/// window is ignored by both the context assembler and the crisis classifier.
pub const HISTORY_WINDOW: usize = 10;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant (Talkio)
    Assistant,
}

/// A single message in a caller-supplied conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,
}

impl ChatMessage {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// A message is usable only if its content is non-empty after trimming.
    /// Malformed entries from untyped callers are dropped at the boundary.
    pub fn is_valid(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// The most recent [`HISTORY_WINDOW`] entries of a history slice,
/// insertion order preserved.
pub fn recent_window(history: &[ChatMessage]) -> &[ChatMessage] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}
