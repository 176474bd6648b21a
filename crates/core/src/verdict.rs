//! Classification verdicts and the per-request reply value.
//!
//! A [`Verdict`] is produced fresh for each inbound message by the
//! pre-classification gate and never persisted. A [`ReplyResult`] is the
//! value handed back to the caller; no other metadata is retained.

use serde::{Deserialize, Serialize};

/// Outcome of the pre-classification gate for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A tiny greeting — answer with this canned reply, no model call.
    Greeting(String),
    /// Crisis language detected — answer with this safety redirect.
    Crisis(String),
    /// Neither — forward to the model with conversation context.
    Pass,
}

/// Marker attached to replies produced by the safety redirect path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Crisis,
}

/// The reply returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResult {
    /// The reply text (canned, redirect, or model-generated).
    pub text: String,

    /// Set only on the crisis path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged: Option<Flag>,
}

impl ReplyResult {
    /// A normal or greeting reply.
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flagged: None,
        }
    }

    /// A crisis redirect reply.
    pub fn crisis(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flagged: Some(Flag::Crisis),
        }
    }
}
