//! Conversation-context assembly.
//!
//! Renders caller-supplied history into the transcript block of the prompt.
//! The caller is untyped (a browser client posting JSON), so this is a
//! defensive boundary: malformed entries are discarded, the window is
//! bounded, and an empty result renders as an explicit placeholder so the
//! prompt template never has a dangling section.

use talkio_core::{ChatMessage, HISTORY_WINDOW, Role};

use crate::persona::ASSISTANT_LABEL;

/// Placeholder rendered when no usable history survives filtering.
pub const NO_PRIOR_MESSAGES: &str = "(no prior messages)";

/// Build the role-tagged transcript from history.
///
/// Keeps the most recent [`HISTORY_WINDOW`] valid entries, oldest first,
/// rendered as `User: ...` / `Talkio: ...` lines joined by newlines.
pub fn assemble_context(history: &[ChatMessage]) -> String {
    let surviving: Vec<&ChatMessage> = history.iter().filter(|m| m.is_valid()).collect();
    let start = surviving.len().saturating_sub(HISTORY_WINDOW);

    let rendered = surviving[start..]
        .iter()
        .map(|message| {
            let label = match message.role {
                Role::User => "User",
                Role::Assistant => ASSISTANT_LABEL,
            };
            format!("{label}: {}", message.content)
        })
        .collect::<Vec<_>>()
        .join("\n");

    if rendered.is_empty() {
        NO_PRIOR_MESSAGES.to_string()
    } else {
        rendered
    }
}
