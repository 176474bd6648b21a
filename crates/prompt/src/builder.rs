//! Final prompt construction.
//!
//! Concatenates persona block, language directive, rendered context, the
//! literal current message, and the trailing role cue. Built fresh per
//! request, discarded after the model call. Inputs are already validated by
//! upstream stages; there is nothing to fail here.

use crate::persona::{ASSISTANT_LABEL, LANGUAGE_DIRECTIVE, Mode, persona_template};

/// Build the full prompt string for the model call.
///
/// The trailing `Talkio:` cue marks where the assistant's reply begins.
pub fn build_prompt(mode: Mode, context: &str, message: &str) -> String {
    format!(
        "{persona}\n\n{directive}\n\nConversation so far:\n{context}\n\nUser: {message}\n\n{cue}:",
        persona = persona_template(mode),
        directive = LANGUAGE_DIRECTIVE,
        cue = ASSISTANT_LABEL,
    )
}
