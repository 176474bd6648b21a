//! Prompt assembly for Talkio.
//!
//! Three pieces, combined per request and discarded after the model call:
//!
//! - [`persona`] — static templates selected by [`Mode`], plus the
//!   language-mirroring directive
//! - [`context`] — the bounded, role-tagged transcript rendered from
//!   caller-supplied history
//! - [`builder`] — concatenates persona, directive, context, the current
//!   message, and the trailing role cue into the final prompt string
//!
//! Persona templates are opaque configuration: tone and safety constraints
//! live in the text, not in code.

pub mod builder;
pub mod context;
pub mod persona;

pub use builder::build_prompt;
pub use context::{NO_PRIOR_MESSAGES, assemble_context};
pub use persona::{ASSISTANT_LABEL, LANGUAGE_DIRECTIVE, Mode, persona_template};
