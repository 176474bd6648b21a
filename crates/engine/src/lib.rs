//! Reply orchestration for Talkio.
//!
//! [`ChatEngine`] sequences the pipeline for each inbound message:
//! normalize → greeting check → crisis check (message, then history) →
//! context assembly → prompt build → model call → response shaping. The
//! single external side effect (the model call) lives here, together with
//! its failure handling.

pub mod pipeline;
pub mod selector;

pub use pipeline::{ChatEngine, ChatTurn, Outcome, extract_last_user_line};
pub use selector::RandomSelector;
