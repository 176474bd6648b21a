//! # Talkio Core
//!
//! Domain types, traits, and error definitions for the Talkio chat service.
//! This crate has **zero framework dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two seams of the system are defined as traits here:
//! - [`ModelProvider`] — the single non-deterministic, I/O-bound dependency
//!   (the generative-language API)
//! - [`ReplySelector`] — the random-choice capability for canned replies,
//!   injectable so tests can substitute a deterministic selector
//!
//! Everything else in the core pipeline is a pure, total function over text.

pub mod error;
pub mod message;
pub mod provider;
pub mod selector;
pub mod verdict;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result};
pub use message::{ChatMessage, HISTORY_WINDOW, Role, recent_window};
pub use provider::{ModelProvider, SamplingConfig};
pub use selector::ReplySelector;
pub use verdict::{Flag, ReplyResult, Verdict};
