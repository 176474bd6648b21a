//! Pre-classification pipeline for inbound chat messages.
//!
//! Every message passes through this gate before any model call:
//!
//! 1. [`normalize`] — canonicalize raw text for matching
//! 2. [`classify_greeting`] — tiny greetings get a canned reply, no model call
//! 3. [`looks_like_crisis`] — self-harm/crisis language gets a safety redirect
//!
//! All functions here are pure and total over arbitrary text — they never
//! fail, never block, and keep no state. The rule tables are process-wide
//! immutable data.
//!
//! # Precision/recall trade-off
//!
//! The crisis classifier is a best-effort lexical gate, not a clinical risk
//! assessment. It layers a high-confidence phrase list with a contextual
//! tier that only fires when an ambiguous word ("die", "kill") co-occurs
//! with a first-person distress marker, so "dying of laughter" passes while
//! "I want to die" does not. A first-person negation ("not suicidal")
//! suppresses the verdict outright.

pub mod crisis;
pub mod greeting;
pub mod language;
pub mod normalize;

pub use crisis::{history_looks_like_crisis, looks_like_crisis};
pub use greeting::{classify_greeting, greeting_replies, is_tiny_greeting};
pub use language::{Language, detect_language};
pub use normalize::{canonicalize_for_match, normalize};
