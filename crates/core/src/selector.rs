//! ReplySelector trait — injectable random choice for canned replies.
//!
//! Greeting replies are intentionally randomized so the bot does not answer
//! "hi" the same way every time. The selection is behind a trait so tests
//! can substitute a deterministic selector and assert exact strings; the
//! production implementation (rand-backed) lives in `talkio-engine`.

/// Picks one reply variant from a non-empty set of options.
pub trait ReplySelector: Send + Sync {
    /// Pick a variant. `options` is never empty — every greeting table entry
    /// carries at least one reply.
    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str;
}

/// Always picks the first option. Used by tests and the CLI `classify`
/// command, where deterministic output matters more than variety.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl ReplySelector for FirstSelector {
    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str {
        options[0]
    }
}
