//! Crisis/self-harm detection.
//!
//! Two-tier lexical gate over the canonical match form of the text:
//!
//! - **Explicit tier** — a fixed list of high-confidence phrases denoting
//!   direct first-person self-harm intent. Any hit is a crisis.
//! - **Contextual tier** — ambiguous words ("die", "dead", "kill") count
//!   only when a first-person marker ("myself", "my life", "i will",
//!   "want to") appears in the same text. "Dying of laughter" passes;
//!   "I want to die" does not.
//!
//! An explicit first-person negation ("not suicidal", "won't kill myself")
//! is checked first and suppresses the verdict for that message.
//!
//! One canonical rule set; historical variants of the keyword list are not
//! merged. The functions are pure and total over string input.

use talkio_core::{ChatMessage, Role, recent_window};

use crate::normalize::canonicalize_for_match;

/// High-confidence phrases. Matched with word-boundary containment against
/// the canonical form, so "don't" and "dont" both hit, and "self-harm"
/// arrives as "self harm".
const EXPLICIT_PHRASES: &[&str] = &[
    "kill myself",
    "killing myself",
    "end my life",
    "ending my life",
    "take my life",
    "i want to die",
    "i wanna die",
    "i dont want to live",
    "i will kill myself",
    "i will hurt myself",
    "i will harm myself",
    "self harm",
    "selfharm",
    "suicide",
    "suicidal",
    "overdose",
    "cut myself",
    "cutting myself",
    "hang myself",
];

/// Ambiguous words: insufficient alone, crisis only with a context marker.
const AMBIGUOUS_WORDS: &[&str] = &["die", "dead", "kill"];

/// First-person distress markers that disambiguate the words above.
const CONTEXT_MARKERS: &[&str] = &[
    "myself",
    "my life",
    "i will",
    "im going to",
    "i am going to",
    "want to",
    "wanna",
];

/// First-person negations. Any hit suppresses an otherwise-positive verdict
/// for this message, checked before the phrase tiers.
const NEGATION_PATTERNS: &[&str] = &[
    "not suicidal",
    "never suicidal",
    "no longer suicidal",
    "dont feel suicidal",
    "not going to kill myself",
    "not kill myself",
    "wont kill myself",
    "will not kill myself",
    "not hurt myself",
    "wont hurt myself",
    "not harm myself",
    "wont harm myself",
];

/// Word-boundary containment: `phrase` must start and end on word edges of
/// the canonical (space-delimited) text.
fn contains_phrase(canonical: &str, phrase: &str) -> bool {
    let padded = format!(" {canonical} ");
    padded.contains(&format!(" {phrase} "))
}

fn contains_word(canonical: &str, word: &str) -> bool {
    canonical.split_whitespace().any(|token| token == word)
}

/// Whether a single message signals self-harm/crisis risk.
pub fn looks_like_crisis(text: &str) -> bool {
    let canonical = canonicalize_for_match(text);
    if canonical.is_empty() {
        return false;
    }

    // Negation override first: "I'm not suicidal, just tired" passes
    // regardless of other hits.
    if NEGATION_PATTERNS
        .iter()
        .any(|pattern| contains_phrase(&canonical, pattern))
    {
        return false;
    }

    if EXPLICIT_PHRASES
        .iter()
        .any(|phrase| contains_phrase(&canonical, phrase))
    {
        return true;
    }

    // Contextual tier: ambiguous word + first-person marker.
    let ambiguous_hit = AMBIGUOUS_WORDS
        .iter()
        .any(|word| contains_word(&canonical, word));
    if !ambiguous_hit {
        return false;
    }
    CONTEXT_MARKERS
        .iter()
        .any(|marker| contains_phrase(&canonical, marker))
}

/// Whether recent user-authored history signals crisis risk.
///
/// Only user turns are considered (never assistant replies), within the
/// most recent [`talkio_core::HISTORY_WINDOW`] retained entries,
/// concatenated without role labels.
pub fn history_looks_like_crisis(history: &[ChatMessage]) -> bool {
    let joined = recent_window(history)
        .iter()
        .filter(|message| message.role == Role::User && message.is_valid())
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    looks_like_crisis(&joined)
}
