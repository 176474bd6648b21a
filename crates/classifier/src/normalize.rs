//! Text normalization for pattern matching.
//!
//! Two canonical forms are produced from raw user input:
//!
//! - [`normalize`] — the greeting form: punctuation and emoji stripped,
//!   apostrophes kept (so "what's up" keeps its shape).
//! - [`canonicalize_for_match`] — the crisis form: apostrophes removed and
//!   punctuation treated as a word break (so "don't" and "dont" compare
//!   equal, and "self-harm" becomes "self harm").
//!
//! Both are idempotent and total; they always return a string, possibly
//! empty.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize raw input for greeting matching.
///
/// Trims, applies Unicode canonical composition (NFC) so visually-equivalent
/// glyph sequences compare equal, lower-cases with locale-agnostic case
/// folding, strips everything that is not a letter, number, whitespace, or
/// apostrophe (CJK, Hangul, Thai, and Devanagari letters survive; emoji and
/// punctuation do not), and collapses whitespace runs to single spaces.
pub fn normalize(raw: &str) -> String {
    let composed: String = raw.trim().nfc().collect();
    let lowered = composed.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for ch in lowered.chars() {
        // Typographic apostrophes fold into the ASCII one.
        let ch = if ch == '\u{2019}' { '\'' } else { ch };
        if ch.is_whitespace() {
            pending_space = true;
        } else if ch.is_alphanumeric() || ch == '\'' || is_combining_mark(ch) {
            // Combining marks are not all alphabetic (the Devanagari virama
            // U+094D is not) but they are part of the letter they attach to.
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
        // anything else (punctuation, emoji, symbols) is dropped
    }
    out
}

/// Canonicalize raw input for crisis matching.
///
/// Like [`normalize`], but apostrophe-insensitive ("don't" → "dont") and
/// with stripped punctuation acting as a word break instead of vanishing
/// ("self-harm" → "self harm"), so phrase containment can rely on
/// space-delimited word boundaries.
pub fn canonicalize_for_match(raw: &str) -> String {
    let composed: String = raw.trim().nfc().collect();
    let lowered = composed.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for ch in lowered.chars() {
        if ch == '\'' || ch == '\u{2019}' {
            continue;
        }
        if ch.is_alphanumeric() || is_combining_mark(ch) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}
