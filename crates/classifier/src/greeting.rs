//! Tiny-greeting detection and canned replies.
//!
//! Short, low-information salutations ("hi", "kamusta", "안녕") are answered
//! from a fixed reply table without invoking the model. The table is
//! process-wide immutable data; reply selection goes through the injected
//! [`ReplySelector`] so tests stay deterministic.

use talkio_core::ReplySelector;

use crate::normalize::normalize;

/// One greeting token and its reply variants.
pub struct GreetingEntry {
    pub token: &'static str,
    pub replies: &'static [&'static str],
}

/// Default English replies, also used by the loose-match fallback.
const ENGLISH_REPLIES: &[&str] = &["Hey!", "Hi!", "Yo!", "Sup!"];

/// Core English greeting tokens accepted by the loose-match fallback
/// ("hi there", "hey bro").
const LOOSE_ENGLISH_TOKENS: &[&str] = &["hi", "hello", "hey", "yo", "sup", "hiya"];

/// Greeting tokens (already in normalized form) mapped to reply variants.
///
/// Covers English, Filipino, Spanish, Korean, Chinese, Hindi, and Thai.
pub const GREETING_TABLE: &[GreetingEntry] = &[
    // English
    GreetingEntry { token: "hi", replies: ENGLISH_REPLIES },
    GreetingEntry { token: "hello", replies: &["Hi!", "Hey!"] },
    GreetingEntry { token: "hey", replies: &["Hey!", "Yo!"] },
    GreetingEntry { token: "yo", replies: &["Yo!"] },
    GreetingEntry { token: "sup", replies: &["Sup!"] },
    GreetingEntry { token: "hiya", replies: &["Hiya!", "Hey!"] },
    // Filipino
    GreetingEntry { token: "kamusta", replies: &["Kamusta!", "Oks naman! Ikaw?"] },
    GreetingEntry { token: "kumusta", replies: &["Kumusta!", "Okay naman. Ikaw?"] },
    // Spanish
    GreetingEntry { token: "hola", replies: &["¡Hola!", "¿Qué tal?"] },
    // Korean
    GreetingEntry { token: "안녕", replies: &["안녕!", "반가워!"] },
    GreetingEntry { token: "안녕하세요", replies: &["안녕하세요!", "반가워요!"] },
    // Chinese
    GreetingEntry { token: "你好", replies: &["你好!", "最近怎么样？"] },
    GreetingEntry { token: "您好", replies: &["您好!", "最近怎么样？"] },
    // Hindi
    GreetingEntry { token: "नमस्ते", replies: &["नमस्ते!", "कैसे हो?"] },
    // Thai
    GreetingEntry { token: "สวัสดี", replies: &["สวัสดี!", "เป็นไงบ้าง?"] },
];

/// Look up the reply set for a normalized greeting token.
pub fn greeting_replies(token: &str) -> Option<&'static [&'static str]> {
    GREETING_TABLE
        .iter()
        .find(|entry| entry.token == token)
        .map(|entry| entry.replies)
}

/// Whether raw text is a tiny greeting (exact table match, or the loose
/// two-token English fallback).
pub fn is_tiny_greeting(raw: &str) -> bool {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return false;
    }
    if greeting_replies(&normalized).is_some() {
        return true;
    }
    loose_english_match(&normalized)
}

/// Classify normalized text as a greeting and pick a canned reply.
///
/// Returns `None` when the text is not a greeting; the caller then proceeds
/// to the crisis check.
pub fn classify_greeting(normalized: &str, selector: &dyn ReplySelector) -> Option<String> {
    if normalized.is_empty() {
        return None;
    }
    if let Some(replies) = greeting_replies(normalized) {
        return Some(selector.pick(replies).to_string());
    }
    if loose_english_match(normalized) {
        return Some(selector.pick(ENGLISH_REPLIES).to_string());
    }
    None
}

/// At most two whitespace-separated tokens, the first from the core English
/// set. Catches "hi there", "hey bro", "hiya" without enumerating pairs.
fn loose_english_match(normalized: &str) -> bool {
    let mut parts = normalized.split_whitespace();
    let Some(first) = parts.next() else {
        return false;
    };
    if parts.nth(1).is_some() {
        // three or more tokens: too much information for a tiny greeting
        return false;
    }
    LOOSE_ENGLISH_TOKENS.contains(&first)
}
