//! Best-effort language detection.
//!
//! Heuristic, not authoritative: scripts are identified by Unicode block,
//! Latin-script text is split between English, Filipino, and Spanish by a
//! handful of high-frequency function words. Used only for the per-request
//! log record; the language-mirroring directive in the prompt is what
//! actually controls the reply language.

use crate::normalize::normalize;

/// Closed set of language tags the detector can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Filipino,
    Spanish,
    Korean,
    Chinese,
    Hindi,
    Thai,
    /// More than one script in the same message (code-switching).
    Mixed,
    /// No letters at all.
    Unknown,
}

impl Language {
    /// Short tag for structured log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Filipino => "fil",
            Language::Spanish => "es",
            Language::Korean => "ko",
            Language::Chinese => "zh",
            Language::Hindi => "hi",
            Language::Thai => "th",
            Language::Mixed => "mixed",
            Language::Unknown => "unknown",
        }
    }
}

const FILIPINO_HINTS: &[&str] = &[
    "kamusta", "kumusta", "ako", "ikaw", "hindi", "salamat", "naman", "lang", "po", "talaga",
];

const SPANISH_HINTS: &[&str] = &[
    "hola", "gracias", "como", "cómo", "estás", "estoy", "qué", "bien", "por", "muy",
];

fn is_hangul(ch: char) -> bool {
    matches!(ch, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

fn is_cjk(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

fn is_devanagari(ch: char) -> bool {
    matches!(ch, '\u{0900}'..='\u{097F}')
}

fn is_thai(ch: char) -> bool {
    matches!(ch, '\u{0E00}'..='\u{0E7F}')
}

/// Detect the (probable) language of a message.
pub fn detect_language(text: &str) -> Language {
    let normalized = normalize(text);

    let mut latin = 0usize;
    let mut hangul = 0usize;
    let mut cjk = 0usize;
    let mut devanagari = 0usize;
    let mut thai = 0usize;

    for ch in normalized.chars().filter(|c| c.is_alphabetic()) {
        if is_hangul(ch) {
            hangul += 1;
        } else if is_cjk(ch) {
            cjk += 1;
        } else if is_devanagari(ch) {
            devanagari += 1;
        } else if is_thai(ch) {
            thai += 1;
        } else {
            latin += 1;
        }
    }

    let scripts_present = [latin, hangul, cjk, devanagari, thai]
        .iter()
        .filter(|&&count| count > 0)
        .count();

    match scripts_present {
        0 => Language::Unknown,
        1 => {
            if hangul > 0 {
                Language::Korean
            } else if cjk > 0 {
                Language::Chinese
            } else if devanagari > 0 {
                Language::Hindi
            } else if thai > 0 {
                Language::Thai
            } else {
                latin_language(&normalized)
            }
        }
        _ => Language::Mixed,
    }
}

/// Split Latin-script text by function-word hints; English is the default.
fn latin_language(normalized: &str) -> Language {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let filipino_hits = tokens
        .iter()
        .filter(|t| FILIPINO_HINTS.contains(*t))
        .count();
    let spanish_hits = tokens.iter().filter(|t| SPANISH_HINTS.contains(*t)).count();

    if filipino_hits > 0 && filipino_hits >= spanish_hits {
        Language::Filipino
    } else if spanish_hits > 0 {
        Language::Spanish
    } else {
        Language::English
    }
}
