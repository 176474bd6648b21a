//! `talkio classify` — Run the pre-classification gate from the terminal.
//!
//! Useful for tuning the phrase lists: paste a message and see which gate
//! it trips, without any provider credential or network access.

use serde_json::json;

use talkio_classifier::{classify_greeting, detect_language, looks_like_crisis, normalize};
use talkio_core::selector::FirstSelector;
use talkio_engine::extract_last_user_line;

pub fn run(text: &str, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let message = extract_last_user_line(text);
    let normalized = normalize(&message);
    let language = detect_language(&message);

    let (verdict, reply) = if let Some(reply) = classify_greeting(&normalized, &FirstSelector) {
        ("greeting", Some(reply))
    } else if looks_like_crisis(&message) {
        ("crisis", None)
    } else {
        ("pass", None)
    };

    if as_json {
        let out = json!({
            "verdict": verdict,
            "language": language.as_str(),
            "normalized": normalized,
            "reply": reply,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("verdict:    {verdict}");
        println!("language:   {}", language.as_str());
        println!("normalized: {normalized}");
        if let Some(reply) = reply {
            println!("reply:      {reply}");
        }
    }

    Ok(())
}
