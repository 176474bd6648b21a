//! The per-request reply pipeline.
//!
//! A linear, short-circuiting sequence with exactly one suspension point
//! (the model call). Steps 1–4 are pure and effect-free; requests are
//! handled independently with no shared mutable state, so the engine is
//! freely shareable across concurrent requests behind an `Arc`.

use std::sync::Arc;

use tracing::{error, info};

use talkio_classifier::{
    classify_greeting, detect_language, history_looks_like_crisis, looks_like_crisis, normalize,
};
use talkio_core::{
    ChatMessage, Error, ModelProvider, ReplyResult, ReplySelector, Result, SamplingConfig, Verdict,
};
use talkio_prompt::{Mode, assemble_context, build_prompt};

/// Fixed safety message directing the user to emergency services.
///
/// Returned instead of a model reply whenever crisis language is detected;
/// hotline numbers are for the Philippines, where Talkio is deployed.
pub const CRISIS_REDIRECT: &str = "\
I'm really sorry you're feeling this way. I can't help with self-harm, but you don't have to go through this alone.

If you might be in immediate danger, please call 911 right now (Philippines) or go to the nearest ER.
You can also contact the National Center for Mental Health (NCMH) Crisis Hotline (24/7): 1553 (landline) or 0917-899-8727 / 0966-351-4518 / 0919-057-1553.

If there's someone you trust nearby, please reach out to them now and tell them you need support.";

/// Shown when the provider returns a blank reply, so the caller never sees
/// an empty bubble.
pub const EMPTY_REPLY_FALLBACK: &str =
    "Hmm, I lost my train of thought for a second. Say that again?";

/// One inbound chat turn, as assembled by the transport layer.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    /// The current message text (already extracted from the request body).
    pub message: String,
    /// Caller-owned conversation history; the engine takes a read-only view.
    pub history: Vec<ChatMessage>,
    /// Persona variant.
    pub mode: Mode,
    /// Opaque session identifier, logged only.
    pub session_id: Option<String>,
}

/// How a request was resolved, for the per-request log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Greeting,
    Crisis,
    Normal,
    Error,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Greeting => "greeting",
            Outcome::Crisis => "crisis",
            Outcome::Normal => "normal",
            Outcome::Error => "error",
        }
    }
}

/// The reply orchestrator.
///
/// The provider is optional: without one, the validation and classification
/// steps still run (greetings and the crisis redirect need no model), and
/// only a request that reaches the model-call step fails with
/// [`Error::MissingCredential`].
pub struct ChatEngine {
    provider: Option<Arc<dyn ModelProvider>>,
    selector: Arc<dyn ReplySelector>,
    sampling: SamplingConfig,
}

impl ChatEngine {
    /// Create an engine around a provider, with the default random selector.
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider: Some(provider),
            selector: Arc::new(crate::selector::RandomSelector),
            sampling: SamplingConfig::default(),
        }
    }

    /// Create an engine with no provider credential configured.
    pub fn without_provider() -> Self {
        Self {
            provider: None,
            selector: Arc::new(crate::selector::RandomSelector),
            sampling: SamplingConfig::default(),
        }
    }

    /// Substitute the reply selector (tests use a deterministic one).
    pub fn with_selector(mut self, selector: Arc<dyn ReplySelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Override the sampling configuration.
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Classify a message against the greeting and crisis gates without
    /// touching the provider. Pure; also drives the CLI `classify` command.
    pub fn classify(&self, message: &str, history: &[ChatMessage]) -> Verdict {
        let normalized = normalize(message);
        if let Some(reply) = classify_greeting(&normalized, self.selector.as_ref()) {
            return Verdict::Greeting(reply);
        }
        if looks_like_crisis(message) || history_looks_like_crisis(history) {
            return Verdict::Crisis(CRISIS_REDIRECT.to_string());
        }
        Verdict::Pass
    }

    /// Run the full pipeline for one turn.
    ///
    /// At most one provider call is made, and only when both gates pass.
    pub async fn respond(&self, turn: &ChatTurn) -> Result<ReplyResult> {
        let message = extract_last_user_line(&turn.message);
        if message.is_empty() {
            self.log_turn(turn, Outcome::Error, &message);
            return Err(Error::InvalidInput);
        }

        match self.classify(&message, &turn.history) {
            Verdict::Greeting(reply) => {
                self.log_turn(turn, Outcome::Greeting, &message);
                return Ok(ReplyResult::normal(reply));
            }
            Verdict::Crisis(redirect) => {
                self.log_turn(turn, Outcome::Crisis, &message);
                return Ok(ReplyResult::crisis(redirect));
            }
            Verdict::Pass => {}
        }

        // The credential is needed only from this point on.
        let Some(provider) = self.provider.as_deref() else {
            self.log_turn(turn, Outcome::Error, &message);
            return Err(Error::MissingCredential("GEMINI_API_KEY".into()));
        };

        let context = assemble_context(&turn.history);
        let prompt = build_prompt(turn.mode, &context, &message);

        let reply = match provider.generate(&prompt, &self.sampling).await {
            Ok(text) => text,
            Err(e) => {
                // Full detail stays server-side; the caller gets a generic
                // error from the transport layer.
                error!(provider = provider.name(), error = %e, "Model call failed");
                self.log_turn(turn, Outcome::Error, &message);
                return Err(Error::Provider(e));
            }
        };

        let reply = reply.trim();
        let text = if reply.is_empty() {
            EMPTY_REPLY_FALLBACK
        } else {
            reply
        };

        self.log_turn(turn, Outcome::Normal, &message);
        Ok(ReplyResult::normal(text))
    }

    /// One structured record per request. Summarizes the outcome without
    /// ever including raw message content.
    fn log_turn(&self, turn: &ChatTurn, outcome: Outcome, message: &str) {
        info!(
            outcome = outcome.as_str(),
            session = turn.session_id.as_deref().unwrap_or("-"),
            message_len = message.len(),
            history_len = turn.history.len(),
            language = detect_language(message).as_str(),
            "chat turn"
        );
    }
}

/// Pull the final `User:` line out of a pasted transcript.
///
/// Some clients concatenate the whole conversation into the `message` field
/// as `User: ...` / `Talkio: ...` lines; classify only what the user last
/// said. Text without any `User:` label is returned trimmed and unchanged.
pub fn extract_last_user_line(raw: &str) -> String {
    let trimmed = raw.trim();
    let last_user = trimmed
        .lines()
        .map(str::trim)
        .filter_map(strip_user_label)
        .next_back();
    match last_user {
        Some(line) => line.to_string(),
        None => trimmed.to_string(),
    }
}

/// `"User : hello"` → `Some("hello")`, label case-insensitive.
fn strip_user_label(line: &str) -> Option<&str> {
    let rest = line
        .get(..4)
        .filter(|prefix| prefix.eq_ignore_ascii_case("user"))
        .map(|_| &line[4..])?;
    let rest = rest.trim_start().strip_prefix(':')?;
    Some(rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use talkio_core::error::ProviderError;
    use talkio_core::selector::FirstSelector;

    /// Mock provider that records calls and the last prompt it saw.
    struct MockProvider {
        response_text: String,
        fail: bool,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl MockProvider {
        fn new(text: &str) -> Self {
            Self {
                response_text: text.to_string(),
                fail: false,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new("")
            }
        }
    }

    #[async_trait::async_trait]
    impl ModelProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            prompt: &str,
            _sampling: &SamplingConfig,
        ) -> std::result::Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            if self.fail {
                return Err(ProviderError::Network("connection refused".into()));
            }
            Ok(self.response_text.clone())
        }
    }

    fn engine_with(provider: Arc<MockProvider>) -> ChatEngine {
        ChatEngine::new(provider).with_selector(Arc::new(FirstSelector))
    }

    fn turn(message: &str) -> ChatTurn {
        ChatTurn {
            message: message.to_string(),
            history: Vec::new(),
            mode: Mode::default(),
            session_id: None,
        }
    }

    #[tokio::test]
    async fn greeting_short_circuits_without_provider_call() {
        let provider = Arc::new(MockProvider::new("should not be called"));
        let engine = engine_with(provider.clone());

        let result = engine.respond(&turn("hi")).await.unwrap();
        assert_eq!(result.text, "Hey!"); // FirstSelector picks the first variant
        assert!(result.flagged.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn crisis_message_returns_redirect_without_provider_call() {
        let provider = Arc::new(MockProvider::new("should not be called"));
        let engine = engine_with(provider.clone());

        let result = engine.respond(&turn("I want to kill myself")).await.unwrap();
        assert_eq!(result.flagged, Some(talkio_core::Flag::Crisis));
        assert!(result.text.contains("911"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn crisis_in_recent_history_flags_a_benign_message() {
        let provider = Arc::new(MockProvider::new("should not be called"));
        let engine = engine_with(provider.clone());

        let mut request = turn("anyway, how was your day?");
        request.history = vec![
            ChatMessage::user("i want to end my life"),
            ChatMessage::assistant("please talk to someone you trust"),
        ];

        let result = engine.respond(&request).await.unwrap();
        assert_eq!(result.flagged, Some(talkio_core::Flag::Crisis));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn normal_flow_calls_provider_exactly_once_with_full_prompt() {
        let provider = Arc::new(MockProvider::new("Why did the crab blush?"));
        let engine = engine_with(provider.clone());

        let result = engine.respond(&turn("tell me a joke")).await.unwrap();
        assert_eq!(result.text, "Why did the crab blush?");
        assert!(result.flagged.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("You are Talkio"));
        assert!(prompt.contains("User: tell me a joke"));
        assert!(prompt.contains("(no prior messages)"));
        assert!(prompt.ends_with("Talkio:"));
    }

    #[tokio::test]
    async fn blank_provider_reply_becomes_fallback_line() {
        let provider = Arc::new(MockProvider::new("   \n  "));
        let engine = engine_with(provider);

        let result = engine.respond(&turn("tell me a joke")).await.unwrap();
        assert_eq!(result.text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn provider_failure_propagates_as_provider_error() {
        let provider = Arc::new(MockProvider::failing());
        let engine = engine_with(provider);

        let err = engine.respond(&turn("tell me a joke")).await.unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[tokio::test]
    async fn empty_message_is_invalid_input() {
        let provider = Arc::new(MockProvider::new("unused"));
        let engine = engine_with(provider.clone());

        let err = engine.respond(&turn("   ")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn pasted_transcript_classifies_only_the_last_user_line() {
        let provider = Arc::new(MockProvider::new("unused"));
        let engine = engine_with(provider.clone());

        let pasted = "User: hello\nTalkio: Hey!\nUser: i want to kill myself";
        let result = engine.respond(&turn(pasted)).await.unwrap();
        assert_eq!(result.flagged, Some(talkio_core::Flag::Crisis));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn extract_last_user_line_variants() {
        assert_eq!(extract_last_user_line("  plain text  "), "plain text");
        assert_eq!(
            extract_last_user_line("User: first\nUser: second"),
            "second"
        );
        assert_eq!(extract_last_user_line("USER :  shouty label "), "shouty label");
        assert_eq!(
            extract_last_user_line("Talkio: no user lines here"),
            "Talkio: no user lines here"
        );
        assert_eq!(extract_last_user_line(""), "");
    }

    #[tokio::test]
    async fn keyless_engine_still_runs_the_gates() {
        let engine = ChatEngine::without_provider().with_selector(Arc::new(FirstSelector));

        // Validation and both classification gates need no provider.
        let greeting = engine.respond(&turn("hi")).await.unwrap();
        assert_eq!(greeting.text, "Hey!");

        let crisis = engine.respond(&turn("I want to kill myself")).await.unwrap();
        assert_eq!(crisis.flagged, Some(talkio_core::Flag::Crisis));

        let err = engine.respond(&turn("   ")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput));

        // Only a request that reaches the model call reports the credential.
        let err = engine.respond(&turn("tell me a joke")).await.unwrap_err();
        assert!(matches!(err, Error::MissingCredential(_)));
    }

    #[test]
    fn classify_is_pure_and_ordered() {
        let provider = Arc::new(MockProvider::new("unused"));
        let engine = engine_with(provider);

        // Greeting wins before the crisis check, matching the original
        // gate ordering.
        assert!(matches!(engine.classify("hi", &[]), Verdict::Greeting(_)));
        assert!(matches!(
            engine.classify("i feel suicidal", &[]),
            Verdict::Crisis(_)
        ));
        assert!(matches!(engine.classify("tell me a joke", &[]), Verdict::Pass));
    }
}
