//! HTTP API gateway for Talkio.
//!
//! Exposes the chat endpoint consumed by the browser client, plus a health
//! check:
//!
//! - `POST /api/chat` — classify and answer one message
//! - `GET  /health`   — liveness probe
//!
//! The chat endpoint allows cross-origin POST/OPTIONS from any origin; the
//! browser client may be served from a different origin or a mobile app
//! shell. Built on Axum.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use talkio_core::{ChatMessage, Error, Flag};
use talkio_engine::{ChatEngine, ChatTurn};
use talkio_prompt::Mode;

/// Shared application state for the gateway.
///
/// When no provider credential is configured the engine is built without a
/// provider: validation (400) and the greeting/crisis gates still answer,
/// and only requests that reach the model call report the missing key.
pub struct GatewayState {
    pub engine: Arc<ChatEngine>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    // The chat endpoint is called from browsers served off other origins
    // (and from the Capacitor app shell), so CORS is wide open for it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::POST, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: talkio_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let engine = match talkio_providers::build_from_config(&config) {
        Ok(provider) => {
            let sampling = talkio_core::SamplingConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            };
            ChatEngine::new(provider).with_sampling(sampling)
        }
        Err(e) => {
            // Serve anyway: health checks and the provider-free gates keep
            // working, and model-bound chat fails per request.
            tracing::warn!(error = %e, "Starting without a provider");
            ChatEngine::without_provider()
        }
    };

    let engine = Arc::new(engine);

    let state = Arc::new(GatewayState { engine });
    let app = build_router(state);

    info!(addr = %addr, "Talkio gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ── Request / response types ──────────────────────────────────────────────

/// Inbound chat request. `prompt` is accepted as a synonym when `message`
/// is absent; malformed history entries are dropped downstream.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: Option<String>,

    /// Field synonym kept for older clients.
    #[serde(default)]
    prompt: Option<String>,

    #[serde(default)]
    history: Vec<ChatMessage>,

    #[serde(default)]
    mode: Option<Mode>,

    /// Opaque, logged only.
    #[serde(default, rename = "sessionId")]
    session_id: Option<String>,
}

impl ChatRequest {
    /// The message text, preferring `message` over the `prompt` synonym.
    fn message_text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.prompt.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatResponse {
    reply: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    flagged: Option<Flag>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a domain error to a wire response. Provider detail is never
/// forwarded to the caller; it has already been logged server-side.
fn map_error(err: Error) -> ApiError {
    match err {
        Error::InvalidInput => error_response(StatusCode::BAD_REQUEST, "Invalid message"),
        Error::MissingCredential(name) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Missing {name}"))
        }
        Error::Provider(_) | Error::Config { .. } => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = payload
        .message_text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| map_error(Error::InvalidInput))?;

    let turn = ChatTurn {
        message: message.to_string(),
        history: payload.history,
        mode: payload.mode.unwrap_or_default(),
        session_id: payload.session_id,
    };

    let result = state.engine.respond(&turn).await.map_err(map_error)?;

    Ok(Json(ChatResponse {
        reply: result.text,
        flagged: result.flagged,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    use talkio_core::error::ProviderError;
    use talkio_core::provider::{ModelProvider, SamplingConfig};
    use talkio_core::selector::FirstSelector;

    /// Lightweight mock provider for gateway tests.
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
            "gateway_mock"
        }

        async fn generate(
            &self,
            prompt: &str,
            _sampling: &SamplingConfig,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            if self.fail {
                return Err(ProviderError::Network("connection refused".into()));
            }
            Ok(self.response_text.clone())
        }
    }

    fn test_state(provider: Arc<MockProvider>) -> SharedState {
        let engine = ChatEngine::new(provider).with_selector(Arc::new(FirstSelector));
        Arc::new(GatewayState {
            engine: Arc::new(engine),
        })
    }

    fn keyless_state() -> SharedState {
        let engine = ChatEngine::without_provider().with_selector(Arc::new(FirstSelector));
        Arc::new(GatewayState {
            engine: Arc::new(engine),
        })
    }

    fn chat_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state(Arc::new(MockProvider::new("unused"))));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn greeting_answers_without_provider_call() {
        let provider = Arc::new(MockProvider::new("should not be called"));
        let app = build_router(test_state(provider.clone()));

        let response = app
            .oneshot(chat_request(serde_json::json!({"message": "hi"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ChatResponse = serde_json::from_slice(&body).unwrap();
        // One of the known English variants; FirstSelector makes it exact.
        assert_eq!(json.reply, "Hey!");
        assert!(json.flagged.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_message_is_a_400() {
        let app = build_router(test_state(Arc::new(MockProvider::new("unused"))));

        let response = app
            .oneshot(chat_request(serde_json::json!({"message": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.error, "Invalid message");
    }

    #[tokio::test]
    async fn missing_message_field_is_a_400() {
        let app = build_router(test_state(Arc::new(MockProvider::new("unused"))));

        let response = app
            .oneshot(chat_request(serde_json::json!({"history": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn prompt_field_is_accepted_as_synonym() {
        let provider = Arc::new(MockProvider::new("Sure, here's one."));
        let app = build_router(test_state(provider.clone()));

        let response = app
            .oneshot(chat_request(serde_json::json!({"prompt": "tell me a joke"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn crisis_message_is_flagged_and_still_a_200() {
        let provider = Arc::new(MockProvider::new("should not be called"));
        let app = build_router(test_state(provider.clone()));

        let response = app
            .oneshot(chat_request(
                serde_json::json!({"message": "I want to kill myself"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["flagged"], "crisis");
        assert!(json["reply"].as_str().unwrap().contains("911"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn normal_chat_forwards_to_the_provider_once() {
        let provider = Arc::new(MockProvider::new("Why did the crab blush?"));
        let app = build_router(test_state(provider.clone()));

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "message": "tell me a joke",
                "history": [],
                "sessionId": "abc-123"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ChatResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.reply, "Why did the crab blush?");

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("You are Talkio"));
        assert!(prompt.contains("User: tell me a joke"));
    }

    #[tokio::test]
    async fn history_and_mode_are_threaded_through() {
        let provider = Arc::new(MockProvider::new("ok"));
        let app = build_router(test_state(provider.clone()));

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "message": "still thinking about it",
                "mode": "supportive",
                "history": [
                    {"role": "user", "content": "rough week"},
                    {"role": "assistant", "content": "want to talk it through?"}
                ]
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("supportive mode"));
        assert!(prompt.contains("User: rough week"));
        assert!(prompt.contains("Talkio: want to talk it through?"));
    }

    #[tokio::test]
    async fn provider_failure_is_a_generic_500() {
        let provider = Arc::new(MockProvider::failing());
        let app = build_router(test_state(provider));

        let response = app
            .oneshot(chat_request(serde_json::json!({"message": "tell me a joke"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ErrorResponse = serde_json::from_slice(&body).unwrap();
        // no provider detail leaks to the caller
        assert_eq!(json.error, "Server error");
    }

    #[tokio::test]
    async fn keyless_server_still_serves_the_safety_gates() {
        // Empty message validation comes before any credential concern.
        let response = build_router(keyless_state())
            .oneshot(chat_request(serde_json::json!({"message": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The crisis redirect needs no model and must keep working.
        let response = build_router(keyless_state())
            .oneshot(chat_request(
                serde_json::json!({"message": "I want to kill myself"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["flagged"], "crisis");
        assert!(json["reply"].as_str().unwrap().contains("911"));

        // So do canned greetings.
        let response = build_router(keyless_state())
            .oneshot(chat_request(serde_json::json!({"message": "hi"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn keyless_server_reports_the_credential_for_model_bound_chat() {
        let app = build_router(keyless_state());

        let response = app
            .oneshot(chat_request(serde_json::json!({"message": "tell me a joke"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(json.error.contains("GEMINI_API_KEY"));
    }
}
