//! End-to-end pipeline tests
//!
//! Run full turns through the production adapters and session store against
//! WireMock stand-ins for the transcription, language model and synthesis
//! APIs.

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use domain::{ErrorKind, MessageRole, PipelineOutcome, PipelineStage, SessionId};
use infrastructure::{AppConfig, build_orchestrator};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Helpers
// ============================================================================

const GENERATE_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.speech = SpeechConfig {
        openai_api_key: Some("sk-test".to_string()),
        openai_base_url: server.uri(),
        murf_api_key: Some("murf-test".to_string()),
        murf_base_url: server.uri(),
        timeout_ms: 5000,
        ..Default::default()
    };
    config.inference = InferenceConfig {
        api_key: Some("gemini-test".to_string()),
        base_url: server.uri(),
        timeout_ms: 5000,
        ..Default::default()
    };
    config
}

fn sample_audio() -> Vec<u8> {
    vec![0x1A, 0x45, 0xDF, 0xA3, 0x9F, 0x42, 0x86, 0x81, 0x01]
}

fn session(id: &str) -> SessionId {
    SessionId::parse(id).unwrap()
}

async fn mount_transcription(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(header("Authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": text,
            "language": "english",
            "duration": 1.2
        })))
        .mount(server)
        .await;
}

async fn mount_generation(server: &MockServer, reply: &str) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "gemini-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": reply }], "role": "model" },
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-1.5-flash-002"
        })))
        .mount(server)
        .await;
}

async fn mount_synthesis(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/speech/generate-with-key"))
        .and(header("api-key", "murf-test"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn synthesis_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "audioFile": "https://murf.example/audio/reply.mp3",
        "audioLengthInSeconds": 2.0
    }))
}

async fn generation_prompts(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == GENERATE_PATH)
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect()
}

// ============================================================================
// Turn Outcomes
// ============================================================================

#[tokio::test]
async fn full_turn_succeeds() {
    let server = MockServer::start().await;
    mount_transcription(&server, "  Hello there  ").await;
    mount_generation(&server, "Hi! How can I help?").await;
    mount_synthesis(&server, synthesis_ok()).await;

    let orchestrator = build_orchestrator(&config_for(&server)).unwrap();
    let id = session("e2e-success");
    let outcome = orchestrator.handle_turn(&id, sample_audio()).await;

    match outcome {
        PipelineOutcome::Success {
            user_text,
            assistant_text,
            audio_ref,
        } => {
            assert_eq!(user_text, "Hello there");
            assert_eq!(assistant_text, "Hi! How can I help?");
            assert_eq!(audio_ref.as_str(), "https://murf.example/audio/reply.mp3");
        },
        other => panic!("expected success, got {other:?}"),
    }

    let history = orchestrator.history(&id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role(), MessageRole::User);
    assert_eq!(history[1].role(), MessageRole::Assistant);
}

#[tokio::test]
async fn second_turn_sees_first_exchange_as_context() {
    let server = MockServer::start().await;
    mount_transcription(&server, "My name is Sam").await;
    mount_generation(&server, "Nice to meet you, Sam.").await;
    mount_synthesis(&server, synthesis_ok()).await;

    let orchestrator = build_orchestrator(&config_for(&server)).unwrap();
    let id = session("e2e-context");
    orchestrator.handle_turn(&id, sample_audio()).await;
    orchestrator.handle_turn(&id, sample_audio()).await;

    let prompts = generation_prompts(&server).await;
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains("Previous conversation:"));
    assert!(prompts[1].contains(
        "Previous conversation:\nUser: My name is Sam\nAssistant: Nice to meet you, Sam.\n"
    ));
    assert!(prompts[1].ends_with("\nUser: My name is Sam\nAssistant:"));
}

#[tokio::test]
async fn synthesis_error_yields_partial_success() {
    let server = MockServer::start().await;
    mount_transcription(&server, "What's the weather").await;
    mount_generation(&server, "I can't check live weather").await;
    mount_synthesis(
        &server,
        ResponseTemplate::new(500).set_body_string("voice engine down"),
    )
    .await;

    let orchestrator = build_orchestrator(&config_for(&server)).unwrap();
    let id = session("e2e-partial");
    let outcome = orchestrator.handle_turn(&id, sample_audio()).await;

    assert_eq!(
        outcome,
        PipelineOutcome::PartialSuccess {
            user_text: "What's the weather".to_string(),
            assistant_text: "I can't check live weather".to_string(),
            reason: ErrorKind::SynthesisFailed,
        }
    );
    assert_eq!(orchestrator.history(&id).len(), 2);
}

#[tokio::test]
async fn silent_audio_leaves_history_untouched() {
    let server = MockServer::start().await;
    mount_transcription(&server, "   ").await;
    mount_generation(&server, "unused").await;
    mount_synthesis(&server, synthesis_ok()).await;

    let orchestrator = build_orchestrator(&config_for(&server)).unwrap();
    let id = session("e2e-silence");
    let outcome = orchestrator.handle_turn(&id, sample_audio()).await;

    assert_eq!(outcome.stage(), Some(PipelineStage::Stt));
    assert_eq!(outcome.error_kind(), Some(ErrorKind::NoSpeechDetected));
    // Fallback audio is still synthesized
    assert_eq!(
        outcome.audio_ref().map(|a| a.as_str().to_string()),
        Some("https://murf.example/audio/reply.mp3".to_string())
    );
    assert!(orchestrator.history(&id).is_empty());
    assert!(generation_prompts(&server).await.is_empty());
}

#[tokio::test]
async fn language_model_failure_carries_transcript() {
    let server = MockServer::start().await;
    mount_transcription(&server, "Tell me a joke").await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;
    mount_synthesis(&server, synthesis_ok()).await;

    let orchestrator = build_orchestrator(&config_for(&server)).unwrap();
    let id = session("e2e-llm-error");
    let outcome = orchestrator.handle_turn(&id, sample_audio()).await;

    assert_eq!(outcome.stage(), Some(PipelineStage::Llm));
    assert_eq!(outcome.error_kind(), Some(ErrorKind::LlmError));
    assert_eq!(outcome.user_text(), Some("Tell me a joke"));
    assert!(orchestrator.history(&id).is_empty());
}

#[tokio::test]
async fn unconfigured_services_fail_preflight_without_calls() {
    let server = MockServer::start().await;
    let orchestrator = build_orchestrator(&AppConfig::default()).unwrap();

    let outcome = orchestrator
        .handle_turn(&session("e2e-preflight"), sample_audio())
        .await;

    assert_eq!(outcome.stage(), Some(PipelineStage::Preflight));
    assert_eq!(outcome.error_kind(), Some(ErrorKind::ServiceUnavailable));
    assert_eq!(
        outcome.fallback_text(),
        Some("Required services unavailable: TTS, STT, LLM. Please check your API keys.")
    );
    assert!(outcome.audio_ref().is_none());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn empty_audio_is_rejected_before_transcription() {
    let server = MockServer::start().await;
    mount_synthesis(&server, synthesis_ok()).await;

    let orchestrator = build_orchestrator(&config_for(&server)).unwrap();
    let outcome = orchestrator
        .handle_turn(&session("e2e-empty"), Vec::new())
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::EmptyAudio));
    let transcription_calls = server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == "/audio/transcriptions")
        .count();
    assert_eq!(transcription_calls, 0);
}
