use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, MSG_EMPTY_TEXT, MSG_INTERNAL};
use crate::state::AppState;
use crate::voice::{self, GeminiVoice, DEFAULT_VOICE, VOICES};

const DEFAULT_LANGUAGE: &str = "ko-KR";

#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResponse {
    pub success: bool,
    pub audio: String,
    pub mime_type: String,
}

pub async fn synthesize(
    State(state): State<AppState>,
    payload: Result<Json<SynthesisRequest>, JsonRejection>,
) -> Result<Json<SynthesisResponse>, ApiError> {
    let Json(request) = payload.map_err(|why| {
        tracing::error!(%why, "failed to parse request");
        ApiError::internal(MSG_INTERNAL, Some(why.body_text()))
    })?;

    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::bad_request(MSG_EMPTY_TEXT));
    }

    let voice = voice::resolve(request.voice.as_deref().unwrap_or(DEFAULT_VOICE));
    let language = request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);

    let audio = state
        .synthesizer
        .synthesize(voice, text)
        .await
        .inspect_err(|why| tracing::error!(%why, voice, language, "synthesis failed"))?
        .into_playable();

    tracing::info!(
        voice,
        language,
        bytes = audio.data.len(),
        mime_type = %audio.mime_type,
        "synthesized"
    );

    Ok(Json(SynthesisResponse {
        success: true,
        audio: base64_engine.encode(&audio.data),
        mime_type: audio.mime_type,
    }))
}

#[derive(Debug, Serialize)]
pub struct VoiceList {
    pub default: &'static str,
    pub voices: &'static [GeminiVoice],
}

pub async fn voices() -> Json<VoiceList> {
    Json(VoiceList {
        default: DEFAULT_VOICE,
        voices: VOICES,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::gemini::ProviderError;
    use crate::tts::{InlineAudio, SpeechSynthesizer};
    use crate::wav;

    pub const PCM_MIME: &str = "audio/L16;codec=pcm;rate=24000";

    /// Counts calls and replays a canned answer.
    #[derive(Clone)]
    pub struct FakeSynthesizer {
        pub calls: Arc<AtomicUsize>,
        pub last: Arc<Mutex<Option<(String, String)>>>,
        reply: Arc<dyn Fn() -> Result<InlineAudio, ProviderError> + Send + Sync>,
    }

    impl FakeSynthesizer {
        pub fn new(
            reply: impl Fn() -> Result<InlineAudio, ProviderError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                calls: Arc::default(),
                last: Arc::default(),
                reply: Arc::new(reply),
            }
        }

        pub fn pcm(pcm: Vec<u8>) -> Self {
            Self::new(move || {
                Ok(InlineAudio {
                    data: pcm.clone(),
                    mime_type: PCM_MIME.to_string(),
                })
            })
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSynthesizer {
        async fn synthesize(&self, voice: &str, text: &str) -> Result<InlineAudio, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((voice.to_string(), text.to_string()));
            (self.reply)()
        }
    }

    fn request(text: Option<&str>, voice: Option<&str>) -> SynthesisRequest {
        SynthesisRequest {
            text: text.map(str::to_string),
            voice: voice.map(str::to_string),
            language: None,
        }
    }

    async fn call(fake: &FakeSynthesizer, req: SynthesisRequest) -> axum::response::Response {
        synthesize(State(AppState::new(fake.clone())), Ok(Json(req)))
            .await
            .into_response()
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_korean_text_returns_wav() {
        let pcm: Vec<u8> = (0u8..=255).collect();
        let fake = FakeSynthesizer::pcm(pcm.clone());

        let resp = call(&fake, request(Some("안녕하세요"), None)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["mimeType"], "audio/wav");

        let audio = base64_engine
            .decode(body["audio"].as_str().unwrap())
            .unwrap();
        assert_eq!(&audio[..4], b"RIFF");
        assert_eq!(&audio[wav::HEADER_LEN..], pcm.as_slice());

        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            fake.last.lock().unwrap().clone(),
            Some((DEFAULT_VOICE.to_string(), "안녕하세요".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_call() {
        let fake = FakeSynthesizer::pcm(vec![0; 4]);

        for text in [None, Some(""), Some("   \n\t")] {
            let resp = call(&fake, request(text, Some("Puck"))).await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                json_body(resp).await,
                serde_json::json!({ "error": "텍스트를 입력해주세요." })
            );
        }

        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_text_is_trimmed() {
        let fake = FakeSynthesizer::pcm(vec![0; 4]);

        call(&fake, request(Some("  hello  "), Some("en-US-Charon"))).await;

        assert_eq!(
            fake.last.lock().unwrap().clone(),
            Some(("Charon".to_string(), "hello".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unknown_voice_uses_default() {
        let fake = FakeSynthesizer::pcm(vec![0; 4]);

        let resp = call(&fake, request(Some("hi"), Some("nobody"))).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(fake.last.lock().unwrap().as_ref().unwrap().0, DEFAULT_VOICE);
    }

    #[tokio::test]
    async fn test_container_audio_is_passed_through() {
        let fake = FakeSynthesizer::new(|| {
            Ok(InlineAudio {
                data: b"ID3....".to_vec(),
                mime_type: "audio/mpeg".to_string(),
            })
        });

        let body = json_body(call(&fake, request(Some("hi"), None)).await).await;

        assert_eq!(body["mimeType"], "audio/mpeg");
        assert_eq!(body["audio"], base64_engine.encode(b"ID3...."));
    }

    #[tokio::test]
    async fn test_huge_pcm_rate_still_returns_wav() {
        let fake = FakeSynthesizer::new(|| {
            Ok(InlineAudio {
                data: vec![9, 8, 7, 6],
                mime_type: "audio/L16;codec=pcm;rate=4000000000".to_string(),
            })
        });

        let resp = call(&fake, request(Some("hi"), None)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body["mimeType"], "audio/wav");

        let audio = base64_engine
            .decode(body["audio"].as_str().unwrap())
            .unwrap();
        assert_eq!(u32::from_le_bytes(audio[24..28].try_into().unwrap()), 24000);
        assert_eq!(&audio[wav::HEADER_LEN..], &[9, 8, 7, 6]);
    }

    #[tokio::test]
    async fn test_provider_failure_is_500_with_details() {
        let fake = FakeSynthesizer::new(|| {
            Err(ProviderError::Status {
                status: StatusCode::BAD_REQUEST,
                body: "{\"error\":\"bad voice\"}".to_string(),
            })
        });

        let resp = call(&fake, request(Some("hi"), None)).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(resp).await;
        assert_eq!(body["error"], "TTS 생성 중 오류가 발생했습니다.");
        assert_eq!(body["details"], "{\"error\":\"bad voice\"}");
        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_voice_list() {
        let Json(list) = voices().await;

        assert_eq!(list.default, DEFAULT_VOICE);
        assert_eq!(list.voices.len(), VOICES.len());
    }
}
