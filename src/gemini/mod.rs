use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::tts::{InlineAudio, SpeechSynthesizer};

pub mod api;
use api::{AudioExtraction, GenerateContentRequest, GenerateContentResponse};

fn default_host() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Deserialize, Clone)]
pub struct Setting {
    #[serde(rename = "gemini_api_key")]
    pub api_key: String,

    #[serde(rename = "gemini_host", default = "default_host")]
    pub host: String,

    #[serde(rename = "gemini_model", default = "default_model")]
    pub model: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider returned {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("no audio in provider response")]
    NoAudio,

    #[error("audio payload is not valid base64: {0}")]
    Decode(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

struct GeminiInner {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Clone)]
pub struct Gemini {
    inner: Arc<GeminiInner>,
}

impl Gemini {
    pub fn new(setting: &Setting) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(setting.request_timeout_secs))
            .build()?;

        let endpoint = Url::parse(&setting.host)?
            .join(&format!("v1beta/models/{}:generateContent", setting.model))?;

        Ok(Gemini {
            inner: Arc::new(GeminiInner {
                client,
                endpoint,
                api_key: setting.api_key.clone(),
            }),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }
}

#[async_trait]
impl SpeechSynthesizer for Gemini {
    async fn synthesize(&self, voice: &str, text: &str) -> Result<InlineAudio, ProviderError> {
        let request = GenerateContentRequest::read_aloud(text, voice);

        let resp = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header("x-goog-api-key", &self.inner.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "Gemini API error");
            return Err(ProviderError::Status { status, body });
        }

        let body: GenerateContentResponse = resp.json().await?;

        match body.extract_audio() {
            AudioExtraction::Found(audio) => Ok(audio),
            AudioExtraction::Missing => Err(ProviderError::NoAudio),
            AudioExtraction::Undecodable(why) => Err(ProviderError::Decode(why)),
        }
    }
}
