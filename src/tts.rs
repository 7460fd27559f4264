use async_trait::async_trait;

use crate::gemini::ProviderError;
use crate::wav::{self, PcmSpec};

pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Audio as handed back by a speech provider, already base64-decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineAudio {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl InlineAudio {
    /// Makes the payload playable in a browser. Raw PCM is wrapped in a WAV
    /// container, anything else is passed through untouched.
    pub fn into_playable(self) -> Self {
        match PcmSpec::from_mime_type(&self.mime_type) {
            Some(spec) => Self {
                data: wav::pcm_to_wav(&self.data, spec),
                mime_type: WAV_MIME_TYPE.to_string(),
            },
            None => self,
        }
    }
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Issues exactly one synthesis call for `text` spoken by `voice`.
    async fn synthesize(&self, voice: &str, text: &str) -> Result<InlineAudio, ProviderError>;
}
