use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use serde::{Deserialize, Serialize};

use crate::tts::InlineAudio;

/// Without an imperative lead-in the model tends to answer the text instead
/// of reading it.
const READ_ALOUD_PREFIX: &str = "Read this: ";

structstruck::strike! {
    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerateContentRequest {
        pub contents: Vec<
            #[derive(Serialize, Debug)]
            pub struct RequestContent {
                pub parts: Vec<
                    #[derive(Serialize, Debug)]
                    pub struct TextPart {
                        pub text: String,
                    }
                >,
            }
        >,
        pub generation_config:
            #[derive(Serialize, Debug)]
            #[serde(rename_all = "camelCase")]
            pub struct GenerationConfig {
                pub response_modalities: Vec<&'static str>,
                pub speech_config:
                    #[derive(Serialize, Debug)]
                    #[serde(rename_all = "camelCase")]
                    pub struct SpeechConfig {
                        pub voice_config:
                            #[derive(Serialize, Debug)]
                            #[serde(rename_all = "camelCase")]
                            pub struct VoiceConfig {
                                pub prebuilt_voice_config:
                                    #[derive(Serialize, Debug)]
                                    #[serde(rename_all = "camelCase")]
                                    pub struct PrebuiltVoiceConfig {
                                        pub voice_name: String,
                                    },
                            },
                    },
            },
    }
}

impl GenerateContentRequest {
    pub fn read_aloud(text: &str, voice_name: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: format!("{READ_ALOUD_PREFIX}{text}"),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice_name.to_string(),
                        },
                    },
                },
            },
        }
    }
}

structstruck::strike! {
    #[derive(Deserialize, Debug)]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<
            #[derive(Deserialize, Debug)]
            pub struct Candidate {
                pub content: Option<
                    #[derive(Deserialize, Debug)]
                    pub struct Content {
                        #[serde(default)]
                        pub parts: Vec<
                            #[derive(Deserialize, Debug)]
                            #[serde(rename_all = "camelCase")]
                            pub struct ResponsePart {
                                pub inline_data: Option<
                                    #[derive(Deserialize, Debug)]
                                    #[serde(rename_all = "camelCase")]
                                    pub struct InlineData {
                                        pub data: String,
                                        pub mime_type: Option<String>,
                                    }
                                >,
                            }
                        >,
                    }
                >,
            }
        >,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AudioExtraction {
    Found(InlineAudio),
    Missing,
    Undecodable(String),
}

impl GenerateContentResponse {
    /// First inline part of the first candidate whose mime type is `audio/*`.
    pub fn audio_part(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.inline_data.as_ref())
            .find(|data| {
                data.mime_type
                    .as_deref()
                    .is_some_and(|mime| mime.starts_with("audio/"))
            })
    }

    pub fn extract_audio(&self) -> AudioExtraction {
        let Some(part) = self.audio_part() else {
            return AudioExtraction::Missing;
        };

        match base64_engine.decode(&part.data) {
            Ok(data) if !data.is_empty() => AudioExtraction::Found(InlineAudio {
                data,
                mime_type: part.mime_type.clone().unwrap_or_default(),
            }),
            Ok(_) => AudioExtraction::Missing,
            Err(why) => AudioExtraction::Undecodable(why.to_string()),
        }
    }
}
