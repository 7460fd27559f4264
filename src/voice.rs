use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GeminiVoice {
    pub id: &'static str,
    pub name: &'static str,
    pub lang: &'static str,
    pub gender: &'static str,
}

pub const DEFAULT_VOICE: &str = "Aoede";

macro_rules! voices {
    ($($lang:literal => [$(($name:literal, $gender:literal)),* $(,)?]),* $(,)?) => {
        &[$($(GeminiVoice {
            id: concat!($lang, "-", $name),
            name: $name,
            lang: $lang,
            gender: $gender,
        },)*)*]
    };
}

pub const VOICES: &[GeminiVoice] = voices! {
    "ko-KR" => [("Puck", "m"), ("Charon", "m"), ("Kore", "f"), ("Fenrir", "m"), ("Aoede", "f")],
    "en-US" => [("Puck", "m"), ("Charon", "m"), ("Kore", "f"), ("Fenrir", "m"), ("Aoede", "f")],
    "ja-JP" => [("Puck", "m"), ("Charon", "m"), ("Kore", "f"), ("Fenrir", "m"), ("Aoede", "f")],
    "zh-CN" => [("Puck", "m"), ("Charon", "m"), ("Kore", "f"), ("Fenrir", "m"), ("Aoede", "f")],
};

/// Maps a requested voice to the provider's voice name.
///
/// Accepts locale-qualified ids (`ko-KR-Kore`) as well as bare provider
/// names (`kore`). Anything else resolves to [`DEFAULT_VOICE`].
pub fn resolve(requested: &str) -> &'static str {
    let requested = requested.trim();

    VOICES
        .iter()
        .find(|v| v.id.eq_ignore_ascii_case(requested))
        .or_else(|| {
            VOICES
                .iter()
                .find(|v| v.name.eq_ignore_ascii_case(requested))
        })
        .map_or_else(
            || {
                tracing::warn!(voice = requested, "unknown voice, using {DEFAULT_VOICE}");
                DEFAULT_VOICE
            },
            |v| v.name,
        )
}
