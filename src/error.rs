use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::gemini::ProviderError;

pub const MSG_EMPTY_TEXT: &str = "텍스트를 입력해주세요.";
pub const MSG_PROVIDER_FAILED: &str = "TTS 생성 중 오류가 발생했습니다.";
pub const MSG_NO_AUDIO: &str = "오디오 데이터를 찾을 수 없습니다.";
pub const MSG_INTERNAL: &str = "서버 오류가 발생했습니다.";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Error envelope returned by every `/api` route.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            details: None,
        }
    }

    pub fn internal(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            details,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Status { body, .. } => Self::internal(MSG_PROVIDER_FAILED, Some(body)),
            ProviderError::NoAudio => Self::internal(MSG_NO_AUDIO, None),
            ProviderError::Decode(why) => Self::internal(MSG_NO_AUDIO, Some(why)),
            ProviderError::Transport(why) => Self::internal(MSG_INTERNAL, Some(why.to_string())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}
