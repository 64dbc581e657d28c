// Error types for the analysis gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// User-facing messages (Vietnamese, matching the public API contract).
pub const MSG_MISSING_API_KEY: &str =
    "Khóa API Google AI chưa được cấu hình. Vui lòng thêm GOOGLE_AI_API_KEY vào biến môi trường.";
pub const MSG_MISSING_IMAGE: &str = "Không có dữ liệu hình ảnh được cung cấp";
pub const MSG_INVALID_FILE_TYPE: &str = "Loại tệp không hợp lệ. Vui lòng tải lên hình ảnh.";
pub const MSG_INVALID_API_KEY: &str =
    "Khóa API Google AI không hợp lệ. Vui lòng kiểm tra cấu hình của bạn.";
pub const MSG_QUOTA_EXCEEDED: &str =
    "Hạn ngạch API Google AI đã vượt quá. Vui lòng kiểm tra giới hạn sử dụng.";
pub const MSG_SAFETY_BLOCKED: &str =
    "Nội dung hình ảnh bị đánh dấu bởi bộ lọc an toàn. Vui lòng thử hình ảnh khác.";
pub const MSG_GENERATION_FAILED: &str = "Không thể tạo prompt. Vui lòng thử lại.";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("missing image data in request")]
    MissingImage,

    #[error("invalid file type: {0}")]
    InvalidFileType(String),

    #[error("upstream rejected API key: {0}")]
    InvalidApiKey(String),

    #[error("upstream quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("content blocked by safety filter: {0}")]
    SafetyBlocked(String),

    #[error("Gemini API error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Classify an upstream failure by its error text, mirroring the public
    /// API contract: credential problems map to 401, quota to 429, safety
    /// filter hits to 400 and everything else to a generic 500.
    pub fn from_upstream(status: Option<u16>, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.contains("API key") || detail.contains("API_KEY") || status == Some(401) || status == Some(403) {
            return GatewayError::InvalidApiKey(detail);
        }
        if detail.contains("quota") || detail.contains("limit") || status == Some(429) {
            return GatewayError::QuotaExceeded(detail);
        }
        if detail.contains("SAFETY") {
            return GatewayError::SafetyBlocked(detail);
        }
        GatewayError::Upstream(detail)
    }

    /// HTTP status and the fixed user-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::MissingApiKey => {
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_MISSING_API_KEY)
            }
            GatewayError::MissingImage => (StatusCode::BAD_REQUEST, MSG_MISSING_IMAGE),
            GatewayError::InvalidFileType(_) => (StatusCode::BAD_REQUEST, MSG_INVALID_FILE_TYPE),
            GatewayError::InvalidApiKey(_) => (StatusCode::UNAUTHORIZED, MSG_INVALID_API_KEY),
            GatewayError::QuotaExceeded(_) => (StatusCode::TOO_MANY_REQUESTS, MSG_QUOTA_EXCEEDED),
            GatewayError::SafetyBlocked(_) => (StatusCode::BAD_REQUEST, MSG_SAFETY_BLOCKED),
            GatewayError::Upstream(_)
            | GatewayError::Config(_)
            | GatewayError::Http(_)
            | GatewayError::Json(_)
            | GatewayError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERATION_FAILED),
        }
    }
}

// Convert GatewayError to HTTP responses for Axum. Internal detail stays in
// the logs; the body carries only the fixed user-facing message.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
