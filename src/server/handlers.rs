// HTTP request handlers

use super::routes::AppState;
use crate::analysis::{parse_analysis, prompt::ANALYSIS_PROMPT, AnalysisResult};
use crate::error::{GatewayError, MSG_METHOD_NOT_ALLOWED};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info};

/// Informational message returned for `GET /api/generate`.
pub const INFO_MESSAGE: &str = "API Tạo Mô Tả Hình Ảnh AI - POST hình ảnh đến /api/generate";

/// Request body for `POST /api/generate`. Fields are optional so that a
/// missing field yields the gateway's own 400 instead of a framework
/// rejection.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub image: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Handler for `POST /api/generate`: validate, call the vision model once,
/// parse the reply into four fields.
pub async fn generate_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<AnalysisResult>, GatewayError> {
    // Credential is loaded once at startup but validated per request so an
    // unconfigured deployment answers 500 instead of dying.
    if !state.gemini_client.has_api_key() {
        return Err(GatewayError::MissingApiKey);
    }

    // Deserialize manually; an unparseable body is treated the same as a
    // body with no image data.
    let req: GenerateRequest =
        serde_json::from_str(&body).map_err(|_| GatewayError::MissingImage)?;

    let image = match req.image {
        Some(image) if !image.is_empty() => image,
        _ => return Err(GatewayError::MissingImage),
    };
    let mime_type = match req.mime_type {
        Some(mime_type) if !mime_type.is_empty() => mime_type,
        _ => return Err(GatewayError::MissingImage),
    };

    if !mime_type.starts_with("image/") {
        return Err(GatewayError::InvalidFileType(mime_type));
    }

    info!(
        "Received analysis request: mime_type={}, image_base64_len={}",
        mime_type,
        image.len()
    );

    let reply = state
        .gemini_client
        .analyze_image(ANALYSIS_PROMPT, &image, &mime_type)
        .await?;

    debug!("Model reply length: {} chars", reply.len());

    // Parsing never fails; a malformed reply degrades to defaults.
    Ok(Json(parse_analysis(&reply)))
}

/// Handler for `GET /api/generate`: static informational payload.
pub async fn info_handler() -> impl IntoResponse {
    Json(json!({ "message": INFO_MESSAGE }))
}

/// Handler for non-preflight `OPTIONS /api/generate`: empty 200.
/// (CORS preflights are answered by the CORS layer before reaching here.)
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Method fallback for `/api/generate`: 405 with a JSON error body.
pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": MSG_METHOD_NOT_ALLOWED })),
    )
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check API credential
    let credential_check = if state.gemini_client.has_api_key() {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    } else {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: "API key not configured".to_string(),
        }
    };
    checks.insert("credential".to_string(), credential_check);

    // Check upstream configuration
    let upstream_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "API base: {}, model: {}",
            state.config.gemini.api_base_url, state.config.gemini.model
        ),
    };
    checks.insert("upstream".to_string(), upstream_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
