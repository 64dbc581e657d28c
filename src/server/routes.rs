// HTTP routes configuration

use super::handlers::{
    generate_handler, health_handler, info_handler, method_not_allowed_handler,
    preflight_handler,
};
use super::middleware::{cors_layer, request_id_layers};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    let max_body_bytes = config.limits.max_body_bytes;
    let state = AppState {
        config,
        gemini_client: Arc::new(gemini_client),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/generate",
            get(info_handler)
                .post(generate_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        // Base64-encoded uploads stay well below this after the client-side
        // 2 MiB guard, but leave headroom for the JSON envelope
        .layer(tower_http::limit::RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
