//! HTTP routes.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/` | `{"ok": true, "service": "news-research-chatbot", "cache": n}` |
//! | GET | `/chat?query=...` | `{"answer", "highlights", "sources"}` |

use axum::extract::{Query, State};
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use newsdesk_core::{ChatAnswer, Error};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::error::ApiError;
use crate::state::AppState;

/// Service name reported by the health route.
pub const SERVICE_NAME: &str = "news-research-chatbot";

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
    pub service: String,
    pub cache: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatParams {
    #[serde(default)]
    pub query: Option<String>,
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/chat", get(chat))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Credentialed CORS for the listed origins; permissive without credentials when the list is empty.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health { ok: true, service: SERVICE_NAME.to_string(), cache: state.pipeline.cache().len().await })
}

async fn chat(State(state): State<AppState>, Query(params): Query<ChatParams>) -> Result<Json<ChatAnswer>, ApiError> {
    let query = params.query.unwrap_or_default();
    tracing::info!(%query, "chat request");

    if query.trim().is_empty() {
        return Err(Error::InvalidInput("query parameter is required".to_string()).into());
    }

    Ok(Json(state.pipeline.answer(&query).await?))
}
