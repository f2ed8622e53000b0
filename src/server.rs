//! HTTP surface for the retrieval pipeline.

use crate::gemini::TextProvider;
use crate::i18n::{Language, LanguageRegistry};
use crate::mode::Mode;
use crate::pipeline::{Pipeline, Retrieval};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Query string of `GET /texts`
#[derive(Debug, Default, Deserialize)]
pub struct TextsQuery {
    pub language: Option<String>,
    pub mode: Option<String>,
}

/// Build the service router
pub fn router<P: TextProvider + 'static>(pipeline: Arc<Pipeline<P>>) -> Router {
    Router::new()
        .route("/texts", get(texts::<P>))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

/// Liveness plus the languages and modes `/texts` accepts
async fn health_check() -> impl IntoResponse {
    let languages: Vec<&str> = LanguageRegistry::get()
        .list_enabled()
        .into_iter()
        .map(|lang| lang.code)
        .collect();
    let modes: Vec<&str> = Mode::ALL.iter().map(|mode| mode.as_str()).collect();

    Json(serde_json::json!({
        "status": "ok",
        "languages": languages,
        "modes": modes,
    }))
}

async fn texts<P: TextProvider + 'static>(
    State(pipeline): State<Arc<Pipeline<P>>>,
    Query(query): Query<TextsQuery>,
) -> Json<Retrieval> {
    let language = query
        .language
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(Language::canonical().code());
    let mode = query.mode.as_deref().unwrap_or(Mode::default().as_str());

    Json(pipeline.retrieve_raw(language, mode).await)
}
