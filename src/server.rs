/*!
 * Addon HTTP surface.
 *
 * A thin transport over the resolution pipeline: the manifest, the
 * subtitles resource route, and static serving of the finished and
 * placeholder files. All resolution decisions live in the pipeline; handlers
 * only translate between the wire and the pipeline's types.
 */

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{info, warn};
use serde::Serialize;
use serde_json::json;
use tower_http::services::ServeDir;

use crate::app_config::{AppConfig, RequestOptions, TranslationProvider};
use crate::languages;
use crate::pipeline::{ResolutionPipeline, ResolvedSubtitle};

/// How long clients may cache subtitle responses, in seconds. Short on
/// purpose: a placeholder answer becomes a real file within minutes.
const CACHE_MAX_AGE_SECS: u32 = 10;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ResolutionPipeline>,
}

/// Wire shape of a subtitles resource response
#[derive(Debug, Serialize)]
struct SubtitlesResponse {
    subtitles: Vec<ResolvedSubtitle>,
    #[serde(rename = "cacheMaxAge")]
    cache_max_age: u32,
}

/// Build the addon router over the given pipeline and serving root
pub fn router(pipeline: Arc<ResolutionPipeline>, subtitles_root: PathBuf) -> Router {
    let state = AppState { pipeline };

    Router::new()
        .route("/manifest.json", get(manifest))
        .route("/:config/manifest.json", get(manifest))
        .route("/:config/subtitles/:kind/:id", get(subtitles))
        .nest_service("/subtitles", ServeDir::new(subtitles_root))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &AppConfig, pipeline: Arc<ResolutionPipeline>) -> Result<()> {
    let app = router(pipeline, config.subtitles_root());

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server started: http://{}", addr);
    info!("Manifest available: {}/manifest.json", config.public_url);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")
}

/// Addon manifest, including the per-request configuration surface
async fn manifest() -> Json<serde_json::Value> {
    Json(json!({
        "id": "org.autotranslate.subrelay",
        "version": env!("CARGO_PKG_VERSION"),
        "name": "Auto Subtitle Translate",
        "description": "Resolves subtitles from OpenSubtitles and translates them into the configured language using Google Translate or any OpenAI-compatible API.",
        "configurable": true,
        "behaviorHints": {
            "configurable": true,
            "configurationRequired": true
        },
        "config": [
            {
                "key": "provider",
                "title": "Provider",
                "type": "select",
                "required": true,
                "options": [
                    TranslationProvider::GoogleTranslate.display_name(),
                    TranslationProvider::ChatGptApi.display_name()
                ]
            },
            {
                "key": "apikey",
                "title": "ChatGPT API Key",
                "type": "text",
                "required": false
            },
            {
                "key": "base_url",
                "title": "ChatGPT API Base URL",
                "type": "text",
                "required": false,
                "default": "https://api.openai.com/v1"
            },
            {
                "key": "model_name",
                "title": "ChatGPT API Model Name",
                "type": "text",
                "required": false,
                "default": "gpt-4o-mini"
            },
            {
                "key": "translateto",
                "title": "Translate to",
                "type": "select",
                "required": true,
                "default": "English",
                "options": languages::labels(TranslationProvider::GoogleTranslate)
            }
        ],
        "types": ["series", "movie"],
        "catalogs": [],
        "resources": ["subtitles"]
    }))
}

/// Subtitles resource handler.
///
/// The config segment is the addon configuration as a JSON object. A config
/// that names an unrecognized provider is a deployment bug, not user input,
/// and surfaces as a 500 instead of an empty answer.
async fn subtitles(
    State(state): State<AppState>,
    Path((config, kind, id)): Path<(String, String, String)>,
) -> Response {
    let options: RequestOptions = match serde_json::from_str(&config) {
        Ok(options) => options,
        Err(e) => {
            warn!("Rejecting request with invalid addon config: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid addon configuration",
            )
                .into_response();
        }
    };

    let content_id = id.strip_suffix(".json").unwrap_or(&id);
    info!("Subtitle request: kind={} id={}", kind, content_id);

    let subtitles = state.pipeline.resolve(content_id, &options).await;

    Json(SubtitlesResponse {
        subtitles,
        cache_max_age: CACHE_MAX_AGE_SECS,
    })
    .into_response()
}
