//! sdg9aid REST API server
//!
//! One analysis route in front of the dispatcher, plus static serving for
//! the WASM frontend. Input validation failures come back as 422 with the
//! fixed message for the frontend to show inline; everything past
//! validation is a 200 whose `result` field carries whatever string the
//! dispatcher produced.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose, Engine as _};
use llm_bridge::{Dispatcher, GeminiClient, TextModel, VisionModel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use analysis_core::{AnalysisPayload, InputError, SDG9_PROMPT};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Build the application router.
///
/// When `static_dir` is given, unmatched paths fall through to the frontend
/// assets in that directory.
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/api/analyze", post(analyze))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Construct the real dispatcher and serve until shutdown.
///
/// Fails fast when `GOOGLE_API_KEY` is missing so a misconfigured
/// deployment never accepts requests it cannot answer.
pub async fn run(port: u16, static_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let client = Arc::new(GeminiClient::from_env()?);
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(TextModel::from_client(client.clone())),
        Arc::new(VisionModel::from_client(client)),
    ));

    let app = router(AppState { dispatcher }, static_dir);

    let addr = format!("127.0.0.1:{port}");
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let image_bytes = match request.image_base64 {
        Some(encoded) => Some(
            general_purpose::STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| reject(InputError::UnreadableImage(e.to_string())))?,
        ),
        None => None,
    };

    let payload =
        AnalysisPayload::from_parts(request.text, image_bytes).map_err(reject)?;

    let input = match &payload {
        AnalysisPayload::Text(_) => "text",
        AnalysisPayload::Image(_) => "image",
    };

    let result = state.dispatcher.analyze(SDG9_PROMPT, &payload).await;

    Ok(Json(AnalyzeResponse {
        result,
        input: input.to_string(),
    }))
}

fn reject(error: InputError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text description; ignored when an image is also present
    pub text: Option<String>,
    /// Base64-encoded PNG or JPEG bytes
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// The model's judgment, or the normalized failure text
    pub result: String,
    /// Which input was analyzed: "text" or "image"
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
