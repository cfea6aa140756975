/// API сервер для инференса: применяет сохранённый трансформер к новым записям

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::data::Table;
use crate::error::{PipelineError, Stage, StageContext};
use crate::pipeline::load_preprocessor;
use crate::preprocessing::FittedColumnTransformer;
use crate::types::{ErrorResponse, TransformRequest, TransformResponse};

#[derive(Clone)]
pub struct AppState {
    pub preprocessor: Arc<FittedColumnTransformer>,
}

impl AppState {
    pub fn new(preprocessor: FittedColumnTransformer) -> Self {
        Self {
            preprocessor: Arc::new(preprocessor),
        }
    }

    /// Загружает сохранённый трансформер для инференса
    pub fn from_artifact(path: &Path) -> Result<Self, PipelineError> {
        let preprocessor = load_preprocessor(path).stage(Stage::Load)?;
        Ok(Self::new(preprocessor))
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/transform", post(transform))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Diamond price preprocessing API (Rust)",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn transform(
    State(state): State<AppState>,
    Json(request): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Transform request: {} rows", request.rows.len());

    let table = Table::from_diamonds(&request.rows);
    let matrix = state.preprocessor.transform(&table).map_err(|e| {
        tracing::warn!("Transform failed: {}", e);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(TransformResponse {
        columns: state.preprocessor.feature_names(),
        features: matrix.rows().into_iter().map(|row| row.to_vec()).collect(),
    }))
}
