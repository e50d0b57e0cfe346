//! HTTP front end.
//!
//! | route                          | purpose                                   |
//! |--------------------------------|-------------------------------------------|
//! | `GET /health`                  | liveness                                  |
//! | `POST /analyze`                | multipart `image` + `landmarks` → analysis |
//! | `GET /recommendations/:shape`  | preferred styles for a shape              |
//! | `GET /styles/:shape`           | every style ranked for a shape            |

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::classifier::FaceShape;
use crate::config::{AppConfig, MAX_RECOMMENDATIONS};
use crate::error::{Error, Result};
use crate::pipeline::{decode_image, AnalysisReport, FaceFit, ProvidedLandmarks};
use crate::recommend::Recommender;
use crate::response::{
    AnalysisResponse, ErrorResponse, RecommendationsResponse, StylesResponse,
};

/// Largest accepted request body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared, read-only request context.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: &'static Catalog,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            catalog: Catalog::builtin(),
        }
    }
}

/// [`Error`] rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from(&self.0);
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CountParams {
    pub count: Option<usize>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .route("/recommendations/:shape", get(recommendations))
        .route("/styles/:shape", get(styles))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!("FaceFit listening on {addr}");

    let app = router(Arc::new(AppState::new(config)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

pub async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "message": "FaceFit backend is running",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

fn parse_shape(raw: &str) -> Result<FaceShape> {
    raw.parse()
        .map_err(|_| Error::InvalidRequest(format!("Unknown face shape: {raw}")))
}

fn resolve_count(
    state: &AppState,
    params: std::result::Result<Query<CountParams>, QueryRejection>,
) -> Result<usize> {
    let Query(params) = params.map_err(|e| Error::InvalidRequest(e.body_text()))?;
    match params.count {
        Some(count) if count > MAX_RECOMMENDATIONS => Err(Error::InvalidRequest(format!(
            "count must be at most {MAX_RECOMMENDATIONS}"
        ))),
        Some(count) => Ok(count),
        None => Ok(state.config.recommendation_count()),
    }
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<CountParams>, QueryRejection>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<AnalysisResponse>, ApiError> {
    let count = resolve_count(&state, params)?;
    // A request that isn't multipart can't carry an image.
    let mut multipart = multipart.map_err(|_| Error::MissingImage)?;

    let mut image = None;
    let mut landmarks = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidRequest(e.body_text()))?;
        match name.as_deref() {
            Some("image") => image = Some(bytes),
            Some("landmarks") => landmarks = Some(bytes),
            other => debug!(field = ?other, "ignoring multipart field"),
        }
    }

    let image = image.ok_or(Error::MissingImage)?;
    let catalog = state.catalog;

    let report = tokio::task::spawn_blocking(move || -> Result<AnalysisReport> {
        let decoded = decode_image(&image)?;
        let landmarks = landmarks
            .ok_or_else(|| Error::InvalidRequest("landmarks field required".into()))?;
        let detector = ProvidedLandmarks::from_json(&landmarks)?;
        FaceFit::with_catalog(detector, catalog)
            .recommendation_count(count)
            .analyze_decoded(&decoded)
    })
    .await
    .map_err(|e| Error::Task(e.to_string()))??;

    Ok(Json(report.into()))
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(shape): Path<String>,
    params: std::result::Result<Query<CountParams>, QueryRejection>,
) -> std::result::Result<Json<RecommendationsResponse>, ApiError> {
    let face_shape = parse_shape(&shape)?;
    let count = resolve_count(&state, params)?;
    let recommendations = Recommender::new(state.catalog).recommend(face_shape, count)?;

    Ok(Json(RecommendationsResponse {
        face_shape,
        recommendations,
    }))
}

pub async fn styles(
    State(state): State<Arc<AppState>>,
    Path(shape): Path<String>,
) -> std::result::Result<Json<StylesResponse>, ApiError> {
    let face_shape = parse_shape(&shape)?;
    let styles = Recommender::new(state.catalog).rank_all_styles(face_shape)?;

    Ok(Json(StylesResponse { face_shape, styles }))
}
