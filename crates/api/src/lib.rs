use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Json, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tripsmith_agents::{PlanError, TripPlanner};
use tripsmith_core::TripRequest;
use tripsmith_genai::{GenAiClient, GenAiConfig, Generator};
use tripsmith_observability::{AppMetrics, MetricsSnapshot};

#[derive(Clone)]
pub struct ApiState {
    pub planner: Arc<TripPlanner<Generator>>,
    pub metrics: Arc<AppMetrics>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
}

/// Build the application against the real generation backend, with the
/// credential resolved from the environment once.
pub fn build_app() -> Result<Router> {
    let metrics = AppMetrics::shared();

    let config = GenAiConfig::from_env();
    match config.as_ref() {
        Some(config) => tracing::info!(model = %config.model, "generation backend configured"),
        None => tracing::error!(
            "generation credential missing; plan requests will be refused until restart"
        ),
    }

    let generator = Generator::gen_ai(GenAiClient::new(config)?);
    let planner = Arc::new(TripPlanner::new(Arc::new(generator), metrics.clone()));

    Ok(build_router(ApiState { planner, metrics }))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/plan_trip/", post(plan_trip))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(16 * 1024))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "healthy",
        message: "Trip planner API is running",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn plan_trip(
    State(state): State<ApiState>,
    Json(request): Json<TripRequest>,
) -> impl IntoResponse {
    match state.planner.plan(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(PlanError::NotConfigured) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "error": "generation_unavailable",
                "message": "generation backend credential is not configured"
            })),
        )
            .into_response(),
    }
}
