use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use tripsmith_agents::TripPlanner;
use tripsmith_api::{build_router, ApiState};
use tripsmith_core::TripPlanResponse;
use tripsmith_genai::{GenerationOutcome, Generator, ScriptRule, ScriptedGenerator};
use tripsmith_observability::AppMetrics;

fn app_with(script: ScriptedGenerator) -> Router {
    let metrics = AppMetrics::shared();
    let planner = Arc::new(TripPlanner::new(
        Arc::new(Generator::scripted(script)),
        metrics.clone(),
    ));

    build_router(ApiState { planner, metrics })
}

fn plan_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/plan_trip/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn paris_body() -> serde_json::Value {
    json!({
        "source": "New York",
        "destination": "Paris",
        "start_date": "2025-06-01",
        "end_date": "2025-06-08",
        "budget_level": 2
    })
}

async fn response_plan(response: axum::response::Response) -> TripPlanResponse {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_is_public_and_reports_healthy() {
    let app = app_with(ScriptedGenerator::echo());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(parsed["status"], "healthy");
    assert!(parsed["message"].is_string());
    assert!(parsed["metrics"]["plan_requests_total"].is_number());
}

#[tokio::test]
async fn plan_trip_refuses_when_unconfigured_without_touching_the_backend() {
    let script = ScriptedGenerator::unconfigured();
    let app = app_with(script.clone());

    let response = app.oneshot(plan_request(paris_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(script.calls(), 0);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["error"], "generation_unavailable");
}

#[tokio::test]
async fn plan_trip_populates_all_four_sections() {
    let app = app_with(ScriptedGenerator::echo());

    let response = app.oneshot(plan_request(paris_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let plan = response_plan(response).await;

    for section in [
        &plan.flight_suggestions,
        &plan.itinerary,
        &plan.recommendations,
        &plan.weather_forecast,
    ] {
        assert!(section.contains("Paris"));
    }
    assert!(plan.itinerary.contains("lasting for 8 days"));
}

#[tokio::test]
async fn one_faulting_task_does_not_disturb_the_others() {
    let script = ScriptedGenerator::with_rules(vec![ScriptRule::new(
        "flight options",
        GenerationOutcome::Fault("upstream hung up".to_string()),
    )]);
    let app = app_with(script);

    let response = app.oneshot(plan_request(paris_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let plan = response_plan(response).await;

    assert!(plan
        .flight_suggestions
        .contains("An error occurred during flight suggestion generation"));
    assert!(plan.itinerary.contains("Paris"));
    assert!(plan.recommendations.contains("Paris"));
    assert!(plan.weather_forecast.contains("Paris"));
}

#[tokio::test]
async fn blocked_generation_surfaces_its_feedback_in_band() {
    let script = ScriptedGenerator::with_rules(vec![ScriptRule::new(
        "weather forecaster",
        GenerationOutcome::Empty {
            feedback: Some("blockReason: SAFETY".to_string()),
        },
    )]);
    let app = app_with(script);

    let response = app.oneshot(plan_request(paris_body())).await.unwrap();
    let plan = response_plan(response).await;

    assert!(plan.weather_forecast.contains("empty or blocked"));
    assert!(plan.weather_forecast.contains("SAFETY"));
}

#[tokio::test]
async fn malformed_body_is_rejected_before_planning() {
    let script = ScriptedGenerator::echo();
    let app = app_with(script.clone());

    let response = app
        .oneshot(plan_request(json!({
            "source": "New York",
            "destination": "Paris",
            "start_date": "June 1st",
            "end_date": "2025-06-08",
            "budget_level": 2
        })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn identical_requests_yield_identical_plans() {
    let app = app_with(ScriptedGenerator::echo());

    let first = app
        .clone()
        .oneshot(plan_request(paris_body()))
        .await
        .unwrap();
    let second = app.oneshot(plan_request(paris_body())).await.unwrap();

    let first = response_plan(first).await;
    let second = response_plan(second).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn out_of_range_budget_still_produces_a_plan() {
    let app = app_with(ScriptedGenerator::echo());

    let response = app
        .oneshot(plan_request(json!({
            "source": "New York",
            "destination": "Paris",
            "start_date": "2025-06-01",
            "end_date": "2025-06-08",
            "budget_level": 42
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let plan = response_plan(response).await;
    assert!(plan.flight_suggestions.contains("Any Budget"));
}
