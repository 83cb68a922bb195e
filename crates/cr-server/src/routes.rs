use crate::error::ApiError;
use crate::report::status_json;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use cr_router::log::log_decision;
use cr_router::{route, score_only, RouteDecision, ScoreResult};
use cr_session::{RouterStats, SessionOverride};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub message: String,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn route_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/route", post(decide))
        .route("/api/v1/route/score", post(score))
        .route("/api/v1/route/stats", get(stats))
        .route("/api/v1/route/status", get(status))
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/session/{id}/model",
        get(get_session_model).delete(clear_session_model),
    )
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptimeSecs": state.start_time.elapsed().as_secs(),
    }))
}

async fn decide(
    State(state): State<AppState>,
    body: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteDecision>, ApiError> {
    let Json(req) = body?;
    let decision = route(&req.message, &state.config);
    if let Some(session_id) = req.session_id.as_deref() {
        state.sessions.set(session_id, &decision.model, decision.tier)?;
    }
    state.stats.record(&decision);
    log_decision(&decision, state.config.logging);
    Ok(Json(decision))
}

async fn score(
    State(state): State<AppState>,
    body: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, ApiError> {
    let Json(req) = body?;
    Ok(Json(score_only(&req.message, &state.config)))
}

async fn stats(State(state): State<AppState>) -> Json<RouterStats> {
    Json(state.stats.snapshot())
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    let mut body = status_json(&state.config, &state.stats.snapshot());
    body["sessions"] = json!(state.sessions.len());
    body["uptimeSecs"] = json!(state.start_time.elapsed().as_secs());
    Json(body)
}

async fn get_session_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionOverride>, ApiError> {
    state
        .sessions
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))
}

async fn clear_session_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionOverride>, ApiError> {
    let cleared = state
        .sessions
        .clear(&id)
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    tracing::debug!(session_id = %id, "session model override cleared");
    Ok(Json(cleared))
}
