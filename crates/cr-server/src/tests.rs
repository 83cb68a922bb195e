use crate::*;
use crate::report::{status_json, status_text};
use crate::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use cr_router::{resolve_config, RouterConfig, Tier};
use cr_session::RouterStats;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ========== Routing ==========

#[tokio::test]
async fn test_route_trivial() {
    let (status, body) = send(app(), post_json("/api/v1/route", json!({ "message": "你好" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "TRIVIAL");
    assert_eq!(body["model"], "default");
    assert_eq!(body["score"]["overrideApplied"], "short_nontechnical (≤5 chars)");
    assert_eq!(body["score"]["dimensions"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_route_empty_message_is_trivial() {
    let (status, body) = send(app(), post_json("/api/v1/route", json!({ "message": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "TRIVIAL");
}

#[tokio::test]
async fn test_route_missing_message_rejected() {
    let (status, body) = send(app(), post_json("/api/v1/route", json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "invalid_request");
    assert!(body["error"]["message"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn test_malformed_json_body_rejected() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/route/score")
        .header("content-type", "application/json")
        .body(Body::from("{\"message\": "))
        .unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_route_without_json_content_type_rejected() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/route")
        .body(Body::from(r#"{"message": "hi"}"#))
        .unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_route_uses_configured_model() {
    let raw = RouterConfig::from_json_str(
        r#"{"tiers": {"EXPERT": {"primary": "big", "fallback": "bigger"}}}"#,
    )
    .unwrap();
    let state = AppState::new(resolve_config(Some(&raw)));
    let (status, body) = send(
        app_with_state(state),
        post_json("/api/v1/route", json!({ "message": "Design a system for chat" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "EXPERT");
    assert_eq!(body["model"], "big");
    assert_eq!(body["fallback"], "bigger");
}

#[tokio::test]
async fn test_score_endpoint() {
    let (status, body) = send(
        app(),
        post_json("/api/v1/route/score", json!({ "message": "What is the capital of Japan?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "SIMPLE");
    assert!(body.get("model").is_none());
    assert!(body.get("overrideApplied").is_none());
    let calibrated = body["calibrated"].as_f64().unwrap();
    assert!((0.15..0.35).contains(&calibrated));
}

#[tokio::test]
async fn test_score_does_not_record_stats() {
    let state = AppState::default();
    send(app_with_state(state.clone()), post_json("/api/v1/route/score", json!({ "message": "hi" }))).await;
    assert_eq!(state.stats.snapshot().total_routed, 0);
}

// ========== Stats & Status ==========

#[tokio::test]
async fn test_stats_accumulate() {
    let state = AppState::default();
    for message in ["hi", "ok", "What is the capital of Japan?"] {
        let (status, _) = send(app_with_state(state.clone()), post_json("/api/v1/route", json!({ "message": message }))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = send(app_with_state(state), get("/api/v1/route/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRouted"], 3);
    assert_eq!(body["overrideCount"], 2);
    assert_eq!(body["tierCounts"]["TRIVIAL"], 2);
    assert_eq!(body["tierCounts"]["SIMPLE"], 1);
    assert!(body["avgLatencyMs"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_status() {
    let state = AppState::default();
    send(app_with_state(state.clone()), post_json("/api/v1/route", json!({ "message": "hi", "sessionId": "s1" }))).await;
    let (status, body) = send(app_with_state(state), get("/api/v1/route/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["thresholds"], json!([0.15, 0.35, 0.55, 0.75]));
    assert_eq!(body["logging"], false);
    assert_eq!(body["tiers"]["MODERATE"]["primary"], "default");
    assert_eq!(body["weights"]["codeTech"], 0.18);
    assert_eq!(body["stats"]["totalRouted"], 1);
    assert_eq!(body["sessions"], 1);
}

// ========== Session Overrides ==========

#[tokio::test]
async fn test_session_override_written_on_route() {
    let state = AppState::default();
    let (_, decision) = send(
        app_with_state(state.clone()),
        post_json("/api/v1/route", json!({ "message": "Design a system for chat", "sessionId": "abc" })),
    )
    .await;

    let (status, body) = send(app_with_state(state.clone()), get("/api/v1/session/abc/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], decision["model"]);
    assert_eq!(body["tier"], "EXPERT");
    assert!(body["updatedAt"].is_string());
    assert_eq!(state.sessions.get("abc").unwrap().tier, Tier::Expert);
}

#[tokio::test]
async fn test_session_override_missing() {
    let (status, body) = send(app(), get("/api/v1/session/nobody/model")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_session_override_delete() {
    let state = AppState::default();
    state.sessions.set("abc", "m", Tier::Simple).unwrap();

    let (status, body) = send(app_with_state(state.clone()), delete("/api/v1/session/abc/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "m");
    assert!(state.sessions.is_empty());

    let (status, _) = send(app_with_state(state), delete("/api/v1/session/abc/model")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_session_id_rejected() {
    let state = AppState::default();
    let (status, body) = send(
        app_with_state(state.clone()),
        post_json("/api/v1/route", json!({ "message": "hi", "sessionId": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert_eq!(state.stats.snapshot().total_routed, 0);
}

// ========== Report ==========

#[test]
fn test_status_text() {
    let raw = RouterConfig::from_json_str(r#"{"tiers": {"TRIVIAL": {"primary": "tiny", "fallback": "small"}}, "logging": true}"#).unwrap();
    let text = status_text(&resolve_config(Some(&raw)), &RouterStats::default());
    assert!(text.contains("Thresholds: 0.15, 0.35, 0.55, 0.75"));
    assert!(text.contains("Logging:    true"));
    assert!(text.contains("TRIVIAL    → tiny (fallback: small)"));
    assert!(text.contains("EXPERT     → default"));
    assert!(text.contains("Total:      0"));
    assert!(!text.ends_with('\n'));
    assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 3);
    assert_eq!(text.lines().filter(|l| l.contains(" → ")).count(), 5);
}

#[test]
fn test_status_json_shape() {
    let v = status_json(&Default::default(), &RouterStats::default());
    assert_eq!(v["tiers"].as_object().unwrap().len(), 5);
    assert_eq!(v["weights"].as_object().unwrap().len(), 8);
    assert_eq!(v["stats"]["tierCounts"]["EXPERT"], 0);
}
