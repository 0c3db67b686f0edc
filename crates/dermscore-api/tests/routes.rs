use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

use dermscore_api::middleware::auth::Claims;
use dermscore_api::{AppState, app};
use dermscore_engine::all_templates;
use dermscore_service::templates;
use dermscore_storage::{DocumentStore, MemoryStore, Query};

const SECRET: &str = "route-test-secret";

async fn test_app() -> (Router, Arc<dyn DocumentStore>) {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    templates::seed(store.as_ref(), all_templates(), jiff::Timestamp::now())
        .await
        .unwrap();
    (app(AppState::new(store.clone(), SECRET)), store)
}

fn token(sub: &str, admin: bool) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        admin,
        exp: 4_102_444_800,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn post(path: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn braden_inputs() -> Value {
    json!({
        "sensory": "3", "moisture": "3", "activity": "3",
        "mobility": "3", "nutrition": "3", "friction": "3"
    })
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = test_app().await;
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn templates_are_listed_and_fetched() {
    let (app, _) = test_app().await;

    let (status, body) = send(&app, Request::get("/templates").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["braden", "dlqi", "scorten"]);

    let (status, body) =
        send(&app, Request::get("/templates/dlqi").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inputs"].as_array().unwrap().len(), 10);

    let (status, body) =
        send(&app, Request::get("/templates/pasi").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not-found");
}

#[tokio::test]
async fn calculate_score_round_trip() {
    let (app, store) = test_app().await;
    let bearer = token("nurse-1", false);

    let (status, body) = send(
        &app,
        post(
            "/calculateScore",
            Some(&bearer),
            json!({ "templateSlug": "braden", "inputs": braden_inputs(), "patientRef": null }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["score"], 18.0);
    assert_eq!(body["interpretationLabel"], "Mild risk");
    assert!(body["sessionId"].is_string());
    assert!(body["resultId"].is_string());

    let results = store.query("results", &Query::new()).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].data["userId"], "nurse-1");
}

#[tokio::test]
async fn calls_without_a_valid_token_are_unauthenticated() {
    let (app, store) = test_app().await;
    let body = json!({ "templateSlug": "braden", "inputs": braden_inputs() });

    let (status, response) = send(&app, post("/calculateScore", None, body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["code"], "unauthenticated");
    assert_eq!(response["error"], "Authentication required");

    let (status, _) = send(&app, post("/calculateScore", Some("not-a-jwt"), body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(store.query("sessions", &Query::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_token_wins_over_a_malformed_body() {
    let (app, _) = test_app().await;

    for path in ["/calculateScore", "/submitToolResult", "/generateResultExport"] {
        let (status, body) = send(&app, post(path, None, json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}: {body}");
        assert_eq!(body["code"], "unauthenticated");
    }

    let req = Request::post("/calculateScore")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validation_failures_name_the_input() {
    let (app, _) = test_app().await;
    let mut inputs = braden_inputs();
    inputs.as_object_mut().unwrap().remove("nutrition");

    let (status, body) = send(
        &app,
        post(
            "/calculateScore",
            Some(&token("nurse-1", false)),
            json!({ "templateSlug": "braden", "inputs": inputs }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");
    assert!(body["error"].as_str().unwrap().contains("Nutrition"));
}

#[tokio::test]
async fn malformed_json_is_an_invalid_argument() {
    let (app, _) = test_app().await;
    let req = Request::post("/calculateScore")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token("u1", false)))
        .body(Body::from("{\"inputs\": {}}"))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");
}

#[tokio::test]
async fn foreign_sessions_are_forbidden() {
    let (app, _) = test_app().await;

    let (_, first) = send(
        &app,
        post(
            "/calculateScore",
            Some(&token("owner", false)),
            json!({ "templateSlug": "braden", "inputs": braden_inputs() }),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        post(
            "/calculateScore",
            Some(&token("intruder", false)),
            json!({
                "templateSlug": "braden",
                "inputs": braden_inputs(),
                "sessionId": first["sessionId"],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "permission-denied");
}

#[tokio::test]
async fn tool_results_feed_the_export() {
    let (app, _) = test_app().await;
    let bearer = token("derm-1", false);

    let (status, submitted) = send(
        &app,
        post(
            "/submitToolResult",
            Some(&bearer),
            json!({
                "toolId": "regiscar",
                "toolSlug": "regiscar",
                "toolName": "RegiSCAR",
                "inputs": { "fever": true },
                "result": { "score": 4, "interpretation": "Probable DRESS", "details": { "eosinophils": 1.2 } },
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{submitted}");

    let (status, export) = send(
        &app,
        post(
            "/generateResultExport",
            Some(&bearer),
            json!({ "sessionIds": [submitted["sessionId"]] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{export}");
    assert!(export["text"].as_str().unwrap().starts_with("RegiSCAR — 4 (Probable DRESS)"));
    assert_eq!(export["csv"].as_str().unwrap().lines().count(), 2);

    // Another user sees nothing; an admin sees the result.
    let (_, other) = send(
        &app,
        post(
            "/generateResultExport",
            Some(&token("derm-2", false)),
            json!({ "sessionIds": [submitted["sessionId"]] }),
        ),
    )
    .await;
    assert_eq!(other["text"], "");

    let (_, admin) = send(
        &app,
        post(
            "/generateResultExport",
            Some(&token("ops", true)),
            json!({ "sessionIds": [submitted["sessionId"]] }),
        ),
    )
    .await;
    assert_eq!(admin["csv"].as_str().unwrap().lines().count(), 2);
}

#[tokio::test]
async fn export_rejects_empty_id_lists() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        &app,
        post(
            "/generateResultExport",
            Some(&token("u1", false)),
            json!({ "sessionIds": [] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");
}
