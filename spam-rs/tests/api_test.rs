//! HTTP routes exercised in-process

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use spam_rs::api::ApiServer;
use spam_rs::error::{Result, SpamError};
use spam_rs::model::{ModelHandle, ProbabilityClassifier};
use spam_rs::spam::{ScoringConfig, SpamScorer};
use std::sync::Arc;
use tower::ServiceExt;

struct FixedProbability(f64);

impl ProbabilityClassifier for FixedProbability {
    fn score_probability(&self, _message: &str) -> Result<f64> {
        Ok(self.0)
    }
}

struct RejectingClassifier;

impl ProbabilityClassifier for RejectingClassifier {
    fn score_probability(&self, _message: &str) -> Result<f64> {
        Err(SpamError::Scoring("empty feature vector".to_string()))
    }
}

fn app(model: ModelHandle) -> Router {
    let scorer = SpamScorer::new(Arc::new(ScoringConfig::default()), model);
    ApiServer::new(scorer, "127.0.0.1:0".to_string()).router()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(message: &str) -> Request<Body> {
    let encoded = serde_urlencoded::to_string(&[("message", message)]).unwrap();

    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encoded))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn test_health_reports_model_status() {
    let response = app(ModelHandle::unavailable("tfidf.json missing"))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["model_error"], "tfidf.json missing");
    assert_eq!(body["threshold"], 0.5);
}

#[tokio::test]
async fn test_classify_returns_score_result() {
    let response = app(ModelHandle::loaded(FixedProbability(0.1)))
        .oneshot(json_request(
            "/api/classify",
            serde_json::json!({ "message": "URGENT: verify now to claim your prize" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["raw_prob"], 0.1);
    assert_eq!(body["keyword_score"], 1.0);
    assert_eq!(
        body["matched_keywords"],
        serde_json::json!(["urgent", "verify", "claim", "prize", "verify now"])
    );
    assert_eq!(body["final_label"], "SPAM");
}

#[tokio::test]
async fn test_classify_rejects_blank_message() {
    let response = app(ModelHandle::loaded(FixedProbability(0.1)))
        .oneshot(json_request("/api/classify", serde_json::json!({ "message": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Message must not be empty");
}

#[tokio::test]
async fn test_classify_model_unavailable() {
    let response = app(ModelHandle::unavailable("nb_model.json missing"))
        .oneshot(json_request("/api/classify", serde_json::json!({ "message": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Model not loaded: nb_model.json missing");
}

#[tokio::test]
async fn test_classify_scoring_error() {
    let response = app(ModelHandle::loaded(RejectingClassifier))
        .oneshot(json_request("/api/classify", serde_json::json!({ "message": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Model scoring error: empty feature vector");
}

#[tokio::test]
async fn test_form_page_renders() {
    let response = app(ModelHandle::loaded(FixedProbability(0.1)))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<textarea name=\"message\""));
    assert!(!html.contains("Model loading error"));
}

#[tokio::test]
async fn test_form_page_shows_load_error() {
    let response = app(ModelHandle::unavailable("tfidf.json not found"))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains("Model loading error: tfidf.json not found"));
}

#[tokio::test]
async fn test_form_submit_renders_result() {
    let response = app(ModelHandle::loaded(FixedProbability(0.05)))
        .oneshot(form_request("See you at lunch"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("SAFE"));
    assert!(html.contains("See you at lunch"));
}

#[tokio::test]
async fn test_form_submit_empty_message_warns() {
    let response = app(ModelHandle::loaded(FixedProbability(0.05)))
        .oneshot(form_request(""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.contains("Please paste an email"));
}

#[tokio::test]
async fn test_form_submit_non_ascii_message() {
    let response = app(ModelHandle::loaded(FixedProbability(0.05)))
        .oneshot(form_request("Café GRATUIT à réclamer"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Café GRATUIT à réclamer"));
}
