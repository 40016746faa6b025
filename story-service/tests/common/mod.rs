//! Shared setup for story-service integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use service_core::config::Config as CoreConfig;
use service_core::observability::init_metrics;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use story_service::config::StoryConfig;
use story_service::services::providers::{MockBehavior, MockStoryProvider, StoryProvider};
use story_service::services::StoryHandler;
use story_service::startup::{build_router, AppState};
use tower::ServiceExt;

pub fn static_dir() -> String {
    format!("{}/static", env!("CARGO_MANIFEST_DIR"))
}

/// Config bound to a random localhost port, serving the crate's static dir.
pub fn test_config(timeout_secs: u64) -> StoryConfig {
    let common = CoreConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
    };
    let static_dir = static_dir();
    let timeout = timeout_secs.to_string();
    StoryConfig::from_lookup(common, |key| match key {
        "STORY_STATIC_DIR" => Some(static_dir.clone()),
        "STORY_GENERATION_TIMEOUT_SECS" => Some(timeout.clone()),
        _ => None,
    })
    .expect("Failed to build test config")
}

/// Router wired to a mock provider, plus the provider for call assertions.
pub fn router_with(behavior: MockBehavior) -> (Router, Arc<MockStoryProvider>) {
    router_with_timeout(behavior, 5)
}

pub fn router_with_timeout(
    behavior: MockBehavior,
    timeout_secs: u64,
) -> (Router, Arc<MockStoryProvider>) {
    let config = test_config(timeout_secs);
    let provider = Arc::new(MockStoryProvider::new(behavior));
    let handler = StoryHandler::new(
        provider.clone() as Arc<dyn StoryProvider>,
        Duration::from_secs(timeout_secs),
    );
    let state = AppState::new(handler, init_metrics());
    (build_router(state, &config.http), provider)
}

pub fn ask_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

/// Send a request and decode the JSON body.
pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, body)
}

pub fn dragon() -> serde_json::Value {
    serde_json::json!({
        "prompt": "a dragon",
        "genre": "fantasy",
        "length": "short",
        "ageGroup": "children",
        "emotion": "wonder"
    })
}
