//! Router wiring tests that run without a live database.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.
//! The pool is created lazily and never connects: every request here is
//! rejected by the bearer-token extractor before any query could run, so a
//! registered protected route answers 401 while an unregistered path
//! answers 404.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use devquest_api::auth::jwt::JwtConfig;
use devquest_api::config::ServerConfig;
use devquest_api::progression::ProgressionEngine;
use devquest_api::router::build_app_router;
use devquest_api::state::AppState;
use devquest_api::ws::WsManager;

fn test_app() -> axum::Router {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".into(),
            access_token_expiry_mins: 60,
        },
    };

    let pool = devquest_db::DbPool::connect_lazy("postgres://localhost/devquest")
        .expect("lazy pool creation should not fail");
    let event_bus = Arc::new(devquest_events::EventBus::default());
    let progression = Arc::new(ProgressionEngine::new(pool.clone(), Arc::clone(&event_bus)));
    let ai_client = Arc::new(devquest_ai::AiClient::new(devquest_ai::AiConfig {
        api_url: "http://localhost:9".into(),
        api_key: None,
        model: "grok".into(),
    }));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus,
        progression,
        ai_client,
    };
    build_app_router(state, &config)
}

async fn status_of(method: Method, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    test_app().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn task_routes_are_registered_and_protected() {
    assert_eq!(
        status_of(Method::GET, "/api/tasks").await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::GET, "/api/tasks/1").await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::DELETE, "/api/tasks/1").await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::POST, "/api/tasks/1/complete").await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    assert_eq!(
        status_of(Method::GET, "/api/tasks/1/bogus").await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn stats_and_leaderboard_routes_are_registered() {
    assert_eq!(
        status_of(Method::GET, "/api/achievements/stats").await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::GET, "/api/leaderboard").await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::GET, "/api/learn/resources/1").await,
        StatusCode::UNAUTHORIZED
    );
}
