// Shared helpers for driving the router in-process against a fresh
// in-memory database.
#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use produkty_api::{
    app,
    config::{AppConfig, DatabaseConfig, JokeConfig, SecurityConfig, ServerConfig},
    database, AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config(joke_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        security: SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            token_expiry_hours: None,
        },
        joke: JokeConfig {
            api_url: joke_url.to_string(),
            timeout_secs: 1,
        },
    }
}

/// Build the application against a fresh in-memory database. The default
/// joke upstream points nowhere; joke tests supply their own.
pub async fn test_app() -> Result<Router> {
    test_app_with_joke_url("http://127.0.0.1:9/jokes/random").await
}

pub async fn test_app_with_joke_url(joke_url: &str) -> Result<Router> {
    let config = test_config(joke_url);
    let pool = database::connect(&config.database).await?;
    let state = AppState::new(pool, config)?;
    Ok(app(state))
}

/// Fire one request and collect the status plus parsed JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    Ok((status, body))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).expect("body")))
        .expect("request")
}

/// Register a user and log in, returning a usable bearer token.
pub async fn register_and_login(app: &Router) -> Result<String> {
    let credentials = json!({ "login": "tester", "password": "sekret123" });

    let (status, _) = send(app, json_request("POST", "/register", None, &credentials)).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "registration failed: {status}");

    let (status, body) = send(app, json_request("POST", "/login", None, &credentials)).await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {status}");

    let token = body["access_token"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    anyhow::ensure!(!token.is_empty(), "login returned no access_token");
    Ok(token)
}
