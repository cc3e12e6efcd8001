// tests/support/helpers.rs
use super::mocks::{
    FixedClock, InMemoryActivityRepo, InMemoryClientRepo, InMemoryUserRepo, PlainPasswordHasher,
    TestTokenManager,
};
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use office_activity_tracker::application::ports::time::OfficeTime;
use office_activity_tracker::application::services::{ApplicationServices, Repositories};
use office_activity_tracker::infrastructure::change_feed::BroadcastChangeFeed;
use office_activity_tracker::presentation::http::{
    live::ShutdownSignal, routes::build_router, state::HttpState,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt as _;

pub struct TestApp {
    pub router: Router,
    stop_streams: tokio::sync::watch::Sender<bool>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_office_time(OfficeTime::utc())
    }

    pub fn with_office_time(office_time: OfficeTime) -> Self {
        let repos = Repositories {
            users: Arc::new(InMemoryUserRepo::default()),
            clients: Arc::new(InMemoryClientRepo::default()),
            activities: Arc::new(InMemoryActivityRepo::default()),
        };
        let services = Arc::new(ApplicationServices::new(
            repos,
            Arc::new(PlainPasswordHasher),
            Arc::new(TestTokenManager),
            Arc::new(BroadcastChangeFeed::default()),
            Arc::new(FixedClock),
            office_time,
        ));
        let (stop_streams, shutdown) = ShutdownSignal::channel();
        let router = build_router(HttpState { services, shutdown }, &[]);
        Self {
            router,
            stop_streams,
        }
    }

    /// Signal what a graceful shutdown signals to open live streams.
    pub fn stop_streams(&self) {
        self.stop_streams.send_replace(true);
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        payload: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match payload {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    /// Send a request and decode the JSON body; empty bodies become `Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        payload: Option<Value>,
    ) -> (StatusCode, Value) {
        let resp = self.request(method, uri, token, payload).await;
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        let json = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes)));
        (status, json)
    }

    pub async fn register(&self, email: &str, user_name: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "correct-horse",
                    "confirm_password": "correct-horse",
                    "user_name": user_name,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body
    }

    /// Register and log in, returning the bearer token.
    pub async fn sign_up(&self, email: &str, user_name: &str) -> String {
        self.register(email, user_name).await;
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": "correct-horse" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"]["token"].as_str().unwrap().to_string()
    }

    pub async fn create_client(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/clients",
                Some(token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create client failed: {body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn log_activity(&self, token: &str, payload: Value) -> Value {
        let (status, body) = self
            .send(Method::POST, "/api/v1/activities", Some(token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED, "log activity failed: {body}");
        body
    }
}

/// Assert that a response carries the JSON error envelope.
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(
        body["error"].as_str(),
        expected.canonical_reason(),
        "unexpected error field: {body}"
    );
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected a message: {body}"
    );
}
