// tests/e2e_auth.rs
use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

use support::{TestApp, assert_error};

#[tokio::test]
async fn first_account_is_admin_and_later_ones_are_staff() {
    let app = TestApp::new();

    let first = app.register("Jane@Example.com", "Jane").await;
    assert_eq!(first["role"], "admin");
    assert_eq!(first["email"], "jane@example.com");
    assert_eq!(first["created_at"], "2024-03-06T10:00:00.000Z");

    let second = app.register("omar@example.com", "Omar").await;
    assert_eq!(second["role"], "staff");
}

#[tokio::test]
async fn registration_rejects_bad_input() {
    let app = TestApp::new();
    app.register("jane@example.com", "Jane").await;

    let register = |email: &str, password: &str, confirm: &str| {
        json!({
            "email": email,
            "password": password,
            "confirm_password": confirm,
            "user_name": "Someone",
        })
    };

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register("JANE@example.com", "correct-horse", "correct-horse")),
        )
        .await;
    assert_error(status, &body, StatusCode::CONFLICT);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register("new@example.com", "correct-horse", "battery-staple")),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("do not match"));

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register("new@example.com", "short", "short")),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register("not-an-email", "correct-horse", "correct-horse")),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_all_look_alike() {
    let app = TestApp::new();
    app.register("jane@example.com", "Jane").await;

    for (email, password) in [
        ("jane@example.com", "wrong-password"),
        ("nobody@example.com", "correct-horse"),
        ("garbage", "correct-horse"),
    ] {
        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_error(status, &body, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid credentials");
    }
}

#[tokio::test]
async fn login_returns_token_and_profile_reads_it_back() {
    let app = TestApp::new();
    let token = app.sign_up("jane@example.com", "Jane").await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["user_name"], "Jane");
    assert_eq!(body["expires_in"], 3600);
    let capabilities = body["capabilities"].as_array().unwrap();
    assert!(
        capabilities
            .iter()
            .any(|c| c["resource"] == "activities" && c["action"] == "delete")
    );
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/v1/auth/me", None, None).await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::GET, "/api/v1/clients", Some("bogus"), None)
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_is_accepted_as_query_parameter() {
    let app = TestApp::new();
    let token = app.sign_up("jane@example.com", "Jane").await;

    let uri = format!("/api/v1/auth/me?access_token={}", token.replace(':', "%3A"));
    let (status, body) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn staff_directory_is_sorted_by_name() {
    let app = TestApp::new();
    let token = app.sign_up("zoe@example.com", "zoe").await;
    app.register("adam@example.com", "Adam").await;
    app.register("mia@example.com", "Mia").await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/users", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["user_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Adam", "Mia", "zoe"]);
    assert!(body[0].get("email").is_none());
}
