// tests/e2e_dashboard.rs
use axum::http::{Method, StatusCode, header};
use futures::StreamExt as _;
use serde_json::{Value, json};
use std::time::Duration;

mod support;

use support::{EXPIRING_PREFIX, TestApp, assert_error};

async fn seed(app: &TestApp, token: &str) {
    app.register("omar@example.com", "Omar").await;
    let client = app.create_client(token, "Acme Ltd").await;
    for (hour, subject, status, assignee) in [
        (8, "Payroll query", "Open", Some(1)),
        (9, "VAT return", "Resolved", Some(1)),
        (10, "Year-end accounts", "In Progress", Some(2)),
        (11, "Bank reconciliation", "Open", None),
    ] {
        app.log_activity(
            token,
            json!({
                "client_id": client,
                "activity_at": format!("2024-03-05T{hour:02}:00:00Z"),
                "subject": subject,
                "status": status,
                "assignee_id": assignee,
            }),
        )
        .await;
    }
}

fn subjects(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["subject"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn summary_counts_and_lists() {
    let app = TestApp::new();
    let token = app.sign_up("jane@example.com", "Jane").await;
    seed(&app, &token).await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/dashboard", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["total_activities"], 4);
    assert_eq!(
        body["status_counts"],
        json!([
            { "status": "Open", "tone": "warning", "count": 2 },
            { "status": "In Progress", "tone": "info", "count": 1 },
            { "status": "Resolved", "tone": "success", "count": 1 },
        ])
    );
    assert_eq!(subjects(&body["my_activities"]), ["Payroll query"]);
    assert_eq!(
        subjects(&body["recent_activities"]),
        [
            "Bank reconciliation",
            "Year-end accounts",
            "VAT return",
            "Payroll query"
        ]
    );
}

#[tokio::test]
async fn empty_office_has_an_empty_dashboard() {
    let app = TestApp::new();
    let token = app.sign_up("jane@example.com", "Jane").await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/dashboard", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_activities"], 0);
    assert_eq!(body["status_counts"], json!([]));
    assert_eq!(body["my_activities"], json!([]));
}

#[tokio::test]
async fn live_dashboard_pushes_a_snapshot_per_change() {
    let app = TestApp::new();
    let token = app.sign_up("jane@example.com", "Jane").await;
    let client = app.create_client(&token, "Acme Ltd").await;

    let resp = app
        .request(Method::GET, "/api/v1/dashboard/live", Some(&token), None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("text/event-stream"), "{content_type}");

    let mut frames = resp.into_body().into_data_stream();
    let first = frames.next().await.unwrap().unwrap();
    let first = String::from_utf8_lossy(&first);
    assert!(first.contains("event: snapshot"), "{first}");
    assert!(first.contains("\"total_activities\":0"), "{first}");

    app.log_activity(&token, json!({ "client_id": client, "subject": "Payroll query" }))
        .await;

    let second = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("no snapshot after change")
        .unwrap()
        .unwrap();
    let second = String::from_utf8_lossy(&second);
    assert!(second.contains("\"total_activities\":1"), "{second}");
}

#[tokio::test]
async fn live_streams_accept_the_query_token_and_reject_bad_filters() {
    let app = TestApp::new();
    let token = app.sign_up("jane@example.com", "Jane").await;

    let resp = app
        .request(
            Method::GET,
            &format!("/api/v1/clients/live?access_token={token}"),
            None,
            None,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, body) = app
        .send(
            Method::GET,
            "/api/v1/activities/live?status=archived",
            Some(&token),
            None,
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::GET, "/api/v1/dashboard/live", None, None)
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn live_stream_closes_once_the_token_expires() {
    let app = TestApp::new();
    app.sign_up("jane@example.com", "Jane").await;
    let token = format!("{EXPIRING_PREFIX}:1:admin:Jane");

    let resp = app
        .request(Method::GET, "/api/v1/clients/live", Some(&token), None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mut frames = resp.into_body().into_data_stream();
    let first = frames.next().await.unwrap().unwrap();
    assert!(String::from_utf8_lossy(&first).contains("event: snapshot"));

    let last = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("no event after expiry")
        .unwrap()
        .unwrap();
    let last = String::from_utf8_lossy(&last);
    assert!(last.contains("event: error"), "{last}");
    assert!(last.contains("token expired"), "{last}");

    let end = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("stream stayed open after expiry");
    assert!(end.is_none());
}

#[tokio::test]
async fn live_stream_ends_on_shutdown() {
    let app = TestApp::new();
    let token = app.sign_up("jane@example.com", "Jane").await;

    let resp = app
        .request(Method::GET, "/api/v1/activities/live", Some(&token), None)
        .await;
    let mut frames = resp.into_body().into_data_stream();
    frames.next().await.unwrap().unwrap();

    app.stop_streams();
    let end = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("stream stayed open after shutdown");
    assert!(end.is_none());
}
