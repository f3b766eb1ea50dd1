//! Ingest Integration Tests
//!
//! Exercise the Slack event callback endpoint end-to-end: envelope handling,
//! event dispatch, and the write path behind it.
//!
//! Requires DATABASE_URL; tests return early without it.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use integration_tests::fixtures::{test_pool, unique_slack_id};
use integration_tests::{check_test_env, helpers::test_config};

use tracker_core::traits::{StatsRepository, UserRepository};
use tracker_db::{PgStatsRepository, PgUserRepository};

/// Spawn the ingest app on an ephemeral port
async fn start_ingest() -> (SocketAddr, reqwest::Client) {
    let config = test_config().expect("config");
    let state = tracker_ingest::create_app_state(config)
        .await
        .expect("ingest state");
    let app = tracker_ingest::create_app(state);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("client");
    (addr, client)
}

#[tokio::test]
async fn test_url_verification_echoes_challenge() {
    if !check_test_env().await {
        return;
    }

    let (addr, client) = start_ingest().await;
    let response = client
        .post(format!("http://{addr}/slack/events"))
        .json(&json!({ "type": "url_verification", "challenge": "challenge-42" }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["challenge"], "challenge-42");
}

#[tokio::test]
async fn test_unknown_envelope_is_acked() {
    if !check_test_env().await {
        return;
    }

    let (addr, client) = start_ingest().await;
    let response = client
        .post(format!("http://{addr}/slack/events"))
        .json(&json!({ "type": "app_rate_limited", "minute_rate_limited": 1 }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_message_event_records_tracked_emoji() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let actor = unique_slack_id("U");
    let channel = unique_slack_id("C");
    let (addr, client) = start_ingest().await;

    // The built-in default policy tracks :thumbsup: with score 1;
    // :doesnotexist: scores 0 and must be skipped
    let response = client
        .post(format!("http://{addr}/slack/events"))
        .json(&json!({
            "type": "event_callback",
            "event": {
                "type": "message",
                "user": actor,
                "text": "nice :thumbsup: :thumbsup: and :doesnotexist:",
                "channel": channel,
                "ts": "1700000000.000100"
            }
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    // Event processing is async after the ack; give it a moment
    tokio::time::sleep(Duration::from_millis(500)).await;

    let users = PgUserRepository::new(pool.clone());
    let stats = PgStatsRepository::new(pool);

    let user = users
        .find_by_slack_id(&actor)
        .await
        .unwrap()
        .expect("actor created lazily");
    let totals = stats.user_totals(user.id).await.unwrap();
    assert_eq!(totals.given_count, 2);
    assert_eq!(totals.given_score, 2);
}

#[tokio::test]
async fn test_bot_message_is_ignored() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let actor = unique_slack_id("U");
    let (addr, client) = start_ingest().await;

    let response = client
        .post(format!("http://{addr}/slack/events"))
        .json(&json!({
            "type": "event_callback",
            "event": {
                "type": "message",
                "user": actor,
                "subtype": "bot_message",
                "text": ":thumbsup:"
            }
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(300)).await;

    let users = PgUserRepository::new(pool);
    assert!(users.find_by_slack_id(&actor).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_change_updates_profile() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let slack_id = unique_slack_id("U");
    let (addr, client) = start_ingest().await;

    let response = client
        .post(format!("http://{addr}/slack/events"))
        .json(&json!({
            "type": "event_callback",
            "event": {
                "type": "user_change",
                "user": {
                    "id": slack_id,
                    "name": "casey",
                    "is_bot": false,
                    "profile": {
                        "email": "casey@example.com",
                        "display_name": "casey",
                        "real_name": "Casey Example"
                    }
                }
            }
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(300)).await;

    let users = PgUserRepository::new(pool);
    let user = users
        .find_by_slack_id(&slack_id)
        .await
        .unwrap()
        .expect("user upserted");
    assert_eq!(user.email.as_deref(), Some("casey@example.com"));
    assert_eq!(user.real_name.as_deref(), Some("Casey Example"));
    assert!(user.is_active);
}
