//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use reqwest::StatusCode;
use serde_json::Value;

use integration_tests::{
    assert_json, assert_status, check_test_env,
    fixtures::{seed_usage, test_pool, unique_slack_id, SeedUsage},
    TestServer,
};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

// ============================================================================
// User Stats Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_user_stats_is_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/users/UNOSUCHUSER/stats")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_user_stats_totals_and_tops() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let actor = unique_slack_id("U");
    let receiver = unique_slack_id("U");

    seed_usage(
        &pool,
        &[
            SeedUsage::message(&actor, "fire", 2),
            SeedUsage::message(&actor, "fire", 2),
            SeedUsage::message(&actor, "tada", 1),
            SeedUsage::reaction(&actor, "clap", 3, &receiver),
        ],
    )
    .await
    .unwrap();

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get(&format!("/users/{actor}/stats"))
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["user"]["slack_id"], actor.as_str());
    assert_eq!(body["totals"]["given_count"], 4);
    assert_eq!(body["totals"]["given_score"], 8);
    assert_eq!(body["totals"]["received_count"], 0);

    // Top given sorted by score: fire (4) first
    assert_eq!(body["top_given"][0]["emoji"], "fire");
    assert_eq!(body["top_given"][0]["score"], 4);

    // The receiver sees the reaction on the received side
    let response = server
        .get(&format!("/users/{receiver}/stats"))
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["totals"]["received_count"], 1);
    assert_eq!(body["totals"]["received_score"], 3);
    assert_eq!(body["top_received"][0]["emoji"], "clap");
}

// ============================================================================
// Leaderboard Tests
// ============================================================================

#[tokio::test]
async fn test_leaderboard_shape_and_rank_contiguity() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let giver = unique_slack_id("U");
    let receiver = unique_slack_id("U");
    seed_usage(&pool, &[SeedUsage::reaction(&giver, "star", 2, &receiver)])
        .await
        .unwrap();

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/leaderboard?sort_by=received_score&limit=50")
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["sort_by"], "received_score");
    let entries = body["entries"].as_array().unwrap();
    assert!(!entries.is_empty());
    for (idx, entry) in entries.iter().enumerate() {
        assert_eq!(entry["rank"], idx as i64 + 1);
    }

    // Non-increasing metric across ranks
    let scores: Vec<i64> = entries
        .iter()
        .map(|e| e["stats"]["received_score"].as_i64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_leaderboard_invalid_sort_falls_back() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/leaderboard?sort_by=popularity")
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["sort_by"], "received_score");
}

// ============================================================================
// History Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_user_history_is_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/users/UNOSUCHUSER/history")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_history_pagination_flags() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let actor = unique_slack_id("U");
    let seeds: Vec<SeedUsage> = (0..5)
        .map(|_| SeedUsage::message(&actor, "fire", 1))
        .collect();
    seed_usage(&pool, &seeds).await.unwrap();

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get(&format!("/users/{actor}/history?limit=2&offset=0"))
        .await
        .expect("Request failed");
    let page1: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page1["history"].as_array().unwrap().len(), 2);
    assert_eq!(page1["pagination"]["total"], 5);
    assert_eq!(page1["pagination"]["has_more"], true);

    let response = server
        .get(&format!("/users/{actor}/history?limit=2&offset=4"))
        .await
        .expect("Request failed");
    let last: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(last["history"].as_array().unwrap().len(), 1);
    assert_eq!(last["pagination"]["has_more"], false);
}

// ============================================================================
// Channel Stats Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_channel_stats_is_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/channels/CNOSUCHCHAN/stats")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_channel_stats_totals() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let actor = unique_slack_id("U");
    let channel = unique_slack_id("C");
    seed_usage(
        &pool,
        &[
            SeedUsage::message(&actor, "fire", 2).in_channel(&channel),
            SeedUsage::message(&actor, "tada", 1).in_channel(&channel),
        ],
    )
    .await
    .unwrap();

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get(&format!("/channels/{channel}/stats"))
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["channel"]["slack_id"], channel.as_str());
    assert_eq!(body["totals"]["total_count"], 2);
    assert_eq!(body["totals"]["total_score"], 3);
    assert_eq!(body["top_users"][0]["user"]["slack_id"], actor.as_str());
}

// ============================================================================
// Policy / Global Stats Tests
// ============================================================================

#[tokio::test]
async fn test_emoji_config_endpoint() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/emojis").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body["emojis"].is_object());
    assert!(body["settings"]["default_score"].is_i64());
    assert!(body["settings"]["track_all_emojis"].is_boolean());
}

#[tokio::test]
async fn test_global_stats_endpoint() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/stats/global").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body["totals"]["total_usage"].as_i64().unwrap() >= 0);
    assert!(body["top_emojis"].is_array());
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_users_and_channels() {
    if !check_test_env().await {
        return;
    }

    let pool = test_pool().await.unwrap();
    let actor = unique_slack_id("U");
    let channel = unique_slack_id("C");
    seed_usage(
        &pool,
        &[SeedUsage::message(&actor, "fire", 1).in_channel(&channel)],
    )
    .await
    .unwrap();

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users?limit=500").await.expect("Request failed");
    let users: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.as_array().unwrap().iter().any(|u| u["slack_id"] == actor.as_str()));

    let response = server
        .get("/channels?limit=500")
        .await
        .expect("Request failed");
    let channels: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(channels
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["slack_id"] == channel.as_str()));
}
