// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge points endpoint tests.

use axum::http::StatusCode;
use flexai_api::db::FitnessStore;
use flexai_api::models::UserAccount;
use serde_json::json;

mod common;
use common::{body_json, create_test_app, FakeCompletion, TestApp};

fn app_with_account(email: &str, points: i64) -> TestApp {
    let app = create_test_app(FakeCompletion::replying("unused"));
    app.store.upsert_account(UserAccount::new(email, points));
    app
}

#[tokio::test]
async fn test_complete_challenge_adds_ten() {
    let app = app_with_account("runner@example.com", 35);

    let response = app
        .post_json("/complete_challenge", &json!({ "email": "runner@example.com" }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Points updated");
    assert_eq!(json["points"], 45);

    let response = app.get("/get_points?email=runner@example.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["points"], 45);
}

#[tokio::test]
async fn test_complete_challenge_twice_from_zero() {
    let app = app_with_account("a@b.com", 0);

    for expected in [10, 20] {
        let response = app
            .post_json("/complete_challenge", &json!({ "email": "a@b.com" }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["points"], expected);
    }

    let json = body_json(app.get("/get_points?email=a@b.com").await).await;
    assert_eq!(json["points"], 20);
}

#[tokio::test]
async fn test_complete_challenge_unknown_email() {
    let app = app_with_account("known@example.com", 5);

    let response = app
        .post_json("/complete_challenge", &json!({ "email": "ghost@example.com" }))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "User not found");

    // Nothing changed
    let known = app
        .store
        .find_account("known@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(known.points, 5);
    assert!(app
        .store
        .find_account("ghost@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_complete_challenge_missing_email() {
    let app = app_with_account("a@b.com", 0);

    let response = app.post_json("/complete_challenge", &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json("/complete_challenge", &json!({ "email": "  " }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_challenge_malformed_body() {
    let app = app_with_account("a@b.com", 0);

    let response = app
        .post_raw("/complete_challenge", "email=a@b.com".to_string())
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let account = app.store.find_account("a@b.com").await.unwrap().unwrap();
    assert_eq!(account.points, 0);
}

#[tokio::test]
async fn test_get_points_unknown_email() {
    let app = app_with_account("a@b.com", 0);

    let response = app.get("/get_points?email=nobody@example.com").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "User not found");
    assert_eq!(json["code"], "not_found");
}

#[tokio::test]
async fn test_get_points_missing_email() {
    let app = app_with_account("a@b.com", 0);

    let response = app.get("/get_points").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_padded_email_is_not_matched() {
    let app = app_with_account("a@b.com", 0);

    let response = app
        .post_json("/complete_challenge", &json!({ "email": "  a@b.com  " }))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/get_points?email=%20a@b.com").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let account = app.store.find_account("a@b.com").await.unwrap().unwrap();
    assert_eq!(account.points, 0);
}

#[tokio::test]
async fn test_get_points_duplicate_email_param() {
    let app = app_with_account("a@b.com", 0);

    let response = app.get("/get_points?email=a@b.com&email=c@d.com").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "bad_request");
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request:"));
}

#[tokio::test]
async fn test_get_points_without_points_field() {
    let app = create_test_app(FakeCompletion::replying("unused"));
    let account: UserAccount =
        serde_json::from_value(json!({ "email": "fresh@example.com" })).unwrap();
    app.store.upsert_account(account);

    let response = app.get("/get_points?email=fresh@example.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["points"], 0);
}

#[tokio::test]
async fn test_get_points_encoded_email() {
    let app = app_with_account("first+last@example.com", 70);

    let response = app.get("/get_points?email=first%2Blast%40example.com").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["points"], 70);
}

#[tokio::test]
async fn test_concurrent_challenges_no_lost_updates() {
    const CALLS: i64 = 20;
    let app = app_with_account("race@example.com", 0);

    let handles: Vec<_> = (0..CALLS)
        .map(|_| {
            let router = app.router.clone();
            tokio::spawn(async move {
                use tower::ServiceExt;
                router
                    .oneshot(
                        axum::http::Request::builder()
                            .method("POST")
                            .uri("/complete_challenge")
                            .header("content-type", "application/json")
                            .body(axum::body::Body::from(r#"{"email":"race@example.com"}"#))
                            .unwrap(),
                    )
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let json = body_json(app.get("/get_points?email=race@example.com").await).await;
    assert_eq!(json["points"], CALLS * 10);
}
