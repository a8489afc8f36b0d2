use crate::common::{TestClient, TestStateBuilder, jwt};
use axum::http::StatusCode;
use chrono::Duration;
use isrs_api::{auth::jwt::generate_jwt_token, router};
use serde_json::{Value, json};
use uuid::Uuid;

fn client() -> TestClient {
    let state = TestStateBuilder::new().build_without_db();
    TestClient::new(router::router().with_state(state))
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let client = client();
    let deck_id = Uuid::new_v4();
    let card_id = Uuid::new_v4();

    let get_routes = [
        "/decks".to_string(),
        format!("/decks/{deck_id}"),
        format!("/decks/{deck_id}/cards"),
        format!("/decks/{deck_id}/cards/due"),
        format!("/decks/{deck_id}/progress"),
        "/preferences".to_string(),
        "/settings/language".to_string(),
        "/study-sessions".to_string(),
    ];

    for uri in get_routes {
        let response = client.get(&uri).await;
        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "GET {uri} should require authentication"
        );
    }

    let response = client
        .post_json(&format!("/cards/{card_id}/review"), &json!({}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = client
        .post_json("/decks", &json!({ "deck_name": "Animals" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unauthorized_error_body() {
    let client = client();

    let response = client.get("/decks").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "unauthorized");
    assert!(body["message"].as_str().unwrap().contains("Not authenticated"));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let client = client();
    let token = generate_jwt_token(
        "user-1",
        "some_other_secret_that_is_also_long_enough",
        Duration::hours(1),
    )
    .unwrap();

    let response = client.get_with_auth("/decks", &token).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let client = client();
    let token = generate_jwt_token(
        "user-1",
        crate::common::TEST_JWT_SECRET,
        Duration::minutes(-10),
    )
    .unwrap();

    let response = client.get_with_auth("/preferences", &token).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let client = client();

    let response = client.get_with_auth("/decks", "not-a-jwt").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_passes_auth() {
    let client = client();
    let token = jwt::create_test_token("user-1");

    // Validation runs after auth and before storage, so a 400 proves auth passed
    let response = client
        .post_json_with_auth("/decks", &json!({ "deck_name": "" }), &token)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
