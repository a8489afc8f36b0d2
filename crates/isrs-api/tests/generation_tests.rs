use crate::common::{self, StubGenerator, TestClient, TestStateBuilder, jwt, test_data};
use axum::http::StatusCode;
use isrs_api::{
    generation::{CompletionRequest, GenerationError},
    router,
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Translates "dog" to "perro" and sentences back to English, fails questions
/// and echoes the word for responses
fn practice_responder(request: &CompletionRequest) -> Result<String, GenerationError> {
    let prompt = request.prompt.as_str();

    if prompt.starts_with("You are a translator") {
        if prompt.contains("from Spanish to English") {
            return Ok(" I walk the dog every morning! ".to_string());
        }
        return Ok(" perro ".to_string());
    }
    if prompt.contains("question") {
        return Err(GenerationError::Timeout);
    }
    if prompt.contains("response") {
        return Ok("perro".to_string());
    }
    if prompt.contains("daily activities") {
        return Ok("¡Paseo al perro cada mañana!".to_string());
    }

    Ok(format!("El perro juega. ({})", prompt.len()))
}

async fn create_deck(client: &TestClient, token: &str) -> Uuid {
    let response = client
        .post_json_with_auth("/decks", &json!({ "deck_name": "Generated" }), token)
        .await;
    response.assert_status(StatusCode::CREATED);
    let deck: Value = response.json();

    Uuid::parse_str(deck["id"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_generate_practice_cards() {
    let generator = StubGenerator::new(practice_responder);
    let Some(state) = TestStateBuilder::new()
        .with_generator(generator.clone())
        .build()
        .await
    else {
        return;
    };
    let client = TestClient::new(router::router().with_state(state.clone()));
    let user_id = test_data::unique_user_id("generator");
    let token = jwt::create_test_token(&user_id);
    let deck_id = create_deck(&client, &token).await;

    let response = client
        .post_json_with_auth(
            &format!("/decks/{deck_id}/cards/generate"),
            &json!({ "answer_word": "dog", "language": "Spanish", "proficiency_level": "advanced" }),
            &token,
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["answer_word"], "dog");
    assert_eq!(body["target_word"], "perro");
    assert_eq!(body["proficiency_level"], "advanced");

    // One translation, five scenarios, three kept sentences translated back
    assert_eq!(generator.calls(), 9);

    // Failed question and echoed response are dropped
    let cards = body["cards"].as_array().unwrap();
    let scenarios: Vec<&str> = cards
        .iter()
        .map(|c| c["scenario"].as_str().unwrap())
        .collect();
    assert_eq!(scenarios, ["basic", "daily", "social"]);
    assert_eq!(cards[0]["card"]["sentence"], "El perro juega.");
    assert_eq!(cards[1]["situation"], "Daily activities");
    assert_eq!(cards[1]["card"]["sentence"], "Paseo al perro cada mañana!");
    assert_eq!(cards[1]["answer_sentence"], "I walk the dog every morning!");
    for card in cards {
        assert_eq!(card["card"]["word"], "perro");
        assert_eq!(card["card"]["language"], "Spanish");
        assert_eq!(card["card"]["level"], 1);
    }

    let response = client
        .get_with_auth(&format!("/decks/{deck_id}/cards"), &token)
        .await;
    let stored: Vec<Value> = response.json();
    assert_eq!(stored.len(), 3);

    common::db::delete_user_data(&state.pool, &user_id)
        .await
        .expect("Failed to cleanup");
}

#[tokio::test]
async fn test_generate_uses_stored_proficiency() {
    let generator = StubGenerator::new(|request| {
        if request.prompt.starts_with("You are a translator") {
            return Ok("gato".to_string());
        }
        assert!(
            request.prompt.contains("intermediate level"),
            "Unexpected prompt: {}",
            request.prompt
        );
        Ok("El gato come pescado.".to_string())
    });
    let Some(state) = TestStateBuilder::new()
        .with_generator(generator)
        .build()
        .await
    else {
        return;
    };
    let client = TestClient::new(router::router().with_state(state.clone()));
    let user_id = test_data::unique_user_id("generator-prefs");
    let token = jwt::create_test_token(&user_id);
    let deck_id = create_deck(&client, &token).await;

    let response = client
        .put_json_with_auth(
            "/preferences",
            &json!({ "proficiency_level": "intermediate" }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::OK);

    let response = client
        .post_json_with_auth(
            &format!("/decks/{deck_id}/cards/generate"),
            &json!({ "answer_word": "cat", "language": "Spanish" }),
            &token,
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["proficiency_level"], "intermediate");
    assert_eq!(body["cards"].as_array().unwrap().len(), 5);

    common::db::delete_user_data(&state.pool, &user_id)
        .await
        .expect("Failed to cleanup");
}

#[tokio::test]
async fn test_generate_translation_failure_stores_nothing() {
    let generator = StubGenerator::failing();
    let Some(state) = TestStateBuilder::new()
        .with_generator(generator.clone())
        .build()
        .await
    else {
        return;
    };
    let client = TestClient::new(router::router().with_state(state.clone()));
    let user_id = test_data::unique_user_id("generator-fail");
    let token = jwt::create_test_token(&user_id);
    let deck_id = create_deck(&client, &token).await;

    let response = client
        .post_json_with_auth(
            &format!("/decks/{deck_id}/cards/generate"),
            &json!({ "answer_word": "dog", "language": "Spanish" }),
            &token,
        )
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    // No scenario runs without a translation
    assert_eq!(generator.calls(), 1);

    let response = client
        .get_with_auth(&format!("/decks/{deck_id}/cards"), &token)
        .await;
    let stored: Vec<Value> = response.json();
    assert!(stored.is_empty());

    common::db::delete_user_data(&state.pool, &user_id)
        .await
        .expect("Failed to cleanup");
}

#[tokio::test]
async fn test_generate_empty_translation_is_unavailable() {
    let Some(state) = TestStateBuilder::new()
        .with_generator(StubGenerator::replying("  "))
        .build()
        .await
    else {
        return;
    };
    let client = TestClient::new(router::router().with_state(state.clone()));
    let user_id = test_data::unique_user_id("generator-empty");
    let token = jwt::create_test_token(&user_id);
    let deck_id = create_deck(&client, &token).await;

    let response = client
        .post_json_with_auth(
            &format!("/decks/{deck_id}/cards/generate"),
            &json!({ "answer_word": "dog", "language": "Spanish" }),
            &token,
        )
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    common::db::delete_user_data(&state.pool, &user_id)
        .await
        .expect("Failed to cleanup");
}
