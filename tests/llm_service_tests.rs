mod common;

use common::{client, get_text, start_llm};
use mockwire::llm::{ChatCompletionResponse, MockAnswer};

async fn complete(base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client()
        .post(format!("{}/v1/chat/completions", base_url))
        .json(&body)
        .send()
        .await
        .expect("request sends")
}

async fn inner_answer(response: reqwest::Response) -> MockAnswer {
    let parsed: ChatCompletionResponse = response.json().await.expect("response deserializes");
    serde_json::from_str(&parsed.choices[0].message.content).expect("inner document parses")
}

#[tokio::test]
async fn completion_answers_the_file_listing_scenario() {
    let mut server = start_llm().await;

    let body = serde_json::json!({
        "model": "x",
        "input": [{}, {"content": "How do I list files here?"}],
    });
    let response = complete(&server.base_url(), body).await;
    assert_eq!(response.status().as_u16(), 200);

    let parsed: ChatCompletionResponse = response.json().await.expect("response deserializes");
    assert_eq!(parsed.id, "mock-response");
    assert_eq!(parsed.object, "chat.completion");
    assert_eq!(parsed.model, "x");
    assert_eq!(parsed.choices.len(), 1);
    assert_eq!(parsed.choices[0].message.role, "assistant");

    let inner: MockAnswer =
        serde_json::from_str(&parsed.choices[0].message.content).expect("inner document parses");
    assert_eq!(
        inner,
        MockAnswer {
            answer: "To list files by size, use: ls -lhS".to_string(),
            commands: vec!["ls -lhS".to_string()],
        }
    );

    server.shutdown().await;
}

#[tokio::test]
async fn file_listing_rule_ignores_case_and_surrounding_text() {
    let mut server = start_llm().await;

    let body = serde_json::json!({
        "model": "m",
        "input": [{}, {"content": "please LIST FILES sorted by size, thanks"}],
    });
    let inner = inner_answer(complete(&server.base_url(), body).await).await;

    assert_eq!(inner.commands, vec!["ls -lhS".to_string()]);

    server.shutdown().await;
}

#[tokio::test]
async fn disk_usage_rule_answers_du() {
    let mut server = start_llm().await;

    let body = serde_json::json!({
        "model": "m",
        "input": [{}, {"content": "What is my Disk Usage right now?"}],
    });
    let inner = inner_answer(complete(&server.base_url(), body).await).await;

    assert_eq!(inner.answer, "Show disk usage with du command");
    assert_eq!(inner.commands, vec!["du -sh *".to_string()]);

    server.shutdown().await;
}

#[tokio::test]
async fn default_branch_echoes_first_fifty_chars() {
    let mut server = start_llm().await;

    let prompt = "x".repeat(75);
    let body = serde_json::json!({
        "model": "m",
        "input": [{}, {"content": prompt}],
    });
    let inner = inner_answer(complete(&server.base_url(), body).await).await;

    assert_eq!(inner.answer, format!("Mock response to: {}...", "x".repeat(50)));
    assert!(inner.commands.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn short_input_answers_instead_of_resetting() {
    let mut server = start_llm().await;

    for body in [
        serde_json::json!({"model": "m"}),
        serde_json::json!({"model": "m", "input": []}),
        serde_json::json!({"model": "m", "input": [{"content": "only turn"}]}),
    ] {
        let response = complete(&server.base_url(), body).await;
        assert_eq!(response.status().as_u16(), 200);

        let inner = inner_answer(response).await;
        assert_eq!(inner.answer, "Mock response to: ...");
        assert!(inner.commands.is_empty());
    }

    server.shutdown().await;
}

#[tokio::test]
async fn malformed_body_answers_500_with_error_envelope() {
    let mut server = start_llm().await;

    let response = client()
        .post(format!("{}/chat/completions", server.base_url()))
        .body("{not json")
        .send()
        .await
        .expect("request sends");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("error envelope parses");
    assert!(body["error"].is_string());

    server.shutdown().await;
}

#[tokio::test]
async fn models_and_v1_models_return_identical_bodies() {
    let mut server = start_llm().await;

    let (status_a, body_a) = get_text(&server.base_url(), "/models").await;
    let (status_b, body_b) = get_text(&server.base_url(), "/v1/models").await;

    assert_eq!(status_a, 200);
    assert_eq!(status_b, 200);
    assert_eq!(body_a, body_b);

    let parsed: serde_json::Value = serde_json::from_str(&body_a).expect("model list parses");
    assert_eq!(parsed["object"], "list");
    assert_eq!(parsed["data"][0]["id"], "test-model");
    assert_eq!(parsed["data"][1]["id"], "mock-model");
    assert_eq!(parsed["data"][0]["object"], "model");

    server.shutdown().await;
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let mut server = start_llm().await;

    let body = serde_json::json!({
        "model": "m",
        "input": [{}, {"content": "anything deterministic"}],
    });

    let first = complete(&server.base_url(), body.clone())
        .await
        .bytes()
        .await
        .expect("body reads");
    let second = complete(&server.base_url(), body)
        .await
        .bytes()
        .await
        .expect("body reads");

    assert_eq!(first, second);

    server.shutdown().await;
}

#[tokio::test]
async fn unknown_paths_answer_404() {
    let mut server = start_llm().await;

    let (status, body) = get_text(&server.base_url(), "/unknown-path").await;
    assert_eq!(status, 404);
    assert!(body.is_empty());

    let response = client()
        .post(format!("{}/models", server.base_url()))
        .send()
        .await
        .expect("request sends");
    assert_eq!(response.status().as_u16(), 404);

    server.shutdown().await;
}
