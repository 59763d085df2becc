mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use civic_sphere::chat::{GENERATION_FAILED_MESSAGE, NO_RESULTS_MESSAGE};
use civic_sphere::storage::NoStore;
use civic_sphere::types::ChatResponse;
use common::{app, call, Upstream};

fn hits() -> Vec<civic_sphere::clients::SearchHit> {
    [
        json!({
            "title": "Composting in NYC",
            "content": "Curbside composting is available in all five boroughs.",
            "url": "https://nyc.gov/compost",
            "reranker_score": 3.1,
            "score": 12.4,
        }),
        json!({"text": "Leaf and yard waste is collected weekly.", "score": 8.0}),
    ]
    .into_iter()
    .filter_map(|v| v.as_object().cloned())
    .collect()
}

#[tokio::test]
async fn answers_with_cited_sources() {
    let upstream = Arc::new(Upstream {
        hits: hits(),
        answer: Some("Yes, curbside composting is citywide.".to_string()),
        ..Upstream::default()
    });
    let app = app(Arc::new(NoStore), upstream.clone());

    let (status, body) = call(
        &app,
        Method::POST,
        "/chat",
        Some(json!({"message": "  Can I compost at the curb?  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reply: ChatResponse = serde_json::from_value(body).unwrap();

    assert_eq!(reply.response, "Yes, curbside composting is citywide.");
    assert_eq!(reply.sources.len(), 2);
    assert_eq!(reply.sources[0].title, "Composting in NYC");
    assert_eq!(reply.sources[0].score, Some(3.1));
    assert_eq!(reply.sources[1].title, "Document 2");
    assert_eq!(reply.sources[1].url, None);
    assert_eq!(
        *upstream.questions.lock().unwrap(),
        vec!["Can I compost at the curb?".to_string()]
    );
}

#[tokio::test]
async fn model_outage_still_returns_sources() {
    let upstream = Upstream {
        hits: hits(),
        ..Upstream::default()
    };
    let app = app(Arc::new(NoStore), Arc::new(upstream));

    let (status, body) = call(&app, Method::POST, "/chat", Some(json!({"message": "compost?"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], GENERATION_FAILED_MESSAGE);
    assert_eq!(body["sources"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_index_gives_no_results_message() {
    let app = app(Arc::new(NoStore), Arc::new(Upstream::default()));

    let (status, body) = call(&app, Method::POST, "/chat", Some(json!({"message": "compost?"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], NO_RESULTS_MESSAGE);
    assert_eq!(body["sources"], json!([]));
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let app = app(Arc::new(NoStore), Arc::new(Upstream::default()));

    let (status, body) = call(&app, Method::POST, "/chat", Some(json!({"message": " \n "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "message must not be empty");
}
