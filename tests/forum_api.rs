mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use civic_sphere::storage::NoStore;
use civic_sphere::types::{ForumPost, ForumResponse, ForumThreadResponse};
use common::{app, call, Upstream};

#[tokio::test]
async fn lists_one_thread_per_discussion() {
    let app = app(Arc::new(NoStore), Arc::new(Upstream::default()));

    let (status, body) = call(&app, Method::GET, "/forum/threads", None).await;
    assert_eq!(status, StatusCode::OK);
    let forum: ForumResponse = serde_json::from_value(body).unwrap();

    assert_eq!(forum.threads.len(), 6);
    assert!(forum
        .threads
        .windows(2)
        .all(|w| w[0].last_activity >= w[1].last_activity));
    for thread in &forum.threads {
        assert_eq!(thread.id, format!("thread-{}", thread.topic_id));
        assert!(thread.post_count >= 6);
    }
}

#[tokio::test]
async fn thread_detail_includes_moderator_posts() {
    let app = app(Arc::new(NoStore), Arc::new(Upstream::default()));

    let (status, body) = call(&app, Method::GET, "/forum/threads/thread-disc-4", None).await;
    assert_eq!(status, StatusCode::OK);
    let detail: ForumThreadResponse = serde_json::from_value(body).unwrap();

    assert_eq!(detail.thread.title, "Subway line extension to Queens");
    assert_eq!(detail.thread.post_count, detail.posts.len());
    assert!(detail.posts.iter().any(|p| p.is_ai_moderator && p.author == "AI Moderator"));
    assert!(detail.posts[0].content.contains("subway line extension to queens"));
}

#[tokio::test]
async fn created_posts_survive_later_listings() {
    let app = app(Arc::new(NoStore), Arc::new(Upstream::default()));

    let (_, before) = call(&app, Method::GET, "/forum/threads/thread-disc-5", None).await;
    let before: ForumThreadResponse = serde_json::from_value(before).unwrap();

    let (status, body) = call(
        &app,
        Method::POST,
        "/forum/threads/thread-disc-5/posts",
        Some(json!({
            "content": "Pricing should fund more express buses.",
            "author": "Dana",
            "parent_post_id": before.posts[0].id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let post: ForumPost = serde_json::from_value(body).unwrap();
    assert_eq!(post.author, "Dana");
    assert_eq!(post.parent_post_id.as_deref(), Some(before.posts[0].id.as_str()));

    let (_, listing) = call(&app, Method::GET, "/forum/threads", None).await;
    let listing: ForumResponse = serde_json::from_value(listing).unwrap();
    let thread = listing
        .threads
        .iter()
        .find(|t| t.id == "thread-disc-5")
        .unwrap();
    assert_eq!(thread.post_count, before.posts.len() + 1);
    assert_eq!(listing.threads[0].id, "thread-disc-5");

    let (_, after) = call(&app, Method::GET, "/forum/threads/thread-disc-5", None).await;
    let after: ForumThreadResponse = serde_json::from_value(after).unwrap();
    assert_eq!(after.posts.last(), Some(&post));
}

#[tokio::test]
async fn rejects_bad_posts() {
    let app = app(Arc::new(NoStore), Arc::new(Upstream::default()));

    let (status, body) = call(
        &app,
        Method::POST,
        "/forum/threads/thread-disc-1/posts",
        Some(json!({"content": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "content must not be empty");

    let (status, body) = call(
        &app,
        Method::POST,
        "/forum/threads/thread-disc-42/posts",
        Some(json!({"content": "Anyone here?"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "thread thread-disc-42 not found");
}
