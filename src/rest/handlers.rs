use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{
    error::ApiError,
    models::{ChatRequest, CreatePostRequest, ErrorResponse, HealthResponse, SummaryFallback},
    AppState,
};
use crate::types::{ChatResponse, ForumPost, ForumThreadResponse};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            region: state.region.clone(),
            uptime_secs,
        }),
    )
}

pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.fetch_dashboard().await)
}

pub async fn get_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.fetch_snapshot().await)
}

pub async fn get_stories(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.fetch_dashboard().await.stories)
}

pub async fn get_policies(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.fetch_dashboard().await.policies)
}

pub async fn get_discussions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.fetch_dashboard().await.discussions)
}

pub async fn get_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.fetch_dashboard().await.events)
}

pub async fn get_elections(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.fetch_dashboard().await.elections)
}

pub async fn post_ai_summary(State(state): State<AppState>) -> impl IntoResponse {
    match state.dashboard.fetch_ai_summary().await {
        Some(summary) => Json(summary).into_response(),
        None => Json(SummaryFallback {
            message: "AI summary unavailable".to_string(),
            status: "fallback".to_string(),
        })
        .into_response(),
    }
}

pub async fn get_service_alerts(State(state): State<AppState>) -> impl IntoResponse {
    let today = chrono::Local::now().date_naive();
    Json(state.dashboard.fetch_service_alerts(today).await)
}

pub async fn list_threads(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.forum.fetch_forum_threads().await)
}

pub async fn get_thread(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ForumThreadResponse>, ApiError> {
    state
        .forum
        .fetch_thread_detail(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("thread {} not found", id)))
}

pub async fn create_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ForumPost>), ApiError> {
    let Json(request) = body?;
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ApiError::BadRequest("content must not be empty".to_string()));
    }
    let author = request
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty());

    let post = state
        .forum
        .create_post(&id, content, author, request.parent_post_id)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = body?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    Ok(Json(state.chat.answer(message).await))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}
