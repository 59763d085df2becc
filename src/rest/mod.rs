use std::net::SocketAddr;
use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::ChatService;
use crate::repo::{DashboardRepository, ForumRepository};

mod error;
mod handlers;
pub mod models;

pub use error::ApiError;

use handlers::{
    chat, create_post, get_dashboard, get_discussions, get_elections, get_events, get_policies,
    get_service_alerts, get_snapshot, get_stories, get_thread, health, list_threads, not_found,
    post_ai_summary,
};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardRepository>,
    pub forum: Arc<ForumRepository>,
    pub chat: Arc<ChatService>,
    pub region: String,
    pub started_at: SystemTime,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/snapshot", get(get_snapshot))
        .route("/dashboard/stories", get(get_stories))
        .route("/dashboard/policies", get(get_policies))
        .route("/dashboard/discussions", get(get_discussions))
        .route("/dashboard/events", get(get_events))
        .route("/dashboard/elections", get(get_elections))
        .route("/dashboard/ai-summary", post(post_ai_summary))
        .route("/dashboard/service-alerts", get(get_service_alerts))
        .route("/forum/threads", get(list_threads))
        .route("/forum/threads/:id", get(get_thread))
        .route("/forum/threads/:id/posts", post(create_post))
        .route("/chat", post(chat))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
