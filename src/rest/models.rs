use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub region: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Returned by `POST /dashboard/ai-summary` when no summary could be produced.
#[derive(Serialize, Deserialize)]
pub struct SummaryFallback {
    pub message: String,
    pub status: String,
}

#[derive(Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub parent_post_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}
