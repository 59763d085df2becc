use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub thread_id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_ai_moderator: bool,
    #[serde(default)]
    pub parent_post_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: String,
    /// Id of the dashboard discussion this thread was derived from.
    pub topic_id: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub post_count: usize,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumThreadResponse {
    pub thread: ForumThread,
    pub posts: Vec<ForumPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumResponse {
    pub threads: Vec<ForumThread>,
}
