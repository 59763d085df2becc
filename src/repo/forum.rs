use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::dashboard::DashboardRepository;
use super::mock_posts::{generate_mock_posts, thread_summary};
use crate::types::{Discussion, ForumPost, ForumResponse, ForumThread, ForumThreadResponse};

pub const DEFAULT_POST_AUTHOR: &str = "Current User";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForumError {
    #[error("thread {0} not found")]
    ThreadNotFound(String),
}

/// Forum threads derived from dashboard discussions.
///
/// Threads live in memory for the lifetime of the process. Once a thread has
/// been generated it is reused, so posts created through [`create_post`]
/// stay visible.
///
/// [`create_post`]: ForumRepository::create_post
pub struct ForumRepository {
    dashboard: Arc<DashboardRepository>,
    threads: Mutex<HashMap<String, ForumThreadResponse>>,
    rng: Mutex<StdRng>,
}

fn thread_id_for(discussion: &Discussion) -> String {
    format!("thread-{}", discussion.id)
}

impl ForumRepository {
    pub fn new(dashboard: Arc<DashboardRepository>) -> Self {
        Self::with_rng(dashboard, StdRng::from_entropy())
    }

    pub fn with_rng(dashboard: Arc<DashboardRepository>, rng: StdRng) -> Self {
        Self {
            dashboard,
            threads: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    fn threads(&self) -> MutexGuard<'_, HashMap<String, ForumThreadResponse>> {
        self.threads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generate_thread(&self, discussion: &Discussion) -> ForumThreadResponse {
        let thread_id = thread_id_for(discussion);
        let now = Utc::now();
        let posts = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            generate_mock_posts(
                &thread_id,
                &discussion.topic,
                &discussion.category,
                now,
                &mut *rng,
            )
        };

        let last_activity = posts.iter().map(|p| p.created_at).max().unwrap_or(now);
        let (created_at, author) = posts
            .first()
            .map(|p| (p.created_at, p.author.clone()))
            .unwrap_or((now, "Community Member".to_string()));

        let thread = ForumThread {
            id: thread_id,
            topic_id: discussion.id.clone(),
            title: discussion.topic.clone(),
            category: discussion.category.clone(),
            summary: thread_summary(&discussion.topic, &posts),
            created_at,
            author,
            post_count: posts.len(),
            last_activity,
        };
        ForumThreadResponse { thread, posts }
    }

    /// One thread per current dashboard discussion, most recently active first.
    pub async fn fetch_forum_threads(&self) -> ForumResponse {
        let dashboard = self.dashboard.fetch_dashboard().await;

        let mut cache = self.threads();
        let mut threads = Vec::with_capacity(dashboard.discussions.len());
        for discussion in &dashboard.discussions {
            let id = thread_id_for(discussion);
            if !cache.contains_key(&id) {
                log::debug!("Generating forum thread {}", id);
                let generated = self.generate_thread(discussion);
                cache.insert(id.clone(), generated);
            }
            if let Some(entry) = cache.get(&id) {
                threads.push(entry.thread.clone());
            }
        }
        drop(cache);

        threads.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        ForumResponse { threads }
    }

    pub async fn fetch_thread_detail(&self, thread_id: &str) -> Option<ForumThreadResponse> {
        let cached = self.threads().get(thread_id).cloned();
        if cached.is_some() {
            return cached;
        }
        self.fetch_forum_threads().await;
        self.threads().get(thread_id).cloned()
    }

    pub async fn create_post(
        &self,
        thread_id: &str,
        content: &str,
        author: Option<&str>,
        parent_post_id: Option<String>,
    ) -> Result<ForumPost, ForumError> {
        if self.fetch_thread_detail(thread_id).await.is_none() {
            return Err(ForumError::ThreadNotFound(thread_id.to_string()));
        }

        let mut cache = self.threads();
        let entry = cache
            .get_mut(thread_id)
            .ok_or_else(|| ForumError::ThreadNotFound(thread_id.to_string()))?;

        let now = Utc::now();
        let post = ForumPost {
            id: format!("post-{}-{}", thread_id, entry.posts.len() + 1),
            thread_id: thread_id.to_string(),
            author: author.unwrap_or(DEFAULT_POST_AUTHOR).to_string(),
            content: content.to_string(),
            created_at: now,
            is_ai_moderator: false,
            parent_post_id,
        };

        entry.posts.push(post.clone());
        entry.thread.post_count = entry.posts.len();
        entry.thread.last_activity = now;
        log::info!("New post {} in {}", post.id, thread_id);
        Ok(post)
    }
}
