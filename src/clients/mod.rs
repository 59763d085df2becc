//! HTTP clients for the services the dashboard aggregates.
//!
//! Every client degrades to an empty or absent result when it is not
//! configured or when the upstream fails. Nothing here is retried.

mod alerts;
mod calendar;
mod chat_model;
mod error;
mod search;
mod summary;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::types::{Event, ServiceAlertsResponse};

pub use alerts::AlertsClient;
pub use calendar::CalendarClient;
pub use chat_model::ChatModelClient;
pub use error::ClientError;
pub use search::SearchClient;
pub use summary::SummaryClient;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A raw search index document with its scores folded in.
pub type SearchHit = Map<String, Value>;

#[async_trait]
pub trait SummaryService: Send + Sync {
    async fn invoke_ai_suggestions(&self, payload: &Value) -> Option<Value>;
}

#[async_trait]
pub trait EventFeed: Send + Sync {
    /// `None` means the feed is unavailable and the caller keeps its own events.
    async fn fetch_events(&self) -> Option<Vec<Event>>;
}

#[async_trait]
pub trait AlertFeed: Send + Sync {
    async fn fetch_alerts(&self, from: NaiveDate, to: NaiveDate) -> Option<ServiceAlertsResponse>;
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn search(&self, query: &str, top: usize) -> Vec<SearchHit>;
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Option<String>;
}

pub(crate) fn http_client() -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

pub(crate) async fn ensure_success(
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::net::SocketAddr;

    use axum::Router;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    pub async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
