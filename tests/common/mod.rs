#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use civic_sphere::chat::ChatService;
use civic_sphere::clients::{AlertFeed, ChatModel, EventFeed, SearchHit, SearchIndex, SummaryService};
use civic_sphere::repo::{DashboardRepository, ForumRepository};
use civic_sphere::rest::{router, AppState};
use civic_sphere::storage::DocumentStore;
use civic_sphere::types::{Event, ServiceAlertsResponse};

/// Scriptable stand-in for every upstream service.
#[derive(Default)]
pub struct Upstream {
    pub summary: Option<Value>,
    pub events: Option<Vec<Event>>,
    pub alerts: Option<ServiceAlertsResponse>,
    pub hits: Vec<SearchHit>,
    pub answer: Option<String>,
    pub questions: Mutex<Vec<String>>,
}

#[async_trait]
impl SummaryService for Upstream {
    async fn invoke_ai_suggestions(&self, _payload: &Value) -> Option<Value> {
        self.summary.clone()
    }
}

#[async_trait]
impl EventFeed for Upstream {
    async fn fetch_events(&self) -> Option<Vec<Event>> {
        self.events.clone()
    }
}

#[async_trait]
impl AlertFeed for Upstream {
    async fn fetch_alerts(&self, _from: NaiveDate, _to: NaiveDate) -> Option<ServiceAlertsResponse> {
        self.alerts.clone()
    }
}

#[async_trait]
impl SearchIndex for Upstream {
    async fn search(&self, query: &str, _top: usize) -> Vec<SearchHit> {
        self.questions.lock().unwrap().push(query.to_string());
        self.hits.clone()
    }
}

#[async_trait]
impl ChatModel for Upstream {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Option<String> {
        self.answer.clone()
    }
}

pub fn app(store: Arc<dyn DocumentStore>, upstream: Arc<Upstream>) -> Router {
    let dashboard = Arc::new(DashboardRepository::new(
        store,
        upstream.clone(),
        upstream.clone(),
        upstream.clone(),
    ));
    let chat = ChatService::new(upstream.clone(), upstream);
    router(AppState {
        forum: Arc::new(ForumRepository::new(dashboard.clone())),
        dashboard,
        chat: Arc::new(chat),
        region: "eastus".to_string(),
        started_at: SystemTime::now(),
    })
}

pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
