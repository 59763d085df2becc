use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::timestamp::deserialize_utc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: i64,
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySnapshot {
    pub greeting: String,
    pub subheading: String,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    #[serde(default)]
    pub image_url: Option<Url>,
    #[serde(deserialize_with = "deserialize_utc")]
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub title: String,
    pub status: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: String,
    pub topic: String,
    pub category: String,
    pub sentiment: String,
    pub replies_count: i64,
    pub last_active_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub venue: String,
    #[serde(deserialize_with = "deserialize_utc")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_utc")]
    pub end_time: DateTime<Utc>,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: String,
    pub title: String,
    pub description: String,
    pub stance: String,
    pub votes: i64,
}

/// Everything the dashboard page renders in one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub snapshot: CommunitySnapshot,
    pub stories: Vec<Story>,
    pub policies: Vec<Policy>,
    pub discussions: Vec<Discussion>,
    pub events: Vec<Event>,
    pub elections: Vec<Election>,
}
