use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{ensure_success, http_client, ClientError, EventFeed};
use crate::configuration::FeedSettings;
use crate::types::{parse_timestamp, Event};

pub(crate) const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Deserialize)]
struct CalendarPage {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct CalendarItem {
    id: Option<Value>,
    guid: Option<Value>,
    name: Option<String>,
    categories: Option<String>,
    location: Option<String>,
    address: Option<String>,
    desc: Option<String>,
    short_desc: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    image_url: Option<String>,
    website: Option<String>,
}

/// Client for the city's public event calendar.
pub struct CalendarClient {
    http: reqwest::Client,
    base_url: String,
    key: Option<String>,
}

impl CalendarClient {
    pub fn new(settings: &FeedSettings) -> Result<Self, ClientError> {
        Ok(Self {
            http: http_client()?,
            base_url: settings.base_url.clone(),
            key: settings.key.clone(),
        })
    }

    pub async fn try_fetch(&self) -> Result<Vec<Event>, ClientError> {
        let key = self
            .key
            .as_deref()
            .ok_or(ClientError::NotConfigured("event calendar"))?;
        let resp = self
            .http
            .get(&self.base_url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .send()
            .await?;
        let page: CalendarPage = ensure_success(resp).await?.json().await?;

        let total = page.items.len();
        let events: Vec<Event> = page
            .items
            .into_iter()
            .filter_map(|raw| serde_json::from_value::<CalendarItem>(raw).ok())
            .filter_map(map_item)
            .collect();
        if events.len() < total {
            log::debug!(
                "Skipped {} calendar items without usable fields",
                total - events.len()
            );
        }
        Ok(events)
    }
}

#[async_trait]
impl EventFeed for CalendarClient {
    async fn fetch_events(&self) -> Option<Vec<Event>> {
        match self.try_fetch().await {
            Ok(events) => Some(events),
            Err(ClientError::NotConfigured(_)) => None,
            Err(err) => {
                log::warn!("Event calendar unavailable: {}", err);
                None
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn id_text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// The feed lists a price tag first ("Free,Parks & Recreation,..."), so the
/// second token is the descriptive one.
fn pick_category(categories: Option<&str>) -> String {
    let tokens: Vec<&str> = categories
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    match tokens.as_slice() {
        [] => "General".to_string(),
        [only] => only.to_string(),
        [_, descriptive, ..] => descriptive.to_string(),
    }
}

fn strip_tags(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
    tag.replace_all(text, "").trim().to_string()
}

/// Feed timestamps come either with an offset or as naive local strings.
fn map_item(item: CalendarItem) -> Option<Event> {
    let start_time = present(&item.start_date).and_then(parse_timestamp)?;
    let end_time = present(&item.end_date).and_then(parse_timestamp)?;

    let description = present(&item.desc)
        .or(present(&item.short_desc))
        .map(strip_tags);

    Some(Event {
        id: id_text(&item.id).or_else(|| id_text(&item.guid)).unwrap_or_default(),
        name: item.name.clone().unwrap_or_default(),
        venue: present(&item.location)
            .or(present(&item.address))
            .unwrap_or_default()
            .to_string(),
        start_time,
        end_time,
        category: pick_category(item.categories.as_deref()),
        image_url: present(&item.image_url).map(ToString::to_string),
        description,
        website_url: present(&item.website).map(ToString::to_string),
        address: present(&item.address).map(ToString::to_string),
    })
}
