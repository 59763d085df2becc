use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use super::calendar::SUBSCRIPTION_KEY_HEADER;
use super::{ensure_success, http_client, AlertFeed, ClientError};
use crate::configuration::FeedSettings;
use crate::types::ServiceAlertsResponse;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the city's service alert calendar (parking, sanitation, schools).
pub struct AlertsClient {
    http: reqwest::Client,
    base_url: String,
    key: Option<String>,
}

impl AlertsClient {
    pub fn new(settings: &FeedSettings) -> Result<Self, ClientError> {
        Ok(Self {
            http: http_client()?,
            base_url: settings.base_url.clone(),
            key: settings.key.clone(),
        })
    }

    pub async fn try_fetch(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ServiceAlertsResponse, ClientError> {
        let key = self
            .key
            .as_deref()
            .ok_or(ClientError::NotConfigured("service alerts"))?;
        let fromdate = from.format(DATE_FORMAT).to_string();
        let todate = to.format(DATE_FORMAT).to_string();

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("fromdate", fromdate.as_str()), ("todate", todate.as_str())])
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .send()
            .await?;
        let body: Value = ensure_success(resp).await?.json().await?;

        if body.get("days").is_none() {
            return Err(ClientError::Decode("response has no `days`".to_string()));
        }
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl AlertFeed for AlertsClient {
    async fn fetch_alerts(&self, from: NaiveDate, to: NaiveDate) -> Option<ServiceAlertsResponse> {
        match self.try_fetch(from, to).await {
            Ok(alerts) => Some(alerts),
            Err(ClientError::NotConfigured(_)) => None,
            Err(err) => {
                log::warn!("Service alerts unavailable: {}", err);
                None
            }
        }
    }
}
