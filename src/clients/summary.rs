use async_trait::async_trait;
use serde_json::Value;

use super::{ensure_success, http_client, ClientError, SummaryService};
use crate::configuration::SummarySettings;

const SUMMARY_PATH: &str = "/api/generate-dashboard-summary";

/// Calls the serverless function that writes the dashboard's AI summary.
pub struct SummaryClient {
    http: reqwest::Client,
    base_url: Option<String>,
    function_key: Option<String>,
}

impl SummaryClient {
    pub fn new(settings: &SummarySettings) -> Result<Self, ClientError> {
        Ok(Self {
            http: http_client()?,
            base_url: settings.base_url.clone(),
            function_key: settings.function_key.clone(),
        })
    }

    pub async fn try_invoke(&self, payload: &Value) -> Result<Value, ClientError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(ClientError::NotConfigured("summary function"))?;

        let mut req = self
            .http
            .post(format!("{}{}", base_url, SUMMARY_PATH))
            .json(payload);
        if let Some(key) = &self.function_key {
            req = req.header("x-functions-key", key);
        }
        let resp = ensure_success(req.send().await?).await?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl SummaryService for SummaryClient {
    async fn invoke_ai_suggestions(&self, payload: &Value) -> Option<Value> {
        match self.try_invoke(payload).await {
            Ok(summary) => Some(summary),
            Err(ClientError::NotConfigured(_)) => None,
            Err(err) => {
                log::warn!("AI summary function failed: {}", err);
                None
            }
        }
    }
}
