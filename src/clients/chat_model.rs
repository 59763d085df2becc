use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ensure_success, http_client, ChatModel, ClientError};
use crate::configuration::ChatModelSettings;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1000;

struct Deployment {
    endpoint: String,
    key: String,
    name: String,
    api_version: String,
}

#[derive(Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client for a hosted model deployment.
pub struct ChatModelClient {
    http: reqwest::Client,
    deployment: Option<Deployment>,
}

impl ChatModelClient {
    pub fn new(settings: &ChatModelSettings) -> Result<Self, ClientError> {
        let deployment = match (&settings.endpoint, &settings.key, &settings.deployment) {
            (Some(endpoint), Some(key), Some(name)) => {
                log::info!("🤖 Chat model: endpoint={}, deployment={}", endpoint, name);
                Some(Deployment {
                    endpoint: endpoint.clone(),
                    key: key.clone(),
                    name: name.clone(),
                    api_version: settings.api_version.clone(),
                })
            }
            (endpoint, key, name) => {
                let missing: Vec<&str> = [
                    ("endpoint", endpoint.is_none()),
                    ("key", key.is_none()),
                    ("deployment", name.is_none()),
                ]
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(field, _)| *field)
                .collect();
                log::warn!("Chat model disabled. Missing: {}", missing.join(", "));
                None
            }
        };
        Ok(Self {
            http: http_client()?,
            deployment,
        })
    }

    pub async fn try_complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Option<String>, ClientError> {
        let deployment = self
            .deployment
            .as_ref()
            .ok_or(ClientError::NotConfigured("chat model"))?;

        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            deployment.endpoint, deployment.name
        );
        let body = json!({
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });
        let resp = self
            .http
            .post(url)
            .query(&[("api-version", deployment.api_version.as_str())])
            .header("api-key", &deployment.key)
            .json(&body)
            .send()
            .await?;
        let completion: Completion = ensure_success(resp).await?.json().await?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[async_trait]
impl ChatModel for ChatModelClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Option<String> {
        match self.try_complete(system_prompt, user_prompt).await {
            Ok(Some(text)) => {
                log::info!("Chat model answered ({} characters)", text.len());
                Some(text)
            }
            Ok(None) => {
                log::warn!("Chat model returned no choices");
                None
            }
            Err(ClientError::NotConfigured(_)) => {
                log::warn!("Chat completion requested but the model is not configured");
                None
            }
            Err(err) => {
                log::error!("Chat completion failed: {}", err);
                None
            }
        }
    }
}
