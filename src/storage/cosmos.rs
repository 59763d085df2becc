//! Cosmos DB document store over the REST API.
//!
//! Requests are signed with the account master key as the REST API expects:
//! an HMAC-SHA256 over the verb, resource type, resource link and request
//! date, base64 encoded and URL-encoded into the `authorization` header.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;

use super::traits::{DocumentStore, StorageError, DASHBOARD_DOC_TYPE};
use crate::clients::REQUEST_TIMEOUT;
use crate::configuration::CosmosSettings;

const API_VERSION: &str = "2018-12-31";
const LATEST_PAYLOAD_QUERY: &str =
    "SELECT TOP 1 c.payload FROM c WHERE c.type = @type ORDER BY c._ts DESC";

#[derive(Deserialize)]
struct QueryPage {
    #[serde(rename = "Documents", default)]
    documents: Vec<Value>,
}

pub struct CosmosStore {
    http: reqwest::Client,
    endpoint: String,
    master_key: Vec<u8>,
    database: String,
    container: String,
}

impl CosmosStore {
    /// Returns `Ok(None)` when the endpoint or key is missing.
    pub fn from_settings(settings: &CosmosSettings) -> Result<Option<Self>, StorageError> {
        let (Some(endpoint), Some(key)) = (&settings.endpoint, &settings.key) else {
            return Ok(None);
        };
        let master_key = BASE64
            .decode(key.as_bytes())
            .map_err(|err| StorageError::Credentials(format!("master key is not base64: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Some(Self {
            http,
            endpoint: endpoint.clone(),
            master_key,
            database: settings.database.clone(),
            container: settings.container.clone(),
        }))
    }

    fn collection_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }
}

/// Builds the URL-encoded master-key `authorization` header value.
fn authorization_token(
    master_key: &[u8],
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> Result<String, StorageError> {
    let payload = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase()
    );
    let mut mac = Hmac::<Sha256>::new_from_slice(master_key)
        .map_err(|err| StorageError::Credentials(err.to_string()))?;
    mac.update(payload.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    let token = format!("type=master&ver=1.0&sig={}", signature);
    Ok(url::form_urlencoded::byte_serialize(token.as_bytes()).collect())
}

fn rfc1123_now() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

#[async_trait]
impl DocumentStore for CosmosStore {
    async fn latest_dashboard_payload(&self) -> Result<Option<Value>, StorageError> {
        let link = self.collection_link();
        let date = rfc1123_now();
        let auth = authorization_token(&self.master_key, "POST", "docs", &link, &date)?;
        let body = json!({
            "query": LATEST_PAYLOAD_QUERY,
            "parameters": [{"name": "@type", "value": DASHBOARD_DOC_TYPE}],
        });

        let resp = self
            .http
            .post(format!("{}/{}/docs", self.endpoint, link))
            .header(reqwest::header::AUTHORIZATION, auth)
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-documentdb-isquery", "True")
            .header(
                "x-ms-documentdb-partitionkey",
                json!([DASHBOARD_DOC_TYPE]).to_string(),
            )
            .header(reqwest::header::CONTENT_TYPE, "application/query+json")
            .body(body.to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Status { status, body });
        }

        let page: QueryPage = resp.json().await?;
        Ok(page
            .documents
            .into_iter()
            .next()
            .and_then(|mut doc| doc.get_mut("payload").map(Value::take))
            .filter(|payload| !payload.is_null()))
    }
}
