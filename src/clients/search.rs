use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ensure_success, http_client, ClientError, SearchHit, SearchIndex};
use crate::configuration::SearchSettings;

struct SearchTarget {
    endpoint: String,
    key: String,
    index_name: String,
    api_version: String,
    semantic_config: String,
}

/// Query flavours, tried in declaration order until one yields hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueryMode {
    Semantic,
    Hybrid,
    Simple,
}

impl QueryMode {
    const CASCADE: [QueryMode; 3] = [QueryMode::Semantic, QueryMode::Hybrid, QueryMode::Simple];

    fn label(self) -> &'static str {
        match self {
            QueryMode::Semantic => "semantic",
            QueryMode::Hybrid => "hybrid",
            QueryMode::Simple => "simple",
        }
    }

    fn body(self, query: &str, top: usize, semantic_config: &str) -> Value {
        let mut body = json!({
            "search": query,
            "top": top,
            "count": true,
        });
        match self {
            QueryMode::Semantic => {
                body["queryType"] = json!("semantic");
                body["semanticConfiguration"] = json!(semantic_config);
                body["captions"] = json!("extractive");
                body["answers"] = json!("extractive");
            }
            QueryMode::Hybrid => {
                body["queryType"] = json!("semantic");
                body["semanticConfiguration"] = json!(semantic_config);
            }
            QueryMode::Simple => {}
        }
        body
    }
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    value: Vec<Value>,
}

pub struct SearchClient {
    http: reqwest::Client,
    target: Option<SearchTarget>,
}

impl SearchClient {
    pub fn new(settings: &SearchSettings) -> Result<Self, ClientError> {
        let target = match (&settings.endpoint, &settings.key, &settings.index_name) {
            (Some(endpoint), Some(key), Some(index_name)) => {
                log::info!(
                    "🔎 Search index: endpoint={}, index={}, semantic_config={}",
                    endpoint,
                    index_name,
                    settings.semantic_config
                );
                Some(SearchTarget {
                    endpoint: endpoint.clone(),
                    key: key.clone(),
                    index_name: index_name.clone(),
                    api_version: settings.api_version.clone(),
                    semantic_config: settings.semantic_config.clone(),
                })
            }
            (endpoint, key, index_name) => {
                let missing: Vec<&str> = [
                    ("endpoint", endpoint.is_none()),
                    ("key", key.is_none()),
                    ("index_name", index_name.is_none()),
                ]
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| *name)
                .collect();
                log::warn!("Search index disabled. Missing: {}", missing.join(", "));
                None
            }
        };
        Ok(Self {
            http: http_client()?,
            target,
        })
    }

    async fn run_query(
        &self,
        target: &SearchTarget,
        mode: QueryMode,
        query: &str,
        top: usize,
    ) -> Result<Vec<SearchHit>, ClientError> {
        let url = format!(
            "{}/indexes/{}/docs/search",
            target.endpoint, target.index_name
        );
        let resp = self
            .http
            .post(url)
            .query(&[("api-version", target.api_version.as_str())])
            .header("api-key", &target.key)
            .json(&mode.body(query, top, &target.semantic_config))
            .send()
            .await?;
        let page: SearchPage = ensure_success(resp).await?.json().await?;
        Ok(process_hits(page.value))
    }
}

/// Copies each document and exposes its relevance scores under plain keys.
fn process_hits(docs: Vec<Value>) -> Vec<SearchHit> {
    let hits: Vec<SearchHit> = docs
        .into_iter()
        .filter_map(|doc| match doc {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .map(|mut hit| {
            for (raw, plain) in [
                ("@search.score", "score"),
                ("@search.rerankerScore", "reranker_score"),
                ("@search.semanticScore", "semantic_score"),
            ] {
                if let Some(score) = hit.get(raw).cloned() {
                    hit.insert(plain.to_string(), score);
                }
            }
            hit
        })
        .collect();

    if let Some(first) = hits.first() {
        log::debug!(
            "First result fields: {:?}",
            first.keys().collect::<Vec<_>>()
        );
    }
    hits
}

#[async_trait]
impl SearchIndex for SearchClient {
    async fn search(&self, query: &str, top: usize) -> Vec<SearchHit> {
        let Some(target) = &self.target else {
            log::warn!("Search called but the index is not configured");
            return Vec::new();
        };

        log::info!(
            "Searching index '{}' for '{}' (top={})",
            target.index_name,
            query,
            top
        );
        for mode in QueryMode::CASCADE {
            match self.run_query(target, mode, query, top).await {
                Ok(hits) if !hits.is_empty() => {
                    log::info!("{} search returned {} results", mode.label(), hits.len());
                    return hits;
                }
                Ok(_) => log::debug!("{} search returned no results", mode.label()),
                Err(err) => log::warn!("{} search failed: {}", mode.label(), err),
            }
        }

        log::error!("All search modes failed or returned nothing");
        Vec::new()
    }
}
