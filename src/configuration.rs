use std::net::SocketAddr;

#[derive(Clone, Debug, Default)]
pub struct CosmosSettings {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub database: String,
    pub container: String,
}

#[derive(Clone, Debug, Default)]
pub struct SummarySettings {
    pub base_url: Option<String>,
    pub function_key: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SearchSettings {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub index_name: Option<String>,
    pub api_version: String,
    pub semantic_config: String,
}

#[derive(Clone, Debug, Default)]
pub struct ChatModelSettings {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub deployment: Option<String>,
    pub api_version: String,
}

/// Shared by the city event calendar and the service alerts feed.
#[derive(Clone, Debug, Default)]
pub struct FeedSettings {
    pub base_url: String,
    pub key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Configuration {
    pub api_listen: SocketAddr,
    pub region: String,
    pub log_file: Option<String>,
    pub store_path: Option<String>,
    pub cosmos: CosmosSettings,
    pub summary: SummarySettings,
    pub search: SearchSettings,
    pub chat_model: ChatModelSettings,
    pub calendar: FeedSettings,
    pub alerts: FeedSettings,
}

/// Treats blank values (e.g. `KEY=` in a `.env` file) as unset.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Like [`non_empty`], with trailing slashes removed so paths can be appended.
pub fn base_url(value: Option<&str>) -> Option<String> {
    non_empty(value).map(|v| v.trim_end_matches('/').to_string())
}
