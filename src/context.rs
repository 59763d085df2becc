use crate::configuration::{
    base_url, non_empty, ChatModelSettings, Configuration, CosmosSettings, FeedSettings,
    SearchSettings, SummarySettings,
};

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let cfg = Configuration {
            api_listen: cli.api_listen,
            region: cli.region.clone(),
            log_file: non_empty(cli.log_file.as_deref()),
            store_path: non_empty(cli.store_path.as_deref()),
            cosmos: CosmosSettings {
                endpoint: base_url(cli.cosmos_endpoint.as_deref()),
                key: non_empty(cli.cosmos_key.as_deref()),
                database: cli.cosmos_database.clone(),
                container: cli.cosmos_container.clone(),
            },
            summary: SummarySettings {
                base_url: base_url(cli.functions_base_url.as_deref()),
                function_key: non_empty(cli.function_key.as_deref()),
            },
            search: SearchSettings {
                endpoint: base_url(cli.search_endpoint.as_deref()),
                key: non_empty(cli.search_key.as_deref()),
                index_name: non_empty(cli.search_index.as_deref()),
                api_version: cli.search_api_version.clone(),
                semantic_config: cli.search_semantic_config.clone(),
            },
            chat_model: ChatModelSettings {
                endpoint: base_url(cli.openai_endpoint.as_deref()),
                key: non_empty(cli.openai_key.as_deref()),
                deployment: non_empty(cli.openai_deployment.as_deref()),
                api_version: cli.openai_api_version.clone(),
            },
            calendar: FeedSettings {
                base_url: cli.calendar_url.clone(),
                key: non_empty(cli.calendar_key.as_deref()),
            },
            alerts: FeedSettings {
                base_url: cli.alerts_url.clone(),
                key: non_empty(cli.alerts_key.as_deref()),
            },
        };
        Self { config: cfg }
    }
}
