use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Civic dashboard and forum API",
    long_about = "Serves the civic dashboard, service alerts, discussion forum and document chat over HTTP, aggregating a document store and several external services.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "api-listen",
        env = "CIVIC_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8000",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long,
        env = "AZURE_REGION",
        default_value = "eastus",
        help = "Deployment region reported by /health"
    )]
    pub region: String,

    #[arg(
        long = "log-file",
        env = "CIVIC_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "store-path",
        env = "CIVIC_STORE_PATH",
        value_name = "PATH",
        help = "Local SQLite document store, used when Cosmos DB is not configured"
    )]
    pub store_path: Option<String>,

    #[arg(long, env = "COSMOS_ENDPOINT", value_name = "URL")]
    pub cosmos_endpoint: Option<String>,

    #[arg(long, env = "COSMOS_KEY", value_name = "KEY", hide_env_values = true)]
    pub cosmos_key: Option<String>,

    #[arg(long, env = "COSMOS_DATABASE", default_value = "ny-civic-sphere")]
    pub cosmos_database: String,

    #[arg(long, env = "COSMOS_CONTAINER", default_value = "dashboard")]
    pub cosmos_container: String,

    #[arg(
        long,
        env = "AZURE_FUNCTIONS_BASE_URL",
        value_name = "URL",
        help = "Base URL of the dashboard summary function app"
    )]
    pub functions_base_url: Option<String>,

    #[arg(
        long,
        env = "AI_SUGGESTION_FUNCTION_KEY",
        value_name = "KEY",
        hide_env_values = true
    )]
    pub function_key: Option<String>,

    #[arg(long, env = "AZURE_SEARCH_ENDPOINT", value_name = "URL")]
    pub search_endpoint: Option<String>,

    #[arg(
        long,
        env = "AZURE_SEARCH_KEY",
        value_name = "KEY",
        hide_env_values = true
    )]
    pub search_key: Option<String>,

    #[arg(long, env = "AZURE_SEARCH_INDEX_NAME", value_name = "INDEX")]
    pub search_index: Option<String>,

    #[arg(long, env = "AZURE_SEARCH_API_VERSION", default_value = "2024-05-01-preview")]
    pub search_api_version: String,

    #[arg(long, env = "AZURE_SEARCH_SEMANTIC_CONFIG_NAME", default_value = "default")]
    pub search_semantic_config: String,

    #[arg(long, env = "AZURE_OPENAI_ENDPOINT", value_name = "URL")]
    pub openai_endpoint: Option<String>,

    #[arg(
        long,
        env = "AZURE_OPENAI_KEY",
        value_name = "KEY",
        hide_env_values = true
    )]
    pub openai_key: Option<String>,

    #[arg(long, env = "AZURE_OPENAI_DEPLOYMENT", value_name = "NAME")]
    pub openai_deployment: Option<String>,

    #[arg(long, env = "AZURE_OPENAI_API_VERSION", default_value = "2024-02-15-preview")]
    pub openai_api_version: String,

    #[arg(
        long,
        env = "NYC_CALENDAR_BASE_URL",
        default_value = "https://api.nyc.gov/calendar/discover"
    )]
    pub calendar_url: String,

    #[arg(
        long,
        env = "NYC_CALENDAR_KEY",
        value_name = "KEY",
        hide_env_values = true
    )]
    pub calendar_key: Option<String>,

    #[arg(
        long,
        env = "NYC_CALENDAR_ALERTS_BASE_URL",
        default_value = "https://api.nyc.gov/public/api/GetCalendar"
    )]
    pub alerts_url: String,

    #[arg(
        long,
        env = "NYC_CALENDAR_ALERTS_KEY",
        value_name = "KEY",
        hide_env_values = true
    )]
    pub alerts_key: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
