use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::chat::ChatService;
use crate::clients::{AlertsClient, CalendarClient, ChatModelClient, SearchClient, SummaryClient};
use crate::configuration::Configuration;
use crate::repo::{DashboardRepository, ForumRepository};
use crate::rest::AppState;
use crate::storage::{CosmosStore, DocumentStore, NoStore, SqliteStore};

/// Cosmos when configured, else the local SQLite store, else nothing.
pub fn init_store(cfg: &Configuration) -> Result<Arc<dyn DocumentStore>> {
    match CosmosStore::from_settings(&cfg.cosmos) {
        Ok(Some(cosmos)) => {
            log::info!(
                "🗄️ Document store: Cosmos DB ({}/{})",
                cfg.cosmos.database,
                cfg.cosmos.container
            );
            return Ok(Arc::new(cosmos));
        }
        Ok(None) => {}
        Err(err) => {
            log::warn!("Cosmos DB disabled: {}", err);
            return Ok(Arc::new(NoStore));
        }
    }

    match &cfg.store_path {
        Some(path) => {
            let sqlite = SqliteStore::new(path);
            sqlite.init().context("initializing document store")?;
            log::info!("🗄️ Document store: SQLite at {}", path);
            Ok(Arc::new(sqlite))
        }
        None => {
            log::warn!("No document store configured, serving sample data");
            Ok(Arc::new(NoStore))
        }
    }
}

pub fn build_dashboard(
    cfg: &Configuration,
    store: Arc<dyn DocumentStore>,
) -> Result<DashboardRepository> {
    let summary = SummaryClient::new(&cfg.summary).context("building summary client")?;
    let calendar = CalendarClient::new(&cfg.calendar).context("building calendar client")?;
    let alerts = AlertsClient::new(&cfg.alerts).context("building alerts client")?;
    Ok(DashboardRepository::new(
        store,
        Arc::new(summary),
        Arc::new(calendar),
        Arc::new(alerts),
    ))
}

pub fn build_chat(cfg: &Configuration) -> Result<ChatService> {
    let search = SearchClient::new(&cfg.search).context("building search client")?;
    let model = ChatModelClient::new(&cfg.chat_model).context("building chat model client")?;
    Ok(ChatService::new(Arc::new(search), Arc::new(model)))
}

pub fn build_state(cfg: &Configuration) -> Result<AppState> {
    let store = init_store(cfg)?;
    let dashboard = Arc::new(build_dashboard(cfg, store)?);
    let forum = Arc::new(ForumRepository::new(dashboard.clone()));
    let chat = Arc::new(build_chat(cfg)?);

    Ok(AppState {
        dashboard,
        forum,
        chat,
        region: cfg.region.clone(),
        started_at: SystemTime::now(),
    })
}
