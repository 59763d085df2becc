use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use super::CommandRunner;
use crate::context;
use crate::storage::{SqliteStore, DASHBOARD_DOC_TYPE};
use crate::types::DashboardResponse;

pub struct ImportDashboard<'a> {
    pub file: &'a Path,
}

/// Parses `raw` and checks it has the shape the dashboard endpoints serve.
pub fn validate_dashboard(raw: &str) -> Result<Value> {
    let payload: Value = serde_json::from_str(raw).context("parsing dashboard JSON")?;
    let dashboard: DashboardResponse =
        serde_json::from_value(payload.clone()).context("validating dashboard payload")?;
    log::info!(
        "dashboard has {} stories, {} policies, {} discussions, {} events, {} elections",
        dashboard.stories.len(),
        dashboard.policies.len(),
        dashboard.discussions.len(),
        dashboard.events.len(),
        dashboard.elections.len()
    );
    Ok(payload)
}

impl CommandRunner for ImportDashboard<'_> {
    fn run(&self, ctx: &context::Context) -> Result<()> {
        let store_path = ctx
            .config
            .store_path
            .as_deref()
            .ok_or_else(|| anyhow!("--store-path (CIVIC_STORE_PATH) is required for import"))?;

        let raw = std::fs::read_to_string(self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let payload = validate_dashboard(&raw)?;

        let store = SqliteStore::new(store_path);
        store.init().context("initializing document store")?;
        let id = store
            .insert_document(DASHBOARD_DOC_TYPE, &payload)
            .context("storing dashboard")?;
        log::info!("imported dashboard id={} into {}", id, store_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::sample_dashboard;
    use crate::storage::DocumentStore;
    use chrono::Utc;

    #[test]
    fn rejects_payload_missing_sections() {
        let err = validate_dashboard(r#"{"snapshot": {"greeting": "hi"}}"#).unwrap_err();
        assert!(err.to_string().contains("validating"));
        assert!(validate_dashboard("not json").is_err());
    }

    #[tokio::test]
    async fn imported_dashboard_becomes_latest() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dashboard.json");
        let mut dashboard = sample_dashboard(Utc::now());
        dashboard.snapshot.greeting = "Imported".to_string();
        std::fs::write(&file, serde_json::to_string(&dashboard).unwrap()).unwrap();

        let store_path = dir.path().join("civic.sqlite");
        let cli = <crate::cli::Cli as clap::Parser>::parse_from([
            "civic-sphere",
            "--store-path",
            store_path.to_str().unwrap(),
        ]);
        let ctx = context::Context::from_cli(&cli);

        ImportDashboard { file: &file }.run(&ctx).unwrap();

        let stored = SqliteStore::new(&store_path)
            .latest_dashboard_payload()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["snapshot"]["greeting"], "Imported");
    }

    #[test]
    fn store_path_is_required() {
        let cli = <crate::cli::Cli as clap::Parser>::parse_from(["civic-sphere"]);
        let ctx = context::Context::from_cli(&cli);
        let result = ImportDashboard {
            file: Path::new("missing.json"),
        }
        .run(&ctx);
        assert!(result.unwrap_err().to_string().contains("--store-path"));
    }
}
