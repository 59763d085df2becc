use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};

use super::sample::sample_dashboard;
use crate::clients::{AlertFeed, EventFeed, SummaryService};
use crate::storage::DocumentStore;
use crate::types::{CommunitySnapshot, DashboardResponse, ServiceAlertsResponse};

/// Days of service alerts shown, counting back from today.
pub const ALERT_WINDOW_DAYS: i64 = 7;

/// Data access facade behind the dashboard endpoints.
pub struct DashboardRepository {
    store: Arc<dyn DocumentStore>,
    summary: Arc<dyn SummaryService>,
    events: Arc<dyn EventFeed>,
    alerts: Arc<dyn AlertFeed>,
}

impl DashboardRepository {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        summary: Arc<dyn SummaryService>,
        events: Arc<dyn EventFeed>,
        alerts: Arc<dyn AlertFeed>,
    ) -> Self {
        Self {
            store,
            summary,
            events,
            alerts,
        }
    }

    /// Stored dashboard (or the sample one), with events replaced by the
    /// live calendar whenever it has any.
    pub async fn fetch_dashboard(&self) -> DashboardResponse {
        let mut dashboard = self.load_base().await;

        if let Some(events) = self.events.fetch_events().await {
            if !events.is_empty() {
                log::debug!("Using {} events from the city calendar", events.len());
                dashboard.events = events;
            }
        }
        dashboard
    }

    async fn load_base(&self) -> DashboardResponse {
        match self.store.latest_dashboard_payload().await {
            Ok(Some(payload)) => match serde_json::from_value(payload) {
                Ok(dashboard) => return dashboard,
                Err(err) => log::warn!("Stored dashboard is invalid, using sample data: {}", err),
            },
            Ok(None) => log::debug!("No stored dashboard, using sample data"),
            Err(err) => log::warn!("Document store unavailable, using sample data: {}", err),
        }
        sample_dashboard(Utc::now())
    }

    pub async fn fetch_snapshot(&self) -> CommunitySnapshot {
        self.fetch_dashboard().await.snapshot
    }

    pub async fn fetch_ai_summary(&self) -> Option<Value> {
        let dashboard = self.fetch_dashboard().await;
        let payload = json!({
            "snapshot": dashboard.snapshot,
            "stories": dashboard.stories,
        });
        self.summary.invoke_ai_suggestions(&payload).await
    }

    pub async fn fetch_service_alerts(&self, today: NaiveDate) -> ServiceAlertsResponse {
        let from = today - Duration::days(ALERT_WINDOW_DAYS);
        self.alerts
            .fetch_alerts(from, today)
            .await
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{NoStore, StorageError};
    use crate::types::{Event, ServiceAlertDay};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedStore(Result<Option<Value>, &'static str>);

    #[async_trait]
    impl DocumentStore for FixedStore {
        async fn latest_dashboard_payload(&self) -> Result<Option<Value>, StorageError> {
            self.0
                .clone()
                .map_err(|msg| StorageError::Document(msg.to_string()))
        }
    }

    #[derive(Default)]
    struct Fakes {
        events: Option<Vec<Event>>,
        summary_seen: Mutex<Option<Value>>,
        alert_window: Mutex<Option<(NaiveDate, NaiveDate)>>,
    }

    #[async_trait]
    impl SummaryService for Fakes {
        async fn invoke_ai_suggestions(&self, payload: &Value) -> Option<Value> {
            *self.summary_seen.lock().unwrap() = Some(payload.clone());
            Some(json!({"summary": "All quiet."}))
        }
    }

    #[async_trait]
    impl EventFeed for Fakes {
        async fn fetch_events(&self) -> Option<Vec<Event>> {
            self.events.clone()
        }
    }

    #[async_trait]
    impl AlertFeed for Fakes {
        async fn fetch_alerts(
            &self,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Option<ServiceAlertsResponse> {
            *self.alert_window.lock().unwrap() = Some((from, to));
            None
        }
    }

    fn repo(store: Arc<dyn DocumentStore>, fakes: Arc<Fakes>) -> DashboardRepository {
        DashboardRepository::new(store, fakes.clone(), fakes.clone(), fakes)
    }

    fn stored_dashboard() -> Value {
        let mut dashboard = serde_json::to_value(sample_dashboard(Utc::now())).unwrap();
        dashboard["snapshot"]["greeting"] = json!("Hello from the store");
        dashboard
    }

    #[tokio::test]
    async fn falls_back_to_sample_without_store() {
        let repo = repo(Arc::new(NoStore), Arc::new(Fakes::default()));
        let dashboard = repo.fetch_dashboard().await;
        assert_eq!(dashboard.snapshot.greeting, "Good afternoon, Alex 👋");
        assert_eq!(dashboard.discussions.len(), 6);
    }

    #[tokio::test]
    async fn uses_stored_payload() {
        let store = Arc::new(FixedStore(Ok(Some(stored_dashboard()))));
        let repo = repo(store, Arc::new(Fakes::default()));
        assert_eq!(repo.fetch_snapshot().await.greeting, "Hello from the store");
    }

    #[tokio::test]
    async fn stored_payload_with_naive_timestamps_is_kept() {
        let mut stored = stored_dashboard();
        stored["stories"][0]["published_at"] = json!("2024-05-01T10:00:00");
        stored["events"][0]["start_time"] = json!("2024-05-02T18:00:00.000000");
        let store = Arc::new(FixedStore(Ok(Some(stored))));

        let dashboard = repo(store, Arc::new(Fakes::default())).fetch_dashboard().await;
        assert_eq!(dashboard.snapshot.greeting, "Hello from the store");
        assert_eq!(
            dashboard.stories[0].published_at.to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
        assert_eq!(
            dashboard.events[0].start_time.to_rfc3339(),
            "2024-05-02T18:00:00+00:00"
        );
    }

    #[tokio::test]
    async fn invalid_or_failing_store_falls_back() {
        let invalid = Arc::new(FixedStore(Ok(Some(json!({"snapshot": "nope"})))));
        let repo_invalid = repo(invalid, Arc::new(Fakes::default()));
        assert_eq!(
            repo_invalid.fetch_snapshot().await.greeting,
            "Good afternoon, Alex 👋"
        );

        let failing = Arc::new(FixedStore(Err("connection refused")));
        let repo_failing = repo(failing, Arc::new(Fakes::default()));
        assert_eq!(repo_failing.fetch_dashboard().await.stories.len(), 2);
    }

    #[tokio::test]
    async fn calendar_events_replace_payload_events() {
        let now = Utc::now();
        let live = Event {
            id: "live-1".to_string(),
            name: "Street Fair".to_string(),
            venue: "Broadway".to_string(),
            start_time: now,
            end_time: now + Duration::hours(3),
            category: "Festival".to_string(),
            image_url: None,
            description: None,
            website_url: None,
            address: None,
        };
        let fakes = Arc::new(Fakes {
            events: Some(vec![live.clone()]),
            ..Fakes::default()
        });
        let dashboard = repo(Arc::new(NoStore), fakes).fetch_dashboard().await;
        assert_eq!(dashboard.events, vec![live]);
    }

    #[tokio::test]
    async fn empty_calendar_keeps_payload_events() {
        let fakes = Arc::new(Fakes {
            events: Some(Vec::new()),
            ..Fakes::default()
        });
        let dashboard = repo(Arc::new(NoStore), fakes).fetch_dashboard().await;
        assert_eq!(dashboard.events.len(), 2);
        assert_eq!(dashboard.events[0].id, "event-1");
    }

    #[tokio::test]
    async fn ai_summary_sends_snapshot_and_stories() {
        let fakes = Arc::new(Fakes::default());
        let repo = repo(Arc::new(NoStore), fakes.clone());

        let summary = repo.fetch_ai_summary().await.unwrap();
        assert_eq!(summary["summary"], "All quiet.");

        let sent = fakes.summary_seen.lock().unwrap().clone().unwrap();
        assert!(sent.get("snapshot").is_some());
        assert_eq!(sent["stories"].as_array().unwrap().len(), 2);
        assert!(sent.get("policies").is_none());
    }

    #[tokio::test]
    async fn service_alerts_cover_last_week_and_default_to_empty() {
        let fakes = Arc::new(Fakes::default());
        let repo = repo(Arc::new(NoStore), fakes.clone());
        let today = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();

        let alerts = repo.fetch_service_alerts(today).await;
        assert_eq!(alerts.days, Vec::<ServiceAlertDay>::new());
        assert_eq!(
            *fakes.alert_window.lock().unwrap(),
            Some((NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), today))
        );
    }
}
