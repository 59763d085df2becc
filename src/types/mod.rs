mod alerts;
mod chat;
mod dashboard;
mod forum;
mod timestamp;

pub use alerts::{ServiceAlertDay, ServiceAlertItem, ServiceAlertsResponse};
pub use chat::{ChatResponse, Source};
pub use dashboard::{
    CommunitySnapshot, DashboardResponse, Discussion, Election, Event, Metric, Policy, Story,
};
pub use forum::{ForumPost, ForumResponse, ForumThread, ForumThreadResponse};
pub use timestamp::parse_timestamp;
