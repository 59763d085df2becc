mod dashboard;
mod forum;
mod mock_posts;
mod sample;

pub use dashboard::{DashboardRepository, ALERT_WINDOW_DAYS};
pub use forum::{ForumError, ForumRepository, DEFAULT_POST_AUTHOR};
pub use mock_posts::{generate_mock_posts, thread_summary, AI_MODERATOR_AUTHOR};
pub use sample::sample_dashboard;
