//! Static dashboard served when the document store has nothing usable.

use chrono::{DateTime, Duration, Utc};
use url::Url;

use crate::types::{
    CommunitySnapshot, DashboardResponse, Discussion, Election, Event, Metric, Policy, Story,
};

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/320x200";

fn metric(label: &str, value: i64, trend: &str) -> Metric {
    Metric {
        label: label.to_string(),
        value,
        trend: trend.to_string(),
    }
}

fn discussion(
    id: &str,
    topic: &str,
    category: &str,
    sentiment: &str,
    replies_count: i64,
    last_active_minutes: i64,
) -> Discussion {
    Discussion {
        id: id.to_string(),
        topic: topic.to_string(),
        category: category.to_string(),
        sentiment: sentiment.to_string(),
        replies_count,
        last_active_minutes,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

pub fn sample_dashboard(now: DateTime<Utc>) -> DashboardResponse {
    let image = Url::parse(PLACEHOLDER_IMAGE).ok();

    DashboardResponse {
        snapshot: CommunitySnapshot {
            greeting: "Good afternoon, Alex 👋".to_string(),
            subheading: "Here is what's happening in New York City.".to_string(),
            metrics: vec![
                metric("Local Policy Changes", 4, "+12%"),
                metric("Nearby Events", 5, "+8%"),
                metric("Service Alerts", 3, "-5%"),
            ],
        },
        stories: vec![
            Story {
                id: "story-1".to_string(),
                title: "How the new transit proposal affects Midtown".to_string(),
                category: "Transportation".to_string(),
                summary: "City planners outline the congestion pricing impact and new subway upgrades."
                    .to_string(),
                image_url: image.clone(),
                published_at: now,
            },
            Story {
                id: "story-2".to_string(),
                title: "What's changing with NYC's sustainability guidelines?".to_string(),
                category: "Environment".to_string(),
                summary: "A quick refresher on the latest green roof incentives.".to_string(),
                image_url: image,
                published_at: now - Duration::hours(5),
            },
        ],
        policies: vec![
            Policy {
                id: "policy-1".to_string(),
                title: "NYC Housing Affordability Act 2024".to_string(),
                status: "Active".to_string(),
                description: "Updated zoning rules for Midtown & Downtown cores.".to_string(),
                highlights: strings(&[
                    "Increases moderate-income units",
                    "Expands tenant protections",
                ]),
                tags: strings(&["Housing", "Development"]),
            },
            Policy {
                id: "policy-2".to_string(),
                title: "Clean Streets Initiative Expansion".to_string(),
                status: "Public Comment".to_string(),
                description: "New targets for commercial sanitation partnerships.".to_string(),
                highlights: strings(&["Adds 3,000 smart bins", "Offers grants to small biz"]),
                tags: strings(&["Sanitation", "Community"]),
            },
        ],
        discussions: vec![
            discussion(
                "disc-1",
                "Proposed bike lane expansions on 5th Avenue",
                "Transportation",
                "Positive",
                42,
                18,
            ),
            discussion(
                "disc-2",
                "Community input on new park development",
                "Parks",
                "Mixed",
                17,
                55,
            ),
            discussion(
                "disc-3",
                "Affordable housing development in Brooklyn",
                "Housing",
                "Mixed",
                28,
                32,
            ),
            discussion(
                "disc-4",
                "Subway line extension to Queens",
                "Infrastructure",
                "Positive",
                56,
                12,
            ),
            discussion(
                "disc-5",
                "Congestion pricing implementation",
                "Transportation",
                "Mixed",
                89,
                5,
            ),
            discussion(
                "disc-6",
                "Water main replacement project timeline",
                "Infrastructure",
                "Neutral",
                15,
                67,
            ),
        ],
        events: vec![
            Event {
                id: "event-1".to_string(),
                name: "Downtown Borough Meeting".to_string(),
                venue: "Civic Hall".to_string(),
                start_time: now,
                end_time: now + Duration::hours(1),
                category: "Townhall".to_string(),
                image_url: None,
                description: None,
                website_url: None,
                address: None,
            },
            Event {
                id: "event-2".to_string(),
                name: "Water Resiliency Workshop".to_string(),
                venue: "Harlem REC".to_string(),
                start_time: now + Duration::days(1),
                end_time: now + Duration::days(1) + Duration::hours(2),
                category: "Workshop".to_string(),
                image_url: None,
                description: None,
                website_url: None,
                address: None,
            },
        ],
        elections: vec![
            Election {
                id: "elex-1".to_string(),
                title: "Proposition 1: Education".to_string(),
                description: "Funding to modernize district labs.".to_string(),
                stance: "Support".to_string(),
                votes: 1240,
            },
            Election {
                id: "elex-2".to_string(),
                title: "Proposition 2: Climate Action".to_string(),
                description: "Expanding coastal resilience budget.".to_string(),
                stance: "Support".to_string(),
                votes: 980,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_complete_and_relative_to_now() {
        let now = Utc::now();
        let dashboard = sample_dashboard(now);
        assert_eq!(dashboard.snapshot.metrics.len(), 3);
        assert_eq!(dashboard.stories.len(), 2);
        assert_eq!(dashboard.policies.len(), 2);
        assert_eq!(dashboard.discussions.len(), 6);
        assert_eq!(dashboard.events.len(), 2);
        assert_eq!(dashboard.elections.len(), 2);
        assert_eq!(dashboard.stories[1].published_at, now - Duration::hours(5));
        assert!(dashboard.stories[0].image_url.is_some());
        assert!(dashboard.events.iter().all(|e| e.end_time > e.start_time));
    }
}
