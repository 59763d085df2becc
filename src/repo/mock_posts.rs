//! Templated forum activity for threads derived from dashboard discussions.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::ForumPost;

pub const AI_MODERATOR_AUTHOR: &str = "AI Moderator";

pub const MOCK_USERS: [&str; 12] = [
    "Sarah Chen",
    "Marcus Johnson",
    "Elena Rodriguez",
    "David Kim",
    "Priya Patel",
    "James Wilson",
    "Maria Garcia",
    "Robert Brown",
    "Jennifer Lee",
    "Michael Taylor",
    "Lisa Anderson",
    "Christopher Martinez",
];

const WELCOME_MESSAGES: [&str; 2] = [
    "Welcome to this discussion! Feel free to share your thoughts, questions, or experiences.",
    "This is an important topic for our community. What questions or concerns do you have?",
];

const FACILITATION_MESSAGES: [&str; 8] = [
    "Thanks for sharing your perspective! I'm curious - what specific aspects of this proposal concern you most?",
    "It's great to see different viewpoints here. Can anyone share their experience with similar initiatives in other neighborhoods?",
    "This is an important discussion. For those who might be new to this topic, what questions do you have?",
    "I notice there are both supportive and concerned voices here. What information would help everyone make a more informed decision?",
    "Let's make sure everyone feels heard. What would make this proposal work better for your community?",
    "There are valid points on both sides. What common ground can we find?",
    "For those just joining the conversation, what brought you here today?",
    "This is a complex issue with many factors. What additional context would be helpful?",
];

const ASPECTS: [&str; 3] = ["the details", "the implementation", "the impact"];
const GROUPS: [&str; 4] = ["residents", "local businesses", "families", "seniors"];

/// Chance that a later post replies to an earlier one.
const REPLY_PROBABILITY: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Opinion {
    Supportive,
    Concerned,
    Neutral,
}

impl Opinion {
    const ALL: [Opinion; 3] = [Opinion::Supportive, Opinion::Concerned, Opinion::Neutral];

    fn templates(self) -> &'static [&'static str] {
        match self {
            Opinion::Supportive => &[
                "I think this is a great idea! {reason}",
                "I'm fully in support of this. {reason}",
                "This would benefit our community because {reason}",
            ],
            Opinion::Concerned => &[
                "I have some concerns about this. {reason}",
                "I'm worried that {reason}",
                "This might not work well because {reason}",
            ],
            Opinion::Neutral => &[
                "I'd like to understand more about {aspect}",
                "Can someone explain how this would affect {group}?",
                "What are the potential downsides we should consider?",
            ],
        }
    }
}

struct Reasons {
    supportive: &'static [&'static str],
    concerned: &'static [&'static str],
    neutral: &'static [&'static str],
}

impl Reasons {
    fn for_opinion(&self, opinion: Opinion) -> &'static [&'static str] {
        match opinion {
            Opinion::Supportive => self.supportive,
            Opinion::Concerned => self.concerned,
            Opinion::Neutral => self.neutral,
        }
    }
}

fn reasons_for(category: &str) -> Reasons {
    match category {
        "Transportation" => Reasons {
            supportive: &[
                "it would reduce traffic congestion and make commuting easier",
                "it promotes sustainable transportation options",
                "it would improve safety for cyclists and pedestrians",
            ],
            concerned: &[
                "it might reduce parking availability",
                "it could increase traffic on other streets",
                "the construction period would be disruptive",
            ],
            neutral: &[
                "the impact on local businesses",
                "the timeline for implementation",
                "the cost and funding",
            ],
        },
        "Parks" => Reasons {
            supportive: &[
                "it would provide much-needed green space for families",
                "it would improve property values in the area",
                "it would create a community gathering place",
            ],
            concerned: &[
                "it might increase noise and foot traffic",
                "maintenance costs could be high",
                "it might not serve all community needs",
            ],
            neutral: &[
                "the maintenance plan",
                "accessibility features",
                "programming and events",
            ],
        },
        "Housing" => Reasons {
            supportive: &[
                "it addresses the affordable housing crisis",
                "it would help families stay in their neighborhoods",
                "it promotes mixed-income communities",
            ],
            concerned: &[
                "it might change the character of the neighborhood",
                "infrastructure might not support the density",
                "it could lead to gentrification",
            ],
            neutral: &[
                "eligibility requirements",
                "the application process",
                "long-term affordability",
            ],
        },
        "Infrastructure" => Reasons {
            supportive: &[
                "it would improve our aging infrastructure",
                "it would create jobs and boost the local economy",
                "it's necessary for future growth",
            ],
            concerned: &[
                "the construction would be very disruptive",
                "the cost seems too high",
                "there might be better alternatives",
            ],
            neutral: &[
                "the construction timeline",
                "funding sources",
                "environmental impact",
            ],
        },
        _ => Reasons {
            supportive: &["it seems like a good idea"],
            concerned: &["there might be issues"],
            neutral: &["we need more information"],
        },
    }
}

fn pick<'a, R: Rng + ?Sized>(items: &[&'a str], rng: &mut R) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Welcome early threads, otherwise nudge the conversation along.
pub fn moderator_message<R: Rng + ?Sized>(prior_posts: usize, rng: &mut R) -> &'static str {
    if prior_posts < 3 {
        pick(&WELCOME_MESSAGES, rng)
    } else {
        pick(&FACILITATION_MESSAGES, rng)
    }
}

fn opinion_content<R: Rng + ?Sized>(reasons: &Reasons, rng: &mut R) -> String {
    let opinion = Opinion::ALL[rng.gen_range(0..Opinion::ALL.len())];
    let template = pick(opinion.templates(), rng);
    let reason = pick(reasons.for_opinion(opinion), rng);
    template
        .replace("{reason}", reason)
        .replace("{aspect}", pick(&ASPECTS, rng))
        .replace("{group}", pick(&GROUPS, rng))
}

/// Builds 5-10 user posts plus 1-2 moderator posts, ordered by time.
///
/// The opening post always comes first. No post is dated after `now`.
pub fn generate_mock_posts<R: Rng + ?Sized>(
    thread_id: &str,
    topic: &str,
    category: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ForumPost> {
    let post_count: usize = rng.gen_range(5..=10);
    let base_time = now - Duration::hours(rng.gen_range(1..=48));
    let reasons = reasons_for(category);

    let op_author = pick(&MOCK_USERS, rng);
    let repliers: Vec<&str> = MOCK_USERS
        .iter()
        .copied()
        .filter(|u| *u != op_author)
        .collect();

    let mut posts = Vec::with_capacity(post_count + 2);
    posts.push(ForumPost {
        id: format!("post-{}-1", thread_id),
        thread_id: thread_id.to_string(),
        author: op_author.to_string(),
        content: format!(
            "I wanted to start a discussion about {}. What are everyone's thoughts?",
            topic.to_lowercase()
        ),
        created_at: base_time,
        is_ai_moderator: false,
        parent_post_id: None,
    });

    for i in 2..=post_count {
        let created_at = (base_time + Duration::minutes(rng.gen_range(10..=1440))).min(now);
        let content = opinion_content(&reasons, rng);
        let parent_post_id = if i > 2 && rng.gen_bool(REPLY_PROBABILITY) {
            posts.choose(rng).map(|p: &ForumPost| p.id.clone())
        } else {
            None
        };

        posts.push(ForumPost {
            id: format!("post-{}-{}", thread_id, i),
            thread_id: thread_id.to_string(),
            author: pick(&repliers, rng).to_string(),
            content,
            created_at,
            is_ai_moderator: false,
            parent_post_id,
        });
    }

    let moderator_posts: usize = rng.gen_range(1..=2);
    for n in 1..=moderator_posts {
        let position = rng.gen_range(3..posts.len());
        let previous = posts[position - 1].created_at;
        posts.insert(
            position,
            ForumPost {
                id: format!("post-{}-ai-{}", thread_id, n),
                thread_id: thread_id.to_string(),
                author: AI_MODERATOR_AUTHOR.to_string(),
                content: moderator_message(position, rng).to_string(),
                created_at: (previous + Duration::minutes(rng.gen_range(5..=30))).min(now),
                is_ai_moderator: true,
                parent_post_id: None,
            },
        );
    }

    posts.sort_by_key(|p| p.created_at);
    posts
}

pub fn thread_summary(topic: &str, posts: &[ForumPost]) -> String {
    let topic = topic.to_lowercase();
    let contributions = posts.iter().filter(|p| !p.is_ai_moderator).count();
    match contributions {
        0 => format!("Discussion about {}.", topic),
        1..=4 => format!(
            "New discussion about {}. Community members are sharing initial thoughts and questions.",
            topic
        ),
        n => format!(
            "Active discussion about {} with {} community contributions. Participants are sharing diverse perspectives, asking questions, and engaging in dialogue about the topic.",
            topic, n
        ),
    }
}
